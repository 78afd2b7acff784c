//! Workspace and SessionStore policy tests.

mod test_utils;

use async_trait::async_trait;
use scenecraft_core::{Session, SeoPatch};
use scenecraft_error::{EngineErrorKind, StorageError, StorageErrorKind, StorageResult};
use scenecraft_pipeline::{ScriptOrchestrator, SessionStore, Workspace};
use scenecraft_storage::{HistoryStore, InMemoryHistoryStore};
use std::sync::Arc;
use test_utils::{MockImageEngine, MockTextEngine, gateway, history, inputs, script_json};

async fn recorded_workspace(store: Arc<InMemoryHistoryStore>, runs: usize) -> Workspace {
    let text = MockTextEngine::new_success(script_json(1));
    let image = MockImageEngine::new_success();
    let orchestrator = ScriptOrchestrator::new(gateway(&text, &image));
    let mut workspace = Workspace::open(store).await.expect("open");
    for _ in 0..runs {
        let outcome = orchestrator.generate(&inputs()).await.expect("generate");
        workspace.record(inputs(), outcome).await.expect("record");
    }
    workspace
}

#[tokio::test]
async fn test_image_failure_still_creates_session() -> anyhow::Result<()> {
    let store = history();
    let text = MockTextEngine::new_success(script_json(1));
    let image = MockImageEngine::new_error(EngineErrorKind::Transport("timeout".into()));
    let orchestrator = ScriptOrchestrator::new(gateway(&text, &image));
    let mut workspace = Workspace::open(store.clone()).await?;

    let outcome = orchestrator.generate(&inputs()).await?;
    let report = workspace.record(inputs(), outcome).await?;

    assert!(report.created_session());
    assert!(report.image_error().is_some());
    let id = report.session_id().expect("session id");
    let session = workspace.history().get(&id).expect("stored");
    assert!(session.image().is_none());
    assert!(session.script().is_some());
    assert_eq!(session.title(), "Valley of Elah");
    assert_eq!(workspace.working().active_id(), &Some(id));
    assert_eq!(store.load_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_script_failure_creates_no_session() -> anyhow::Result<()> {
    let store = history();
    let text = MockTextEngine::new_success("not json at all");
    let image = MockImageEngine::new_success();
    let orchestrator = ScriptOrchestrator::new(gateway(&text, &image));
    let mut workspace = Workspace::open(store.clone()).await?;

    let outcome = orchestrator.generate(&inputs()).await?;
    let report = workspace.record(inputs(), outcome).await?;

    assert!(!report.created_session());
    assert!(report.script_error().is_some());
    assert!(workspace.history().is_empty());
    assert_eq!(store.save_count(), 0);
    assert!(workspace.working().image().is_some());
    assert!(workspace.working().active_id().is_none());
    Ok(())
}

#[tokio::test]
async fn test_history_is_most_recent_first() {
    let workspace = recorded_workspace(history(), 3).await;
    let ids: Vec<_> = workspace.history().iter().map(|s| *s.id()).collect();

    assert_eq!(ids.len(), 3);
    assert!(ids[0] > ids[1] && ids[1] > ids[2]);
    assert_eq!(workspace.working().active_id(), &Some(ids[0]));
}

#[tokio::test]
async fn test_deleting_active_session_resets_working_area() -> anyhow::Result<()> {
    let mut workspace = recorded_workspace(history(), 1).await;
    let id = *workspace.history().sessions()[0].id();

    workspace.delete(&id).await?;

    assert!(workspace.history().is_empty());
    assert!(workspace.working().is_empty());
    assert!(workspace.working().inputs().story_idea().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_deleting_other_session_keeps_working_area() -> anyhow::Result<()> {
    let mut workspace = recorded_workspace(history(), 2).await;
    let active = *workspace.history().sessions()[0].id();
    let other = *workspace.history().sessions()[1].id();
    let before = workspace.working().script().clone();

    workspace.delete(&other).await?;

    assert_eq!(workspace.history().len(), 1);
    assert_eq!(workspace.working().active_id(), &Some(active));
    assert_eq!(workspace.working().script(), &before);
    Ok(())
}

#[tokio::test]
async fn test_select_copies_session_and_edits_stay_local() -> anyhow::Result<()> {
    let mut workspace = recorded_workspace(history(), 2).await;
    let older = *workspace.history().sessions()[1].id();

    workspace.select(&older)?;
    assert_eq!(workspace.working().active_id(), &Some(older));

    let patched = workspace
        .apply_patch(SeoPatch::Tags(vec!["edited".into()]))
        .expect("working script")
        .clone();
    assert_eq!(patched.seo.tags, vec!["edited"]);

    let stored = workspace.history().get(&older).expect("stored");
    assert_ne!(stored.script().as_ref().map(|s| &s.seo.tags), Some(&patched.seo.tags));
    Ok(())
}

#[tokio::test]
async fn test_snapshot_appends_edited_copy() -> anyhow::Result<()> {
    let mut workspace = recorded_workspace(history(), 1).await;
    workspace.apply_patch(SeoPatch::Description("Edited".into()));

    let id = workspace.snapshot_working_copy().await?.expect("snapshot");

    assert_eq!(workspace.history().len(), 2);
    assert_eq!(workspace.history().sessions()[0].id(), &id);
    let saved = workspace.history().get(&id).expect("stored");
    assert_eq!(
        saved.script().as_ref().map(|s| s.seo.description.as_str()),
        Some("Edited")
    );
    Ok(())
}

#[tokio::test]
async fn test_new_session_resets_everything() {
    let mut workspace = recorded_workspace(history(), 1).await;
    workspace.new_session();

    assert!(workspace.working().is_empty());
    assert_eq!(workspace.history().len(), 1);
    assert!(workspace.apply_patch(SeoPatch::Tags(vec!["x".into()])).is_none());
}

#[tokio::test]
async fn test_select_unknown_id_is_not_found() {
    let mut workspace = recorded_workspace(history(), 0).await;
    let err = workspace
        .select(&scenecraft_core::SessionId::new())
        .unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::SessionNotFound(_)));
}

#[tokio::test]
async fn test_reopened_history_matches() -> anyhow::Result<()> {
    let store = history();
    let workspace = recorded_workspace(store.clone(), 2).await;

    let reopened = SessionStore::open(store).await?;
    assert_eq!(reopened.sessions(), workspace.history().sessions());
    Ok(())
}

/// History backend whose saves always fail.
struct BrokenHistory;

#[async_trait]
impl HistoryStore for BrokenHistory {
    async fn load_all(&self) -> StorageResult<Vec<Session>> {
        Ok(Vec::new())
    }

    async fn save_all(&self, _sessions: &[Session]) -> StorageResult<()> {
        Err(StorageError::new(StorageErrorKind::FileWrite("disk full".into())))
    }
}

#[tokio::test]
async fn test_failed_save_rolls_back_append() -> anyhow::Result<()> {
    let mut store = SessionStore::open(Arc::new(BrokenHistory)).await?;
    let session = Session::new(inputs(), Default::default(), None);

    let err = store.append(session).await.unwrap_err();

    assert!(matches!(err.kind, StorageErrorKind::FileWrite(_)));
    assert!(store.is_empty());
    Ok(())
}
