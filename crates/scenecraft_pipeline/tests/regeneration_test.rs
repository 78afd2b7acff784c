//! RegenerationOrchestrator and working-copy merge behavior.

mod test_utils;

use scenecraft_core::{Script, SeoField, SeoPatch};
use scenecraft_error::{EngineErrorKind, GenerationErrorKind};
use scenecraft_pipeline::{RegenerationOrchestrator, SchemaContract, ScriptOrchestrator, Workspace};
use std::time::Duration;
use test_utils::{MockImageEngine, MockResponse, MockTextEngine, gateway, history, inputs, script_json};

fn script() -> Script {
    SchemaContract::parse_script(&script_json(4)).expect("fixture script")
}

#[tokio::test]
async fn test_tags_patch_replaces_only_tags() -> anyhow::Result<()> {
    let text = MockTextEngine::new_success(r#"{"tags": ["sling", "shepherd"]}"#);
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));
    let before = script();

    let patch = orchestrator
        .regenerate(SeoField::Tags, &before, "David and Goliath", "focus on the sling")
        .await?;
    let after = before.with_seo_patch(patch);

    assert_eq!(after.seo.tags, vec!["sling", "shepherd"]);
    assert_eq!(after.seo.titles, before.seo.titles);
    assert_eq!(after.seo.description, before.seo.description);
    assert_eq!(after.seo.thumbnail_prompts, before.seo.thumbnail_prompts);
    assert_eq!(after.scenes, before.scenes);
    assert_eq!(after.characters, before.characters);
    assert_eq!(
        serde_json::to_string(&after.scenes)?,
        serde_json::to_string(&before.scenes)?
    );
    Ok(())
}

#[tokio::test]
async fn test_prompt_carries_only_a_context_excerpt() -> anyhow::Result<()> {
    let text = MockTextEngine::new_success(r#"{"description": "Fresh copy."}"#);
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));

    orchestrator
        .regenerate(SeoField::Description, &script(), "", "shorter please")
        .await?;

    let request = &text.requests()[0];
    assert!(request.user_query().contains("Scene 3"));
    assert!(!request.user_query().contains("Scene 4"));
    assert_eq!(request.schema()["required"][0], "description");
    Ok(())
}

#[tokio::test]
async fn test_blank_instructions_make_no_call() {
    let text = MockTextEngine::new_success(r#"{"tags": ["x"]}"#);
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));

    let err = orchestrator
        .regenerate(SeoField::Tags, &script(), "idea", "   ")
        .await
        .unwrap_err();

    assert!(matches!(err.kind, GenerationErrorKind::Validation(_)));
    assert_eq!(text.call_count(), 0);
}

#[tokio::test]
async fn test_same_field_is_busy_while_in_flight() {
    let text = MockTextEngine::new_success(r#"{"tags": ["x"]}"#).with_latency(Duration::from_millis(20));
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));
    let script = script();

    let (first, second) = tokio::join!(
        orchestrator.regenerate(SeoField::Tags, &script, "idea", "one"),
        orchestrator.regenerate(SeoField::Tags, &script, "idea", "two"),
    );

    assert!(first.is_ok());
    assert_eq!(
        second.unwrap_err().kind,
        GenerationErrorKind::FieldBusy("tags".into())
    );
    assert_eq!(text.call_count(), 1);
    assert!(!orchestrator.is_in_flight(SeoField::Tags));
}

#[tokio::test]
async fn test_different_fields_run_concurrently() {
    let text = MockTextEngine::new_sequence(vec![
        MockResponse::Success(r#"{"tags": ["x"]}"#.into()),
        MockResponse::Success(r#"{"description": "New"}"#.into()),
    ])
    .with_latency(Duration::from_millis(20));
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));
    let script = script();

    let (tags, description) = tokio::join!(
        orchestrator.regenerate(SeoField::Tags, &script, "idea", "one"),
        orchestrator.regenerate(SeoField::Description, &script, "idea", "two"),
    );

    assert_eq!(tags.unwrap(), SeoPatch::Tags(vec!["x".into()]));
    assert_eq!(description.unwrap(), SeoPatch::Description("New".into()));
}

#[tokio::test]
async fn test_failure_clears_flag_for_retry() {
    let text = MockTextEngine::new_sequence(vec![
        MockResponse::Error(EngineErrorKind::Transport("connection reset".into())),
        MockResponse::Success(r#"{"tags": ["retry"]}"#.into()),
    ]);
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));
    let script = script();

    assert!(
        orchestrator
            .regenerate(SeoField::Tags, &script, "idea", "go")
            .await
            .is_err()
    );
    assert!(!orchestrator.is_in_flight(SeoField::Tags));

    let patch = orchestrator
        .regenerate(SeoField::Tags, &script, "idea", "go")
        .await
        .unwrap();
    assert_eq!(patch, SeoPatch::Tags(vec!["retry".into()]));
}

#[tokio::test]
async fn test_wrong_title_count_is_contract_violation() {
    let text = MockTextEngine::new_success(r#"{"titles": ["only", "two"]}"#);
    let image = MockImageEngine::new_success();
    let orchestrator = RegenerationOrchestrator::new(gateway(&text, &image));

    let err = orchestrator
        .regenerate(SeoField::Titles, &script(), "idea", "punchier")
        .await
        .unwrap_err();

    assert!(matches!(err.kind, GenerationErrorKind::ContractViolation(_)));
}

#[tokio::test]
async fn test_failed_regeneration_leaves_working_script_unchanged() -> anyhow::Result<()> {
    let text = MockTextEngine::new_sequence(vec![
        MockResponse::Success(script_json(2)),
        MockResponse::Success(r#"{"tags": "not a list"}"#.into()),
    ]);
    let image = MockImageEngine::new_success();
    let gateway = gateway(&text, &image);
    let mut workspace = Workspace::open(history()).await?;

    let outcome = ScriptOrchestrator::new(gateway.clone())
        .generate(&inputs())
        .await?;
    workspace.record(inputs(), outcome).await?;
    let before = workspace.working().script().clone();

    let err = workspace
        .regenerate_field(&RegenerationOrchestrator::new(gateway), SeoField::Tags, "more")
        .await
        .unwrap_err();

    assert!(matches!(err.kind, GenerationErrorKind::SchemaViolation(_)));
    assert_eq!(workspace.working().script(), &before);
    Ok(())
}

#[tokio::test]
async fn test_workspace_fields_regenerate_concurrently_from_a_copy() -> anyhow::Result<()> {
    let script_text = MockTextEngine::new_success(script_json(2));
    let image = MockImageEngine::new_success();
    let mut workspace = Workspace::open(history()).await?;
    let outcome = ScriptOrchestrator::new(gateway(&script_text, &image))
        .generate(&inputs())
        .await?;
    workspace.record(inputs(), outcome).await?;

    let seo_text = MockTextEngine::new_sequence(vec![
        MockResponse::Success(r#"{"tags": ["sling"]}"#.into()),
        MockResponse::Success(r#"{"description": "A stone, a giant."}"#.into()),
    ])
    .with_latency(Duration::from_millis(20));
    let orchestrator = RegenerationOrchestrator::new(gateway(&seo_text, &image));
    let (script, idea) = workspace.regeneration_source()?;

    let (tags, description) = tokio::join!(
        orchestrator.regenerate(SeoField::Tags, &script, &idea, "one"),
        orchestrator.regenerate(SeoField::Description, &script, &idea, "two"),
    );
    workspace.apply_patch(tags?);
    let merged = workspace.apply_patch(description?).expect("working script");

    assert_eq!(merged.seo.tags, vec!["sling"]);
    assert_eq!(merged.seo.description, "A stone, a giant.");
    assert_eq!(merged.scenes, script.scenes);
    assert_eq!(seo_text.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_regeneration_source_requires_a_working_script() -> anyhow::Result<()> {
    let workspace = Workspace::open(history()).await?;
    let err = workspace.regeneration_source().unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::Validation(_)));
    Ok(())
}
