//! History command handlers.

use super::AppContext;
use super::commands::{HistoryCommands, OutputFormat};
use super::render::{print_json, print_session};
use scenecraft::{
    GenerationError, GenerationErrorKind, GenerationResult, ScenecraftResult, SessionId,
    StorageError, StorageErrorKind,
};
use std::path::Path;

/// Parse a session id given on the command line.
///
/// A malformed id is a validation error; only a well-formed id can be
/// reported as not found.
pub fn parse_id(raw: &str) -> GenerationResult<SessionId> {
    raw.parse()
        .map_err(|e| GenerationError::new(GenerationErrorKind::Validation(e)))
}

/// Handle history commands.
pub async fn handle_history_command(
    ctx: &AppContext,
    cmd: HistoryCommands,
) -> ScenecraftResult<()> {
    match cmd {
        HistoryCommands::List { format } => list_sessions(ctx, format).await,
        HistoryCommands::Show {
            id,
            image_out,
            format,
        } => show_session(ctx, &id, image_out.as_deref(), format).await,
        HistoryCommands::Delete { id } => delete_session(ctx, &id).await,
    }
}

async fn list_sessions(ctx: &AppContext, format: OutputFormat) -> ScenecraftResult<()> {
    let workspace = ctx.workspace().await?;
    let sessions = workspace.history().sessions();

    match format {
        OutputFormat::Json => print_json(&sessions)?,
        OutputFormat::Human => {
            if sessions.is_empty() {
                println!("No saved sessions.");
                return Ok(());
            }
            println!("{:<38} {:<20} Title", "ID", "Created");
            println!("{:-<100}", "");
            for session in sessions {
                println!(
                    "{:<38} {:<20} {}",
                    session.id().to_string(),
                    session.created_at().format("%Y-%m-%d %H:%M").to_string(),
                    session.title()
                );
            }
            println!("Total: {} sessions", sessions.len());
        }
    }
    Ok(())
}

async fn show_session(
    ctx: &AppContext,
    raw_id: &str,
    image_out: Option<&Path>,
    format: OutputFormat,
) -> ScenecraftResult<()> {
    let id = parse_id(raw_id)?;
    let mut workspace = ctx.workspace().await?;
    workspace.select(&id)?;

    let session = workspace
        .history()
        .get(&id)
        .ok_or_else(|| StorageError::new(StorageErrorKind::SessionNotFound(id.to_string())))?;
    print_session(session, format)?;

    if let Some(path) = image_out {
        match session.image() {
            Some(image) => {
                tokio::fs::write(path, image.data()).await.map_err(|e| {
                    StorageError::new(StorageErrorKind::FileWrite(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                })?;
                println!("Image written to {}", path.display());
            }
            None => eprintln!("Session {} has no concept image", id),
        }
    }
    Ok(())
}

async fn delete_session(ctx: &AppContext, raw_id: &str) -> ScenecraftResult<()> {
    let id = parse_id(raw_id)?;
    let mut workspace = ctx.workspace().await?;
    let removed = workspace.delete(&id).await?;
    println!("Deleted session {} ({})", removed.id(), removed.title());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_id_is_validation_error() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::Validation(ref m) if m.contains("not-a-uuid")));
    }

    #[test]
    fn test_well_formed_id_parses() {
        let id = SessionId::new();
        assert_eq!(parse_id(&format!("  {}  ", id)).unwrap(), id);
    }
}
