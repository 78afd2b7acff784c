//! SEO field regeneration handler.

use super::AppContext;
use super::history::parse_id;
use super::render::print_failure;
use scenecraft::{
    GenerationError, GenerationErrorKind, ScenecraftResult, SeoField, SeoPatch,
};

/// Regenerate one SEO field of a saved session.
///
/// The stored session is never modified; with `save` the edited copy is
/// appended to history as a new session.
pub async fn run_regenerate(
    ctx: &AppContext,
    raw_id: &str,
    raw_field: &str,
    instructions: &str,
    save: bool,
) -> ScenecraftResult<()> {
    let field: SeoField = raw_field
        .parse()
        .map_err(|e| GenerationError::new(GenerationErrorKind::Validation(e)))?;
    let id = parse_id(raw_id)?;

    let orchestrator = ctx.regeneration_orchestrator()?;
    let mut workspace = ctx.workspace().await?;
    workspace.select(&id)?;

    let script = match workspace
        .regenerate_field(&orchestrator, field, instructions)
        .await
    {
        Ok(script) => script,
        Err(e) => {
            print_failure("Regeneration", &e);
            std::process::exit(1);
        }
    };

    println!("New {}:", field);
    match script.seo.value_of(field) {
        SeoPatch::Description(description) => println!("  {}", description),
        SeoPatch::Titles(items) | SeoPatch::ThumbnailPrompts(items) | SeoPatch::Tags(items) => {
            for item in items {
                println!("  - {}", item);
            }
        }
    }

    if save {
        if let Some(new_id) = workspace.snapshot_working_copy().await? {
            println!("Saved as session {}", new_id);
        }
    }
    Ok(())
}
