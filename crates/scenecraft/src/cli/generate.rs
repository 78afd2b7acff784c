//! Generation command handler.

use super::AppContext;
use super::commands::{GenerateArgs, OutputFormat};
use super::render::{print_failure, print_session};
use scenecraft::{
    GenerationError, GenerationErrorKind, LengthMode, ScenecraftResult, SeoInstructions,
    StoryInputs, Theme, VisualStyle,
};

fn invalid(message: String) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Validation(message))
}

/// Turn command-line arguments into story inputs.
fn story_inputs(args: GenerateArgs) -> ScenecraftResult<StoryInputs> {
    let style: VisualStyle = args.style.parse().map_err(invalid)?;
    let length = LengthMode::from_label(&args.length, args.minutes).map_err(invalid)?;
    let theme = args
        .theme
        .as_deref()
        .filter(|label| !label.trim().is_empty())
        .map(Theme::from_label);

    Ok(StoryInputs::builder()
        .project_name(args.project_name)
        .story_idea(args.idea)
        .visual_style(style)
        .length(length)
        .theme(theme)
        .instructions(SeoInstructions {
            title: args.title_instruction,
            description: args.description_instruction,
            thumbnail: args.thumbnail_instruction,
        })
        .build()?)
}

/// Generate a script and concept image, then record the session.
pub async fn run_generate(ctx: &AppContext, args: GenerateArgs) -> ScenecraftResult<()> {
    let format = args.format;
    let inputs = story_inputs(args)?;
    let orchestrator = ctx.script_orchestrator()?;
    let mut workspace = ctx.workspace().await?;

    tracing::info!(style = %inputs.visual_style(), length = %inputs.length(), "Generating");
    let outcome = orchestrator.generate(&inputs).await?;
    let report = workspace.record(inputs, outcome).await?;

    if let Some(err) = report.image_error() {
        print_failure("Image generation", err);
    }
    if let Some(err) = report.script_error() {
        print_failure("Script generation", err);
        std::process::exit(1);
    }

    if let Some(session) = report
        .session_id()
        .and_then(|id| workspace.history().get(&id))
    {
        print_session(session, format)?;
        if let OutputFormat::Human = format {
            println!();
            println!("Saved session {}", session.id());
        }
    }
    Ok(())
}
