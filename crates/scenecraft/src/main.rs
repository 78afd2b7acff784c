//! Scenecraft CLI binary.
//!
//! This binary provides command-line access to Scenecraft's functionality:
//! - Manage the engine API key
//! - Generate scripts and concept images from a story idea
//! - Browse, inspect and delete saved sessions
//! - Regenerate single SEO fields

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        AppContext, Cli, Commands, handle_history_command, handle_key_command, list_styles,
        run_generate, run_regenerate,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    scenecraft::init_logging(if cli.verbose { "debug" } else { "info" })?;

    if let Commands::Styles = cli.command {
        list_styles();
        return Ok(());
    }

    let ctx = AppContext::load(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Key(key_cmd) => {
            handle_key_command(&ctx, key_cmd).await?;
        }

        Commands::Generate(args) => {
            run_generate(&ctx, args).await?;
        }

        Commands::History(history_cmd) => {
            handle_history_command(&ctx, history_cmd).await?;
        }

        Commands::Regenerate {
            id,
            field,
            instructions,
            save,
        } => {
            run_regenerate(&ctx, &id, &field, &instructions, save).await?;
        }

        Commands::Styles => {}
    }

    Ok(())
}
