//! API key command handlers.

use super::AppContext;
use super::commands::KeyCommands;
use scenecraft::ScenecraftResult;

/// Handle API key commands.
pub async fn handle_key_command(ctx: &AppContext, cmd: KeyCommands) -> ScenecraftResult<()> {
    let store = ctx.credentials();
    match cmd {
        KeyCommands::Set { key } => {
            store.set(&key).await?;
            println!("API key saved.");
        }
        KeyCommands::Clear => {
            store.clear().await?;
            println!("API key removed.");
        }
        KeyCommands::Status => {
            if store.is_configured().await? {
                println!("API key: configured");
            } else {
                println!("API key: not configured (run `scenecraft key set <KEY>`)");
            }
        }
    }
    Ok(())
}
