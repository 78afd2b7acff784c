//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the scenecraft binary.

mod commands;
mod context;
mod generate;
mod history;
mod key;
mod regenerate;
mod render;

pub use commands::{Cli, Commands};
pub use context::AppContext;
pub use generate::run_generate;
pub use history::handle_history_command;
pub use key::handle_key_command;
pub use regenerate::run_regenerate;
pub use render::list_styles;
