//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scenecraft - scene-by-scene video scripts, SEO copy and concept art from a story premise
#[derive(Parser, Debug)]
#[command(name = "scenecraft")]
#[command(about = "Scene-by-scene video scripts, SEO copy and concept art from a story premise", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the saved engine API key
    #[command(subcommand)]
    Key(KeyCommands),

    /// Generate a script and concept image from a story idea
    Generate(GenerateArgs),

    /// Browse and manage saved sessions
    #[command(subcommand)]
    History(HistoryCommands),

    /// Regenerate one SEO field of a saved session
    Regenerate {
        /// Session id
        id: String,

        /// Field to regenerate (titles, description, thumbnail-prompts, tags)
        #[arg(long)]
        field: String,

        /// New guidance for the field
        #[arg(long)]
        instructions: String,

        /// Save the edited script as a new session
        #[arg(long)]
        save: bool,
    },

    /// List the available visual styles
    Styles,
}

/// API key subcommands
#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Save an API key
    Set {
        /// The key value
        key: String,
    },

    /// Remove the saved API key
    Clear,

    /// Show whether a key is saved
    Status,
}

/// Arguments for a generation run
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Story premise
    #[arg(long)]
    pub idea: String,

    /// Project name, used as the session title
    #[arg(long, default_value = "")]
    pub project_name: String,

    /// Visual style (see `scenecraft styles`)
    #[arg(long, default_value = "cinematic")]
    pub style: String,

    /// Length: short, medium, long or video
    #[arg(long, default_value = "short")]
    pub length: String,

    /// Duration in minutes, required with `--length video`
    #[arg(long)]
    pub minutes: Option<u32>,

    /// Theme overlay, e.g. "biblical" or "fairy-tale"
    #[arg(long)]
    pub theme: Option<String>,

    /// Guidance for the title candidates
    #[arg(long, default_value = "")]
    pub title_instruction: String,

    /// Guidance for the description
    #[arg(long, default_value = "")]
    pub description_instruction: String,

    /// Guidance for the thumbnail prompts
    #[arg(long, default_value = "")]
    pub thumbnail_instruction: String,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List saved sessions, most recent first
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Show one saved session
    Show {
        /// Session id
        id: String,

        /// Write the concept image to this path
        #[arg(long)]
        image_out: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Delete a saved session
    Delete {
        /// Session id
        id: String,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
