// ABOUTME: CLI argument parsing and command routing for scopewise
//
// Provides command-line interface for:
// - Filling in the questionnaire (tui, default)
// - Inspecting drafts (status, validate, show)
// - Producing the questionnaire document (export)
// - Discarding drafts (reset)

pub mod export;
pub mod reset;
pub mod show;
pub mod status;
pub mod util;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Penetration test scoping questionnaire
#[derive(Parser)]
#[command(name = "scopewise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the wizard (default if no command given)
    Tui(TuiArgs),

    /// Show which steps have a saved draft and whether they validate
    Status,

    /// Print validation errors for stored drafts
    Validate(ValidateArgs),

    /// Print the stored JSON draft of a step
    Show(ShowArgs),

    /// Write the questionnaire document without opening the wizard
    Export(ExportArgs),

    /// Delete every stored draft
    Reset(ResetArgs),
}

/// Arguments for the tui command
#[derive(clap::Args, Default)]
pub struct TuiArgs {
    /// Open directly at a step (route, name or number), bypassing navigation gating
    #[arg(long)]
    pub step: Option<String>,
}

/// Arguments for the validate command
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Only validate this step (route, name or number)
    #[arg(long)]
    pub step: Option<String>,
}

/// Arguments for the show command
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Step to print (route, name or number)
    pub step: String,
}

/// Arguments for the export command
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Directory to write the document into (defaults to the configured export directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the reset command
#[derive(clap::Args)]
pub struct ResetArgs {
    /// Delete without confirmation
    #[arg(long, short)]
    pub force: bool,
}
