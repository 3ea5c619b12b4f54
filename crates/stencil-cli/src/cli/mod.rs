//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Template-driven project scaffolding",
    long_about = "Stencil renders a template directory tree — paths and file \
                  contents carrying {{ token }} markers — into a concrete \
                  project, substituting user-supplied parameters.",
    after_help = "EXAMPLES:\n\
        \x20 stencil new ./templates/app my-app --param bundle_id=com.example.app\n\
        \x20 stencil new app ./out --param name=demo --overwrite\n\
        \x20 stencil inspect ./templates/app\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template into a destination directory.
    #[command(
        visible_alias = "n",
        about = "Render a template into a destination",
        after_help = "EXAMPLES:\n\
            \x20 stencil new ./templates/app my-app --param bundle_id=com.example.app\n\
            \x20 stencil new app ./out -p name=demo -p bundle_id=org.demo.app\n\
            \x20 stencil new ./tpl ./out --dry-run"
    )]
    New(NewArgs),

    /// Show a template's parameters and entries without rendering.
    #[command(
        visible_alias = "i",
        about = "Inspect a template",
        after_help = "EXAMPLES:\n\
            \x20 stencil inspect ./templates/app\n\
            \x20 stencil inspect app --format json"
    )]
    Inspect(InspectArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stencil new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template directory, or a template name resolved against the
    /// configured search path.
    #[arg(value_name = "TEMPLATE", help = "Template directory or name")]
    pub template: PathBuf,

    /// Destination root the rendered tree is written into.
    #[arg(value_name = "DEST", help = "Destination directory")]
    pub destination: PathBuf,

    /// Parameter overrides, repeatable.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        help = "Set a parameter (repeatable)"
    )]
    pub params: Vec<(String, String)>,

    /// Replace existing destination files (destructive).
    #[arg(long = "overwrite", help = "Overwrite existing destination files")]
    pub overwrite: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and render immediately"
    )]
    pub yes: bool,
}

/// Parse one `--param KEY=VALUE` argument.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `stencil inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Template directory, or a template name resolved against the
    /// configured search path.
    #[arg(value_name = "TEMPLATE", help = "Template directory or name")]
    pub template: PathBuf,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: InspectFormat,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InspectFormat {
    /// Human-readable table.
    Table,
    /// JSON object.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
