//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

use crate::commands::ConvertArgs;

/// Convert an existing module to a module template
///
/// Compares the module in the current directory with the template, shows
/// which files would be added or modified, writes the differences to
/// convert_report.txt and applies the changes once confirmed.
#[derive(Parser, Debug)]
#[command(name = "module-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Report what would change without touching the module; wins over --force
    #[arg(long)]
    pub noop: bool,

    /// Apply changes without asking for confirmation
    #[arg(long)]
    pub force: bool,

    /// Template directory (or file:// URL) to convert to
    #[arg(long, env = "MODULE_CONVERT_TEMPLATE_URL")]
    pub template_url: Option<String>,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not run `bundle lock` after the Gemfile changes
    #[arg(long)]
    pub skip_lock_refresh: bool,
}

impl From<Cli> for ConvertArgs {
    fn from(cli: Cli) -> Self {
        Self {
            noop: cli.noop,
            force: cli.force,
            template_url: cli.template_url,
            config: cli.config,
            skip_lock_refresh: cli.skip_lock_refresh,
        }
    }
}
