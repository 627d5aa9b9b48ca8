//! The convert command
//!
//! Layers configuration, opens the template and drives the conversion.

use std::path::{Path, PathBuf};

use colored::Colorize;

use convert_core::{
    ConvertConfig, ConvertOptions, ConvertStatus, Converter, DirectoryTemplate, WriterSink,
};
use convert_fs::NormalizedPath;
use convert_meta::JsonMetadataProvider;

use crate::bundle::BundleRefresher;
use crate::error::{CliError, Result};
use crate::interactive::TerminalPrompt;

/// Options gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub noop: bool,
    pub force: bool,
    pub template_url: Option<String>,
    pub config: Option<PathBuf>,
    pub skip_lock_refresh: bool,
}

/// Resolve the effective configuration: config file, then flags.
pub fn resolve_config(args: &ConvertArgs) -> Result<ConvertConfig> {
    let file_config = match &args.config {
        Some(path) => ConvertConfig::load(&NormalizedPath::new(path))?,
        None => ConvertConfig::load_user()?,
    };
    Ok(file_config.overlay(ConvertConfig {
        template_url: args.template_url.clone(),
        ..ConvertConfig::default()
    }))
}

/// Run the convert command for the module at `path`.
pub fn run_convert(path: &Path, args: &ConvertArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let template_url = config.template_url.clone().ok_or_else(|| {
        CliError::user(
            "No template configured. Pass --template-url or set template-url in the config file.",
        )
    })?;

    let options = ConvertOptions {
        noop: args.noop,
        force: args.force,
        metadata: config.metadata_options(path),
    };
    let template = DirectoryTemplate::open(&template_url)?.with_module(&options.metadata);

    println!(
        "{} Converting {} using {}",
        "=>".blue().bold(),
        options.metadata.module_name.cyan(),
        template_url.cyan()
    );

    let provider = JsonMetadataProvider::new();
    let mut converter = Converter::new(path, options, &provider);
    if !args.skip_lock_refresh {
        converter = converter.with_refresher(BundleRefresher::new());
    }

    let mut sink = WriterSink::stdout();
    let outcome = converter.run(&template, &TerminalPrompt, &mut sink)?;

    match outcome.status {
        ConvertStatus::NoChanges => {}
        ConvertStatus::DryRun => {
            println!("{} Dry run, no files were changed.", "OK".green().bold());
        }
        ConvertStatus::Declined => {
            println!("{} Conversion cancelled.", "=>".yellow().bold());
        }
        ConvertStatus::Applied(report) => {
            println!(
                "{} Module converted ({} files written or removed).",
                "OK".green().bold(),
                report.applied().len()
            );
        }
    }
    Ok(())
}
