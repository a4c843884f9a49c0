//! Command-line interface for regionfonts.
//!
//! Every command reads the same config and settings file the host uses, so
//! the CLI doubles as a way to inspect and script font assignments.

use crate::form::form_entries;
use crate::module::FontsModule;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use regionfonts_config::{Config, FontRule, LogLevel, SettingsStore, SettingsWatcher};
use regionfonts_styles::StyleDocument;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// regionfonts - apply web fonts to named UI regions
#[derive(Debug, Parser)]
#[command(name = "regionfonts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/regionfonts/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the stored font settings
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// List the default regions with their current rule
    Regions,
    /// Replace the rule for one selector
    Set {
        /// Style selector of the region, e.g. ".window-title"
        selector: String,

        /// Font family name; omit to keep the current one
        #[arg(long)]
        font: Option<String>,

        /// Generic fallback family; omit to keep the current one
        #[arg(long)]
        fallback: Option<String>,

        /// Store the rule disabled
        #[arg(long)]
        disable: bool,
    },
    /// Apply the settings and print the resulting <head> fragment
    Apply {
        /// Write the fragment to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Apply, then re-apply whenever the settings file changes
    Watch {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Load the config named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load(),
    }
}

/// Run the parsed command against `config`.
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let store = config.settings_store();
    match cli.command {
        Commands::Show { format } => {
            let settings = store.get();
            let text = match format {
                OutputFormat::Yaml => serde_yaml_ng::to_string(&settings)?,
                OutputFormat::Json => serde_json::to_string_pretty(&settings)? + "\n",
            };
            print!("{text}");
        }
        Commands::Regions => {
            for entry in form_entries(&store.get()) {
                let state = if entry.rule.contributes() { "on " } else { "off" };
                let font = if entry.rule.font.is_empty() {
                    "-"
                } else {
                    entry.rule.font.as_str()
                };
                println!(
                    "[{state}] {:<16} {:<32} {} / {}",
                    entry.label,
                    entry.selector,
                    font,
                    entry.rule.effective_fallback()
                );
            }
        }
        Commands::Set {
            selector,
            font,
            fallback,
            disable,
        } => {
            let mut settings = store.get();
            let current = settings.get(&selector).cloned().unwrap_or_default();
            let rule = FontRule {
                enabled: !disable,
                font: font.map(|f| f.trim().to_string()).unwrap_or(current.font),
                ..current
            };
            let rule = match fallback {
                Some(fallback) => rule.with_fallback(fallback),
                None => rule,
            };
            settings.insert(selector.as_str(), rule);
            store
                .set(settings)
                .with_context(|| format!("Failed to save {}", store.path().display()))?;
            log::info!("Updated font rule for {}", selector);
        }
        Commands::Apply { output } => {
            let mut module = FontsModule::new(config, store, document_for(config));
            module.init();
            write_head(module.sink(), output.as_ref())?;
        }
        Commands::Watch { output } => watch(config, output)?,
    }
    Ok(())
}

/// Line `main` prints to stderr when a command fails, context chain included.
pub fn error_line(error: &anyhow::Error) -> String {
    format!("regionfonts: error: {error:#}")
}

fn document_for(config: &Config) -> StyleDocument {
    StyleDocument::for_endpoint(&config.font_endpoint)
}

fn write_head(document: &StyleDocument, output: Option<&PathBuf>) -> Result<()> {
    let html = document.render_head();
    match output {
        Some(path) => fs::write(path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{html}"),
    }
    Ok(())
}

fn watch(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let store = config.settings_store();
    if !store.path().exists() {
        // The watcher needs a file to attach to.
        store.set(store.get())?;
    }
    let watcher = SettingsWatcher::new(store.path(), config.watch_debounce_ms)?;
    let mut module = FontsModule::new(config, store, document_for(config));
    module.init();
    write_head(module.sink(), output.as_ref())?;

    loop {
        let Some(event) = watcher.recv_timeout(Duration::from_secs(1)) else {
            continue;
        };
        log::debug!("Reapplying after change to {}", event.path.display());
        // The file was written by someone else; re-persisting it would
        // trigger another event, so only the reaction half of a submit runs.
        if module.reload_on_change() {
            module.replace_sink(document_for(config));
            module.init();
        } else {
            module.apply();
        }
        write_head(module.sink(), output.as_ref())?;
    }
}
