//! plist-diff: watch or compare trees of property-list files
//!
//! Decodes every `.plist` file (binary or XML) and reports structural
//! differences as path-addressed `-`/`+` lines.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plist_diff::{
    cli::{self, exit_codes},
    config::{self, AppConfig, ConfigOverrides, LiveMode, Validatable},
    reports::ReportFormat,
};
use std::io::Write as _;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DESCRIPTION: &str = "\
plist-diff watches a directory tree and reports changes to stdout every 2 seconds.

It will also compare two directory trees with each other if you give it a second directory tree.

On a mac, you can watch for changes to preferences with:

    plist-diff ~/Library/Preferences";

#[derive(Parser)]
#[command(name = "plist-diff")]
#[command(version, about = "Watch or compare trees of plist files", long_about = DESCRIPTION)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
#[command(after_help = "EXIT CODES:
    0  Trees are equal, or differences found without --fail-on-change
    1  Differences found with --fail-on-change, or an error occurred

EXAMPLES:
    # Watch preferences while toggling a setting
    plist-diff ~/Library/Preferences

    # Compare two saved copies
    plist-diff prefs-before/ prefs-after/ --timestamps

    # Machine-readable comparison of two single files
    plist-diff old.plist new.plist -o json")]
struct Cli {
    /// Directory tree (or file) to watch for changes
    #[arg(value_name = "WATCHTREE", required = true)]
    watchtree: Option<PathBuf>,

    /// Directory tree (or file) to compare instead of watching the first tree for changes
    #[arg(value_name = "OTHERTREE")]
    othertree: Option<PathBuf>,

    /// Include timestamp data in diffs. Timestamps are ignored by default
    #[arg(long)]
    timestamps: bool,

    /// Return an error when a file cannot be opened due to insufficient
    /// permissions. These errors are ignored by default
    #[arg(long, alias = "permissions-errors")]
    permission_errors: bool,

    /// Ignore map entries with this key at any depth (repeatable)
    #[arg(long = "ignore-key", value_name = "KEY")]
    ignore_keys: Vec<String>,

    /// Time between watch ticks, e.g. 500ms, 2s, 1m
    #[arg(long, value_name = "DURATION")]
    interval: Option<String>,

    /// Stop watching after this many ticks
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Append watch reports instead of redrawing them in place
    #[arg(long)]
    no_live: bool,

    /// Exit with code 1 if a comparison finds differences
    #[arg(long)]
    fail_on_change: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Write an example config file to ~/.config/plist-diff/
    Init {
        /// Write here instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Settings given on the command line, to be layered over the config file.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            include_timestamps: self.timestamps.then_some(true),
            ignore_keys: self.ignore_keys.clone(),
            permission_errors: self.permission_errors.then_some(true),
            interval: self.interval.clone(),
            max_ticks: self.ticks,
            format: self.output,
            live: self.no_live.then_some(LiveMode::Never),
            fail_on_change: self.fail_on_change.then_some(true),
            quiet: self.quiet.then_some(true),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries the reports
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Some(Commands::Config { action }) = &cli.command {
        return run_config(action, &cli);
    }

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &cli.overrides());
    if let Some(path) = &loaded_from {
        tracing::debug!("loaded config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }

    let watchtree = cli
        .watchtree
        .as_deref()
        .context("missing WATCHTREE argument")?;

    match cli.othertree.as_deref() {
        Some(othertree) => {
            let mut stdout = std::io::stdout().lock();
            let exit_code = cli::run_diff(&config, watchtree, othertree, &mut stdout)?;
            stdout.flush()?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        None => {
            cli::run_watch(&config, watchtree)?;
        }
    }
    Ok(())
}

fn run_config(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("plist-diff").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in [
                ".plist-diff.yaml",
                ".plist-diff.yml",
                "plist-diff.yaml",
                "plist-diff.yml",
            ] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init { output } => {
            let target = match output {
                Some(path) => path.clone(),
                None => config::default_config_path()
                    .context("cannot determine the user config directory")?,
            };
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Schema { output } => {
            let schema = config::generate_json_schema().context("failed to render schema")?;
            match output {
                Some(path) => std::fs::write(path, schema)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{schema}"),
            }
        }
    }
    Ok(())
}
