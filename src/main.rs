use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use md_image_localizer::console::{
    ConsoleObserver, confirm, render_banner, render_summary, wait_for_enter,
};
use md_image_localizer::{Localizer, LocalizerConfig};

/// Copy editor-cached images referenced from Markdown into a local image folder.
#[derive(Debug, Parser)]
#[command(name = "md-image-localizer", version, about)]
struct Cli {
    /// Directory to scan recursively for Markdown files.
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// JSON configuration file (defaults to ROOT/md-image-localizer.json when present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Name of the image folder created at the root.
    #[arg(long, value_name = "NAME")]
    image_dir: Option<String>,

    /// Additional path fragment identifying an external image cache.
    #[arg(long = "marker", value_name = "TEXT")]
    markers: Vec<String>,

    /// Start without asking for confirmation.
    #[arg(short, long)]
    yes: bool,

    /// Exit without waiting for Enter after the summary.
    #[arg(long)]
    no_wait: bool,

    /// Print the run report as JSON instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\nerror: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let config = load_config(cli, &root)?;
    debug!(?config, root = %root.display(), "resolved configuration");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    write!(stdout, "{}", render_banner(&root))?;
    if !cli.yes && !confirm(&mut input, &mut stdout, "\nstart processing?")? {
        writeln!(stdout, "cancelled")?;
        return Ok(());
    }
    writeln!(stdout, "\nprocessing...\n")?;

    let localizer = Localizer::new(&root, config);
    let mut observer = ConsoleObserver::new(io::stdout());
    let report = localizer
        .run(&mut observer)
        .with_context(|| format!("failed to process {}", root.display()))?;

    if cli.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(
            stdout,
            "{}",
            render_summary(&report, &localizer.config().backup_extension)
        )?;
    }

    if !cli.no_wait {
        wait_for_enter(&mut input, &mut stdout)?;
    }
    Ok(())
}

fn load_config(cli: &Cli, root: &std::path::Path) -> Result<LocalizerConfig> {
    let mut config = match &cli.config {
        Some(path) => LocalizerConfig::from_path(path)?,
        None => LocalizerConfig::discover(root),
    };
    if let Some(name) = &cli.image_dir {
        config.image_dir_name = name.clone();
    }
    for marker in &cli.markers {
        config.add_marker(marker);
    }
    Ok(config)
}
