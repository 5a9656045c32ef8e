//! slidedeck CLI
//!
//! Present a JSON slide deck in the terminal, or print its outline.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use slidedeck::loader::load;
use slidedeck::report::format_outline;
use slidedeck::tui;
use slidedeck::types::{DeckSource, OutputFormat, PresentConfig};

#[derive(Parser)]
#[command(name = "slidedeck")]
#[command(about = "Present JSON slide decks in the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck interactively
    Present {
        /// Deck file or http(s) URL (default: content.json)
        source: Option<String>,

        /// Horizontal drag distance in pixels that counts as a swipe
        #[arg(long, default_value_t = 50)]
        swipe_threshold: u32,

        /// Maximum gap between clicks of a double click, in milliseconds
        #[arg(long, default_value_t = 300)]
        double_tap_ms: u64,

        /// Write logs to this file (logging is off otherwise, unless RUST_LOG is set)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the deck outline without presenting it
    Outline {
        /// Deck file or http(s) URL (default: content.json)
        source: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Present {
            source,
            swipe_threshold,
            double_tap_ms,
            log_file,
        } => init_logging(log_file.as_deref(), true).and_then(|()| {
            cmd_present(PresentConfig {
                source: resolve_source(source.as_deref()),
                swipe_threshold_px: swipe_threshold,
                double_tap_window: Duration::from_millis(double_tap_ms),
            })
        }),
        Commands::Outline { source, format } => init_logging(None, false)
            .and_then(|()| cmd_outline(resolve_source(source.as_deref()), format.into())),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Configure env_logger. RUST_LOG always wins over the defaults.
///
/// The presenter owns the terminal, so without a log file its default
/// filter is off.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), String> {
    let default_filter = match (log_file, interactive) {
        (Some(_), _) => "info",
        (None, true) => "off",
        (None, false) => "warn",
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Cannot open log file {}: {}", path.display(), e))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().map_err(|e| e.to_string())
}

fn resolve_source(arg: Option<&str>) -> DeckSource {
    arg.map(DeckSource::parse).unwrap_or_default()
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_present(config: PresentConfig) -> Result<(), String> {
    log::info!("presenting {}", config.source);
    tui::run(config).map_err(|e| e.to_string())
}

fn cmd_outline(source: DeckSource, format: OutputFormat) -> Result<(), String> {
    let result = if source.is_remote() && format == OutputFormat::Human {
        let sp = spinner(&format!("Fetching {}...", source));
        let result = load(&source);
        sp.finish_and_clear();
        result
    } else {
        load(&source)
    };

    let loaded = result.map_err(|e| e.to_string())?;
    print!("{}", format_outline(&loaded, format));
    Ok(())
}
