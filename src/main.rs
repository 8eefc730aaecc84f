//! markscheme CLI
//!
//! Browse the AQA GCSE Business mark scheme: interactively in the
//! terminal, or one query at a time for scripting.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use markscheme::browser::Browser;
use markscheme::catalog::Catalog;
use markscheme::report::{format_listing, format_question, format_units};
use markscheme::tui::{self, App};
use markscheme::types::{OutputFormat, UnitKey};

#[derive(Parser)]
#[command(name = "markscheme")]
#[command(about = "Browse the AQA GCSE Business mark scheme")]
#[command(version)]
struct Cli {
    /// Catalog document to use instead of the built-in booklet
    #[arg(long, global = true, env = "MARKSCHEME_CATALOG")]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive navigator (default)
    Browse {
        /// Open this unit straight away
        #[arg(long)]
        unit: Option<u8>,
    },

    /// List the units in the catalog
    Units {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print a unit's questions, optionally filtered by id or text
    Search {
        /// Unit number
        unit: u8,

        /// Case-insensitive text to look for in question ids and text
        term: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the marking card for one question
    Show {
        /// Unit number
        unit: u8,

        /// Question id, e.g. 1.4 or 3.7ii
        id: String,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the "how marking works" guide
    Guide,
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
    let command = cli.command.unwrap_or(Commands::Browse { unit: None });

    match &command {
        Commands::Browse { .. } => init_file_logging(cli.verbose),
        _ => init_stderr_logging(cli.verbose),
    }

    let result = load_catalog(cli.catalog.as_deref()).and_then(|catalog| match command {
        Commands::Browse { unit } => cmd_browse(catalog, unit),
        Commands::Units { format } => cmd_units(&catalog, format.into()),
        Commands::Search { unit, term, format } => {
            cmd_search(&catalog, unit, term.as_deref().unwrap_or(""), format.into())
        }
        Commands::Show { unit, id, format } => cmd_show(&catalog, unit, &id, format.into()),
        Commands::Guide => cmd_guide(&catalog),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Default filter for a `-v` count.
fn level_for(verbose: u8, quiet: &'static str) -> &'static str {
    match verbose {
        0 => quiet,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log to stderr; RUST_LOG overrides the verbosity flag.
fn init_stderr_logging(verbose: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level_for(verbose, "warn")),
    )
    .init();
}

/// The TUI owns the terminal, so log to a file in the cache directory.
fn init_file_logging(verbose: u8) {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("markscheme")) else {
        return;
    };

    let file = fs::create_dir_all(&dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(dir.join("markscheme.log"))
    });

    match file {
        Ok(file) => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level_for(verbose, "info")),
            )
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        }
        Err(e) => {
            eprintln!("Note: logging disabled ({}: {})", dir.display(), e);
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Load the catalog from `path`, or the embedded booklet.
fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    let catalog = match path {
        Some(p) => Catalog::load(p).map_err(|e| e.to_string())?,
        None => Catalog::builtin().map_err(|e| e.to_string())?,
    };

    log::info!(
        "loaded catalog from {} ({} units)",
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in booklet".to_string()),
        catalog.len()
    );

    Ok(catalog)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_browse(catalog: Catalog, unit: Option<u8>) -> Result<(), String> {
    let browser = match unit {
        Some(n) => Browser::Home
            .select_unit(&catalog, UnitKey(n))
            .map_err(|e| e.to_string())?,
        None => Browser::Home,
    };

    tui::run(App::with_browser(catalog, browser)).map_err(|e| e.to_string())
}

fn cmd_units(catalog: &Catalog, format: OutputFormat) -> Result<(), String> {
    print!("{}", format_units(catalog, format));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn cmd_search(catalog: &Catalog, unit: u8, term: &str, format: OutputFormat) -> Result<(), String> {
    let browser = Browser::Home
        .select_unit(catalog, UnitKey(unit))
        .map_err(|e| e.to_string())?
        .set_search_term(term);

    let listing = browser.listing(catalog);
    log::debug!("unit {} search {:?}: {} questions", unit, term, listing.len());

    print!("{}", format_listing(&listing, format));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn cmd_show(catalog: &Catalog, unit: u8, id: &str, format: OutputFormat) -> Result<(), String> {
    let question = catalog
        .question(UnitKey(unit), id)
        .map_err(|e| e.to_string())?;

    print!("{}", format_question(question, format));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn cmd_guide(catalog: &Catalog) -> Result<(), String> {
    if catalog.introduction().is_empty() {
        return Err("this catalog has no marking guide".to_string());
    }
    println!("{}", catalog.introduction());
    Ok(())
}
