mod calc;
mod cmd;
mod data;
mod render;
mod ui;

use calc::ViewMode;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use data::{AppSettings, Persistable};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

const DEFAULT_LOG_LEVEL: &str = "info";
const TUI_LOG_FILE: &str = "kalender.log";

#[derive(Parser)]
#[command(name = "kalender", about = "Kalender Indonesia dengan hari libur nasional")]
struct Cli {
    /// Directory holding settings.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewArg {
    /// Bulan ini
    Current,
    /// Bulan tertentu (see --month)
    Month,
    /// Seluruh tahun
    Year,
}

impl From<ViewArg> for ViewMode {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Current => ViewMode::CurrentMonth,
            ViewArg::Month => ViewMode::SpecificMonth,
            ViewArg::Year => ViewMode::FullYear,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings.yaml into the config directory
    Init,
    /// Render the calendar page as HTML
    Html {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long, value_enum, default_value = "current")]
        view: ViewArg,
        /// Month 1-12 for --view month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List national holidays of a year
    Holidays {
        #[arg(short, long)]
        year: Option<i32>,
        /// Only holidays in this month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let is_tui = cli.command.is_none();
    // Dropping the handle would stop file logging.
    let _logger = init_logging(cli.log_file.as_deref(), &cli.config_dir, is_tui)?;

    dispatch(cli)
}

/// Settings are loaded per command so `init` still works next to a broken
/// settings.yaml.
fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let this_year = Local::now().year();
    let Some(command) = cli.command else {
        return cmd::root::run(&AppSettings::load_from(&cli.config_dir)?);
    };

    match command {
        Commands::Init => cmd::init::run(&cli.config_dir),
        Commands::Html {
            year,
            view,
            month,
            out,
        } => cmd::html::run(
            &AppSettings::load_from(&cli.config_dir)?,
            year.unwrap_or(this_year),
            view.into(),
            month,
            out.as_deref(),
        ),
        Commands::Holidays { year, month } => cmd::holidays::run(
            &AppSettings::load_from(&cli.config_dir)?,
            year.unwrap_or(this_year),
            month,
        ),
    }
}

/// The TUI owns the terminal, so it always logs to a file.
fn init_logging(
    log_file: Option<&Path>,
    config_dir: &Path,
    is_tui: bool,
) -> anyhow::Result<LoggerHandle> {
    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    let target = match log_file {
        Some(path) => Some(path.to_path_buf()),
        None if is_tui => {
            std::fs::create_dir_all(config_dir)?;
            Some(config_dir.join(TUI_LOG_FILE))
        }
        None => None,
    };
    if let Some(path) = target {
        logger = logger.log_to_file(FileSpec::try_from(path)?);
    }
    Ok(logger.start()?)
}
