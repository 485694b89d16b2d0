use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "locdiff")]
#[command(about = "locdiff - Regional content diff for localized HTML pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, defaults to 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective log filter; an explicit level wins over `--verbose`
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

/// Output format of `diff`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// The merged HTML document
    #[default]
    Html,
    /// Summary counts and the merged `<main>` as JSON
    Json,
}

/// Output format of `blocks`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BlocksFormat {
    /// One line per block
    #[default]
    Plain,
    /// JSON array
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diff an original page against its regional edit and print the merged document
    Diff {
        /// Original (language store) HTML file
        original: PathBuf,

        /// Regionally edited HTML file
        modified: PathBuf,

        /// Current site; equivalent-site links are rewritten to it
        #[arg(short, long)]
        site: String,

        /// Comma-separated hostnames whose sites count as equivalent
        #[arg(long, value_delimiter = ',')]
        hostnames: Vec<String>,

        /// JSON config sheet providing `source.fragment.hostnames`
        #[arg(long)]
        config_sheet: Option<PathBuf>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: DiffFormat,
    },

    /// Strip diff markers from a merged document, keeping the edited content
    Clean {
        /// Merged HTML file
        file: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the blocks extracted from a page with their content hashes
    Blocks {
        /// HTML file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: BlocksFormat,
    },
}
