// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use subalign::app_config::{self, Config};
use subalign::app_controller::Controller;
use subalign::subtitle_processor::SubtitleFormat;

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Sbv,
    Vtt,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Sbv => SubtitleFormat::Sbv,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Realign a revised transcript onto a timed subtitle file (default command)
    Sync(SyncArgs),

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct SyncArgs {
    /// Timed subtitle file (SRT, SBV or VTT)
    #[arg(value_name = "SUBTITLE")]
    subtitle_path: PathBuf,

    /// Revised transcript (plain text, or a subtitle file whose text is used)
    #[arg(value_name = "REVISED")]
    revised_path: PathBuf,

    /// Output file (default: <subtitle stem>.synced.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output subtitle format (default: same as the input)
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Score for two matching words
    #[arg(long, allow_negative_numbers = true)]
    match_score: Option<i32>,

    /// Score for two different words aligned together
    #[arg(long, allow_negative_numbers = true)]
    mismatch_penalty: Option<i32>,

    /// Score for a word aligned against nothing
    #[arg(long, allow_negative_numbers = true)]
    gap_penalty: Option<i32>,
}

/// subalign - realign revised transcripts onto timed subtitles
///
/// Keeps the timing of an existing subtitle track and replaces its wording
/// with a freely edited revision of the same text.
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version)]
#[command(about = "Realign a revised transcript onto timed subtitles")]
#[command(long_about = "subalign keeps the timestamps of a subtitle file and replaces its text with a revised transcript, cue by cue, using word-level local alignment.

EXAMPLES:
    subalign talk.srt talk-edited.txt                 # Write talk.synced.srt
    subalign -f talk.srt talk-edited.txt              # Overwrite an existing output
    subalign -o out.vtt -F vtt talk.srt edited.txt    # Choose output path and format
    subalign --gap-penalty -2 talk.sbv edited.txt     # Tune the alignment scoring
    subalign completions bash > subalign.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Timed subtitle file (SRT, SBV or VTT)
    #[arg(value_name = "SUBTITLE")]
    subtitle_path: Option<PathBuf>,

    /// Revised transcript (plain text, or a subtitle file whose text is used)
    #[arg(value_name = "REVISED")]
    revised_path: Option<PathBuf>,

    /// Output file (default: <subtitle stem>.synced.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output subtitle format (default: same as the input)
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Score for two matching words
    #[arg(long, allow_negative_numbers = true)]
    match_score: Option<i32>,

    /// Score for two different words aligned together
    #[arg(long, allow_negative_numbers = true)]
    mismatch_penalty: Option<i32>,

    /// Score for a word aligned against nothing
    #[arg(long, allow_negative_numbers = true)]
    gap_penalty: Option<i32>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept every level in the logger itself; the max level is adjusted once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subalign", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Sync(args)) => run_sync(args).await,
        None => {
            // Default behavior - use top-level args like the sync subcommand
            let (subtitle_path, revised_path) = match (cli.subtitle_path, cli.revised_path) {
                (Some(subtitle), Some(revised)) => (subtitle, revised),
                _ => {
                    return Err(anyhow!(
                        "SUBTITLE and REVISED are required when no subcommand is specified"
                    ));
                }
            };

            let sync_args = SyncArgs {
                subtitle_path,
                revised_path,
                output: cli.output,
                format: cli.format,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
                match_score: cli.match_score,
                mismatch_penalty: cli.mismatch_penalty,
                gap_penalty: cli.gap_penalty,
            };
            run_sync(sync_args).await
        }
    }
}

async fn run_sync(options: SyncArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    controller
        .run(
            options.subtitle_path.clone(),
            options.revised_path.clone(),
            options.output.clone(),
            options.force_overwrite,
        )
        .await?;

    Ok(())
}

/// Load or create the configuration file and apply command line overrides
fn load_config(options: &SyncArgs) -> Result<Config> {
    let config_path = &options.config_path;

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(match_score) = options.match_score {
        config.scoring.match_score = match_score;
    }

    if let Some(mismatch_penalty) = options.mismatch_penalty {
        config.scoring.mismatch_penalty = mismatch_penalty;
    }

    if let Some(gap_penalty) = options.gap_penalty {
        config.scoring.gap_penalty = gap_penalty;
    }

    if let Some(format) = &options.format {
        config.output.format = Some(format.clone().into());
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}
