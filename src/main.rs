// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TimingMode};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod audio_decoder;
mod errors;
mod file_utils;
mod lyrics_processor;
mod timing;
mod video_renderer;

/// CLI Wrapper for TimingMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTimingMode {
    Onset,
    Uniform,
}

impl From<CliTimingMode> for TimingMode {
    fn from(cli_mode: CliTimingMode) -> Self {
        match cli_mode {
            CliTimingMode::Onset => TimingMode::Onset,
            CliTimingMode::Uniform => TimingMode::Uniform,
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
    /// Render karaoke videos for all matched audio/lyrics pairs (default command)
    #[command(alias = "render")]
    Render(RenderArgs),

    /// Generate shell completions for lyrivid
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Directory containing input audio files
    #[arg(short, long)]
    audio_dir: Option<PathBuf>,

    /// Directory containing syllable lyrics files
    #[arg(short, long)]
    lyrics_dir: Option<PathBuf>,

    /// Directory the rendered videos are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Syllable timing policy
    #[arg(short, long, value_enum)]
    timing: Option<CliTimingMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// lyrivid - karaoke lyric-video generator
///
/// Renders karaoke-style videos from audio tracks and syllable-separated
/// lyric files, with syllable highlights synchronized to the music.
#[derive(Parser, Debug)]
#[command(name = "lyrivid")]
#[command(version = "1.0.0")]
#[command(about = "Karaoke lyric-video generator")]
#[command(long_about = "lyrivid pairs each audio file with a syllable lyrics file, aligns the
syllables to the audio timeline, and renders one video per pair with
burned-in progressive karaoke captions over the original audio.

EXAMPLES:
    lyrivid                              # Process all pairs using conf.json
    lyrivid -f                           # Force overwrite existing videos
    lyrivid --timing uniform             # Equal-width windows instead of onsets
    lyrivid -a songs -l syl -o out       # Override the input/output directories
    lyrivid --log-level debug            # Verbose pipeline logging
    lyrivid completions bash > lyrivid.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

LYRICS FORMAT:
    One syllable per line; a trailing '-' joins the syllable to the next
    one without a word break. Audio 'song.m4a' pairs with 'song.txt' or
    'song_syllables.txt' in the lyrics directory.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing input audio files
    #[arg(short, long)]
    audio_dir: Option<PathBuf>,

    /// Directory containing syllable lyrics files
    #[arg(short, long)]
    lyrics_dir: Option<PathBuf>,

    /// Directory the rendered videos are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Syllable timing policy
    #[arg(short, long, value_enum)]
    timing: Option<CliTimingMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let emoji = Self::get_emoji_for_level(record.level());
            let _ = match record.level() {
                Level::Error => writeln!(
                    stderr,
                    "\x1B[1;31m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Warn => writeln!(
                    stderr,
                    "\x1B[1;33m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Info => writeln!(
                    stderr,
                    "\x1B[1;32m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Debug => writeln!(
                    stderr,
                    "\x1B[1;36m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Trace => writeln!(
                    stderr,
                    "\x1B[1;35m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lyrivid", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Render(args)) => run_render(args).await,
        None => {
            // Default behavior - use top-level args
            let render_args = RenderArgs {
                audio_dir: cli.audio_dir,
                lyrics_dir: cli.lyrics_dir,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                timing: cli.timing,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_render(render_args).await
        }
    }
}

async fn run_render(options: RenderArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(audio_dir) = &options.audio_dir {
        config.audio_dir = audio_dir.clone();
    }
    if let Some(lyrics_dir) = &options.lyrics_dir {
        config.lyrics_dir = lyrics_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(mode) = &options.timing {
        config.timing.mode = mode.clone().into();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(to_level_filter(&config.log_level));
    }

    // Create controller and run the batch
    let controller = Controller::with_config(config)?;
    let summary = controller.run_batch(options.force_overwrite).await?;

    if summary.failed > 0 {
        warn!("{} pair(s) failed; see the log above for details", summary.failed);
    }

    Ok(())
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
