// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use vidsum::app_config::{self, Config};
use vidsum::app_controller::Controller;
use vidsum::media::downloader::is_url;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Options shared by every command that summarizes
#[derive(Args, Debug, Clone)]
struct SummaryOptions {
    /// Target summary length in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Subtitle language (English name or ISO code, e.g. 'english', 'en', 'deu')
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a video file, a folder of videos, or a video URL
    #[command(alias = "sum")]
    Summarize(SummarizeArgs),

    /// Print the selected subtitle time ranges as JSON
    Regions(RegionsArgs),

    /// Render one summary (used by isolated workers)
    #[command(hide = true)]
    Render(RenderArgs),

    /// Generate shell completions for vidsum
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SummarizeArgs {
    /// Video file, directory of videos, or http(s) URL
    #[arg(value_name = "INPUT")]
    input: String,

    /// Subtitle file (defaults to <video-stem>.srt or .vtt next to the video)
    #[arg(short, long)]
    subtitles: Option<PathBuf>,

    #[command(flatten)]
    summary: SummaryOptions,

    /// Output video path (defaults to <video-stem>_1.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Render in this process instead of an isolated worker
    #[arg(long)]
    in_process: bool,
}

#[derive(Parser, Debug)]
struct RegionsArgs {
    /// Subtitle file (SRT or WebVTT)
    #[arg(value_name = "SUBTITLES")]
    subtitles: PathBuf,

    #[command(flatten)]
    summary: SummaryOptions,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Video file
    video: PathBuf,

    /// Subtitle file
    #[arg(long)]
    subtitles: PathBuf,

    /// Output video path
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    summary: SummaryOptions,
}

/// vidsum - subtitle-driven video summarizer
///
/// Picks the most important subtitle sentences with latent semantic analysis and
/// cuts the video down to the matching time ranges.
#[derive(Parser, Debug)]
#[command(name = "vidsum")]
#[command(version)]
#[command(about = "Subtitle-driven video summarizer")]
#[command(long_about = "vidsum ranks subtitle sentences with latent semantic analysis, grows or shrinks the
selection until it matches the requested duration, and joins the matching clips with ffmpeg.

EXAMPLES:
    vidsum summarize talk.mp4                        # 60 second summary using talk.srt
    vidsum summarize talk.mp4 -d 120 -o short.mp4    # 2 minute summary to short.mp4
    vidsum summarize -l de vortrag.mkv               # German subtitles
    vidsum summarize /videos/                        # Every video with subtitles in a folder
    vidsum summarize 'https://youtu.be/...'          # Download with yt-dlp first
    vidsum regions talk.srt -d 30                    # Print selected ranges as JSON
    vidsum completions bash > vidsum.bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
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
        // The logger itself lets everything through; log::max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", ""),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (colour, marker) = Self::style_for_level(record.level());
        let mut stderr = std::io::stderr();

        let _ = if record.level() >= Level::Debug {
            writeln!(stderr, "{}{} {} [{}] {}\x1B[0m", colour, now, marker, record.target(), record.args())
        } else {
            writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, marker, record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Values from the command line that take precedence over conf.json
#[derive(Debug, Default)]
struct ConfigOverrides {
    duration: Option<f64>,
    language: Option<String>,
    log_level: Option<CliLogLevel>,
    in_process: bool,
}

impl ConfigOverrides {
    fn from_summary(summary: &SummaryOptions, log_level: Option<CliLogLevel>) -> Self {
        ConfigOverrides {
            duration: summary.duration,
            language: summary.language.clone(),
            log_level,
            in_process: false,
        }
    }

    fn apply(&self, config: &mut Config) {
        if let Some(duration) = self.duration {
            config.summary.target_duration_secs = duration;
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level.into();
        }
        if self.in_process {
            config.worker.isolate = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(log_level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(log_level).to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vidsum", &mut std::io::stdout());
            Ok(())
        }
        Commands::Summarize(args) => {
            let mut overrides = ConfigOverrides::from_summary(&args.summary, cli.log_level);
            overrides.in_process = args.in_process;
            let config = load_config(&cli.config_path, &overrides)?;
            run_summarize(config, &cli.config_path, args).await
        }
        Commands::Regions(args) => {
            let overrides = ConfigOverrides::from_summary(&args.summary, cli.log_level);
            let config = load_config(&cli.config_path, &overrides)?;
            run_regions(config, &args.subtitles)
        }
        Commands::Render(args) => {
            let overrides = ConfigOverrides::from_summary(&args.summary, cli.log_level);
            let config = load_config(&cli.config_path, &overrides)?;
            let controller = Controller::with_config(config)?;
            controller
                .render_in_process(&args.video, &args.subtitles, &args.output)
                .await?;
            Ok(())
        }
    }
}

/// Load or create the configuration, apply CLI overrides, validate
fn load_config(config_path: &str, overrides: &ConfigOverrides) -> Result<Config> {
    let (mut config, created) = Config::load_or_create(config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", config_path);
    }

    overrides.apply(&mut config);

    config.validate()
        .context("Configuration validation failed")?;

    // The command line level was applied before loading
    if overrides.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_summarize(config: Config, config_path: &str, args: SummarizeArgs) -> Result<()> {
    let controller = Controller::with_config(config)?
        .with_config_path(config_path);

    if is_url(&args.input) {
        if let Some(written) = controller.run_url(&args.input, args.output, args.force_overwrite).await? {
            info!("Success: {:?}", written);
        }
        return Ok(());
    }

    let input = Path::new(&args.input);
    if input.is_dir() {
        if args.subtitles.is_some() || args.output.is_some() {
            warn!("--subtitles and --output are ignored when summarizing a folder");
        }
        let report = controller.run_folder(input, args.force_overwrite).await?;
        if report.failed > 0 {
            return Err(anyhow!("{} of {} videos failed", report.failed, report.processed + report.failed));
        }
        return Ok(());
    }

    if input.is_file() {
        if let Some(written) = controller
            .run_file(input, args.subtitles, args.output, args.force_overwrite)
            .await?
        {
            info!("Success: {:?}", written);
        }
        return Ok(());
    }

    Err(anyhow!("Input path does not exist: {:?}", input))
}

fn run_regions(config: Config, subtitles: &Path) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let converged = controller.find_regions(subtitles)?;

    let json = serde_json::to_string_pretty(&converged)
        .context("Failed to serialize summary regions")?;
    println!("{}", json);
    Ok(())
}
