// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use pdftwai::app_config::{self, Config, TranslationProvider};
use pdftwai::app_controller::{Controller, RunOutcome};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Gemini,
    #[value(name = "huggingface", alias = "hf")]
    HuggingFace,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::HuggingFace => TranslationProvider::HuggingFace,
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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a PDF or every PDF in a directory (default command)
    Translate(TranslateArgs),

    /// Send a short probe translation to the configured provider
    Check(ProviderArgs),

    /// Generate shell completions for pdftwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options selecting and configuring the provider
#[derive(Args, Debug, Clone)]
struct ProviderArgs {
    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the provider (defaults to the provider's environment variable)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Source language code, or 'auto' (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Input PDF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    provider: ProviderArgs,

    /// Directory for the translated documents (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Do not put a title heading above the translated text
    #[arg(long)]
    no_title: bool,

    /// Print the translated text after writing the document
    #[arg(long)]
    preview: bool,
}

/// PDFTwAI - PDF Translation with AI
///
/// Extracts the text of PDF documents, translates it with a web translator or a
/// language model, and writes the result as a Word document.
#[derive(Parser, Debug)]
#[command(name = "pdftwai")]
#[command(version)]
#[command(about = "Translate PDF documents into Word documents")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "PDFTwAI extracts the text of PDF documents and translates it segment by segment.

EXAMPLES:
    pdftwai report.pdf                          # Translate using default config
    pdftwai -f report.pdf                       # Force overwrite existing output
    pdftwai -p openai -m gpt-4o report.pdf      # Use specific provider and model
    pdftwai -s en -t de report.pdf              # Translate from English to German
    pdftwai -o out/ --no-title ~/papers/        # Process a directory into out/
    pdftwai check -p gemini                     # Test the provider connection
    pdftwai completions bash > pdftwai.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google      - Free Google web translation (default, no key)
    openai      - OpenAI API (OPENAI_API_KEY)
    anthropic   - Anthropic API (ANTHROPIC_API_KEY)
    gemini      - Google Gemini API (GEMINI_API_KEY)
    huggingface - Hugging Face inference (HF_TOKEN)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input PDF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    provider: ProviderArgs,

    /// Directory for the translated documents (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Do not put a title heading above the translated text
    #[arg(long)]
    no_title: bool,

    /// Print the translated text after writing the document
    #[arg(long)]
    preview: bool,
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
        // The logger itself accepts everything; `log::set_max_level` does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => "",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: One colored log line, without the trailing newline
    fn format_line(level: Level, timestamp: &str, message: impl std::fmt::Display) -> String {
        format!(
            "{}{} {}{}\x1B[0m",
            Self::get_color_for_level(level),
            timestamp,
            Self::get_emoji_for_level(level),
            message
        )
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f").to_string();
            let _ = writeln!(
                std::io::stderr(),
                "{}",
                Self::format_line(record.level(), &now, record.args())
            );
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

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pdftwai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check(args)) => run_check(args).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - top-level args mirror the translate subcommand
            match cli.input_path {
                Some(input_path) => run_translate(TranslateArgs {
                    input_path,
                    provider: cli.provider,
                    output_dir: cli.output_dir,
                    force_overwrite: cli.force_overwrite,
                    no_title: cli.no_title,
                    preview: cli.preview,
                }).await,
                None => Err(anyhow!("INPUT_PATH is required when no subcommand is specified")),
            }
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Load the config file (creating a default one when missing) and apply CLI overrides
fn load_config(options: &ProviderArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }
    if let Some(api_key) = &options.api_key {
        config.translation.active_provider_config_mut().api_key = api_key.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

async fn run_check(options: ProviderArgs) -> Result<()> {
    let config = load_config(&options)?;
    let controller = Controller::with_config(config)?;
    controller.check().await
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.provider)?;
    if options.no_title {
        config.document.include_title = false;
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let outcome = controller.run(
            options.input_path.clone(),
            options.output_dir.clone(),
            options.force_overwrite,
        ).await?;

        match outcome {
            RunOutcome::Written { output, report } => {
                info!("Success: {}", output.display());
                if options.preview {
                    println!("{}", report.text);
                }
            }
            RunOutcome::Skipped(output) => {
                info!("Nothing to do, {} already exists", output.display());
            }
        }
    } else if options.input_path.is_dir() {
        if options.preview {
            warn!("--preview is ignored when translating a directory");
        }
        let summary = controller.run_folder(
            options.input_path.clone(),
            options.output_dir.clone(),
            options.force_overwrite,
        ).await?;

        if summary.failed > 0 {
            return Err(anyhow!("{} of {} files failed", summary.failed,
                summary.processed + summary.skipped + summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
