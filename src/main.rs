// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use runloc::Controller;
use runloc::app_config::{self, Config};
use runloc::file_utils::FileManager;

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
    /// Replace the text of selected nodes with dictionary translations
    Translate(TranslateArgs),

    /// List the language codes of the dictionary header
    Languages {
        /// Dictionary file (overrides the config)
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "runloc.json")]
        config_path: PathBuf,
    },

    /// Generate shell completions for runloc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document (JSON)
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output document; defaults to <stem>.<target>.json next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code as written in the dictionary header
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code as written in the dictionary header
    #[arg(short, long)]
    target_language: Option<String>,

    /// Dictionary file
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Exception patterns file
    #[arg(short = 'x', long)]
    exceptions: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "runloc.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Plan only, do not write the output document
    #[arg(long)]
    dry_run: bool,

    /// Write the failure report to this file instead of the log
    #[arg(long)]
    report: Option<PathBuf>,

    /// Persist command line overrides into the config file
    #[arg(long)]
    save_config: bool,
}

/// runloc - style-preserving localization of rich text
#[derive(Parser, Debug)]
#[command(name = "runloc")]
#[command(version)]
#[command(about = "Dictionary-based localization of styled text that keeps every run's style")]
#[command(long_about = "runloc replaces the text of document nodes with dictionary translations
while keeping per-run styling (font, size, color, spacing, decoration).

EXAMPLES:
    runloc translate page.json                      # Translate using runloc.json
    runloc translate -s RU -t EN page.json          # Pick the language columns
    runloc translate --dry-run page.json            # Check every node can be translated
    runloc translate --report failures.txt page.json
    runloc languages -d dictionary.tsv              # Show the dictionary languages
    runloc completions bash > runloc.bash           # Generate bash completions

CONFIGURATION:
    Settings are stored in runloc.json by default. If the file doesn't exist,
    a default one is created. Use --save-config to persist overrides.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default; raised or lowered once the config is known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "runloc", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages { dictionary, config_path } => {
            let mut config = Config::load_or_create(&config_path)?;
            if let Some(dictionary) = dictionary {
                config.dictionary_path = dictionary;
            }
            let controller = Controller::with_config(config)?;
            let dictionary = controller.load_dictionary()?;
            for code in dictionary.languages() {
                println!("{}", code);
            }
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(dictionary) = &options.dictionary {
        config.dictionary_path = dictionary.clone();
    }
    if let Some(exceptions) = &options.exceptions {
        config.exceptions_path = Some(exceptions.clone());
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config.clone())?;

    if options.save_config {
        config.save(&options.config_path)?;
        info!("Saved settings to {:?}", options.config_path);
    }

    if !options.input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    let output = options.output.clone().unwrap_or_else(|| {
        FileManager::generate_output_path(&options.input_path, &config.target_language)
    });

    controller
        .run(options.input_path, output, options.dry_run, options.report)
        .await
}
