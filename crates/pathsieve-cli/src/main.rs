//! pathsieve-cli: Command-line interface for pathsieve.

mod output;

use clap::{Args, Parser, Subcommand};
use pathsieve_core::{Config, ExclusionFilter, FileKind, Result};
use pathsieve_scanner::Scanner;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "pathsieve")]
#[command(about = "Source/test file filtering with wildcard inclusions and exclusions", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $PATHSIEVE_CONFIG, then ./pathsieve.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for pathsieve (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan source and test directories and list accepted files
    Scan {
        #[command(flatten)]
        overrides: ScanOverrides,

        /// Output format (table, json, plain)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Decide whether a single relative path is accepted
    Check {
        /// Path relative to the base directory
        path: String,

        /// Classify the path as a test file
        #[arg(long)]
        test: bool,

        #[command(flatten)]
        patterns: PatternOverrides,
    },

    /// Print the effective configuration
    Config,
}

/// Command-line values that replace configured ones.
#[derive(Args)]
struct ScanOverrides {
    /// Base directory; scanned paths are relative to it
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Comma-separated source directories
    #[arg(long, value_delimiter = ',')]
    sources: Option<Vec<PathBuf>>,

    /// Comma-separated test directories
    #[arg(long, value_delimiter = ',')]
    tests: Option<Vec<PathBuf>>,

    #[command(flatten)]
    patterns: PatternOverrides,
}

/// Pattern lists that replace configured ones.
#[derive(Args)]
struct PatternOverrides {
    /// Comma-separated source inclusion patterns
    #[arg(long, value_delimiter = ',')]
    inclusions: Option<Vec<String>>,

    /// Comma-separated source exclusion patterns
    #[arg(long, value_delimiter = ',')]
    exclusions: Option<Vec<String>>,

    /// Comma-separated test inclusion patterns
    #[arg(long, value_delimiter = ',')]
    test_inclusions: Option<Vec<String>>,

    /// Comma-separated test exclusion patterns
    #[arg(long, value_delimiter = ',')]
    test_exclusions: Option<Vec<String>>,
}

impl ScanOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(base_dir) = self.base_dir {
            config.scan.base_dir = base_dir;
        }
        if let Some(sources) = self.sources {
            config.scan.source_dirs = sources;
        }
        if let Some(tests) = self.tests {
            config.scan.test_dirs = tests;
        }
        self.patterns.apply(config);
    }
}

impl PatternOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(patterns) = self.inclusions {
            config.exclusions.source_inclusions = patterns;
        }
        if let Some(patterns) = self.exclusions {
            config.exclusions.source_exclusions = patterns;
        }
        if let Some(patterns) = self.test_inclusions {
            config.exclusions.test_inclusions = patterns;
        }
        if let Some(patterns) = self.test_exclusions {
            config.exclusions.test_exclusions = patterns;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.log_level.as_deref() {
        Some(level) => pathsieve_core::logging::init_with_level(level),
        None => pathsieve_core::logging::init(),
    }

    let mut config = load_config(cli.config)?;

    match cli.command {
        Some(Commands::Scan { overrides, format }) => {
            overrides.apply(&mut config);
            scan(config, &format)?;
        }
        Some(Commands::Check {
            path,
            test,
            patterns,
        }) => {
            patterns.apply(&mut config);
            check(&config, &path, test);
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        None => {
            println!("pathsieve v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn scan(config: Config, format: &str) -> Result<()> {
    let scanner = Scanner::new(config);
    let report = scanner.scan()?;

    match format {
        "json" => output::print_json(&report)?,
        "plain" => output::print_plain(&report),
        _ => output::print_table(&report),
    }

    Ok(())
}

fn check(config: &Config, path: &str, test: bool) {
    let kind = if test {
        FileKind::Test
    } else {
        FileKind::Source
    };
    let filter = ExclusionFilter::new(&config.exclusions);

    if filter.accept(path, kind) {
        println!("accepted");
    } else {
        println!("ignored");
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    let config_path = explicit.unwrap_or_else(pathsieve_core::paths::config_path);

    if config_path.exists() {
        info!("Loading configuration from {}", config_path.display());
    } else {
        debug!(
            "No configuration at {}, using defaults",
            config_path.display()
        );
    }
    Config::load_or_default(&config_path)
}
