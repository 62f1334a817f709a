//! Key Registry - Entry point.

use clap::Parser;
use key_registry::config::{Config, LogFormat};
use key_registry::{KeyType, RegistrationService, RegistryError, Store};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code for a missing or malformed argument list.
const EXIT_USAGE: u8 = 64;

/// Register a key against an institution.
#[derive(Debug, Parser)]
#[command(name = "key-registry", version, after_help = key_types_help())]
struct Cli {
    /// Key type: CPF, CNPJ, PHONE or EMAIL (case-insensitive)
    key_type: String,

    /// Key value, exactly as it should be stored
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// Institution that owns the key
    #[arg(allow_hyphen_values = true)]
    institution: String,

    /// Arguments after the institution are ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,

    /// Record file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Load configuration
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            let e = RegistryError::from(e);
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    if let Some(path) = cli.store {
        config.store.path = path;
        config.store.persist = true;
    }

    // Initialize logging
    init_logging(&config.log.level, config.log.format);

    debug!("Loaded configuration: {:?}", config);
    if !cli.ignored.is_empty() {
        debug!("Ignoring {} extra arguments", cli.ignored.len());
    }

    let mut service = RegistrationService::new(Store::from_config(&config.store));

    match service.register(&cli.key_type, &cli.value, &cli.institution) {
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr so stdout carries only the outcome line.
fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn key_types_help() -> String {
    let mut help = String::from("Key types:\n");
    for kind in KeyType::ALL {
        help.push_str(&format!("  {:<6} {}\n", kind.tag(), kind.describe()));
    }
    help
}
