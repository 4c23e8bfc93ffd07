//! # BAC Spark Binary
//!
//! Entry point: parses the command line, sets up logging, dispatches.

use bacspark::AppError;
use bacspark::api::run_server;
use bacspark::bacspark_core::pagination::DEFAULT_PER_PAGE;
use bacspark::cli::{
    ExportFormat, cmd_categories, cmd_codes, cmd_export, cmd_redeem, is_rejection,
};
use bacspark::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_VALIDATION_DELAY_MS, ServerConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bacspark")]
#[command(version, about = "Access-code gating for BAC Spark documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Pause before reporting a redemption result
        #[arg(long, default_value_t = DEFAULT_VALIDATION_DELAY_MS)]
        validation_delay_ms: u64,
    },
    /// List categories
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// List available codes
    Codes {
        /// Restrict to one category id (e.g. math)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: usize,
        #[arg(long)]
        json: bool,
    },
    /// Redeem a code and show the unlocked documents
    Redeem {
        code: String,
        #[arg(long)]
        json: bool,
    },
    /// Write available codes to a file
    Export {
        output: PathBuf,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bacspark=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            validation_delay_ms,
        } => {
            let config = ServerConfig::from_args(&host, port, validation_delay_ms)?;
            run_server(config).await
        }
        Commands::Categories { json } => cmd_categories(json),
        Commands::Codes {
            category,
            page,
            per_page,
            json,
        } => cmd_codes(category.as_deref(), page, per_page, json),
        Commands::Redeem { code, json } => cmd_redeem(&code, json),
        Commands::Export {
            output,
            category,
            format,
        } => cmd_export(&output, category.as_deref(), format),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_rejection(&e) => {
            eprintln!("Invalid code. Please try again.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
