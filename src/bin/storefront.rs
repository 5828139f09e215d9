//! Storefront CLI binary.
//!
//! # Commands
//!
//! - `serve` - Start the catalog HTTP server
//! - `scan` - Run the XSS detector against a string, file, or stdin

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use storefront::{
    security::XssDetector,
    server::{create_router, AppState, ServerConfig, DEV_TOKEN_SECRET},
    VERSION,
};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version = VERSION)]
#[command(about = "Product catalog backend with XSS input screening", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the catalog HTTP server
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Upload directory for product images
        #[arg(long)]
        upload_dir: Option<PathBuf>,

        /// Token secret (or env STOREFRONT_TOKEN_SECRET)
        #[arg(long)]
        secret: Option<String>,

        /// Disable XSS screening
        #[arg(long)]
        no_security: bool,

        /// Disable CORS
        #[arg(long)]
        no_cors: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the XSS detector against content
    Scan {
        /// Content to scan (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            bind_all,
            config,
            upload_dir,
            secret,
            no_security,
            no_cors,
            verbose,
        } => cmd_serve(
            port,
            host,
            bind_all,
            config,
            upload_dir,
            secret,
            no_security,
            no_cors,
            verbose,
        ),

        Commands::Scan { input, file, json } => cmd_scan(input, file, json),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_serve(
    port: u16,
    host: String,
    bind_all: bool,
    config_file: Option<PathBuf>,
    upload_dir: Option<PathBuf>,
    secret: Option<String>,
    no_security: bool,
    no_cors: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    // Initialize logging
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Build config: file first, then flags on top
    let mut config = match config_file {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    config = config.with_port(port);
    if bind_all {
        config = config.bind_all();
    } else {
        let addr: std::net::SocketAddr = format!("{host}:{port}").parse()?;
        config = config.with_addr(addr);
    }

    if let Some(dir) = upload_dir {
        config = config.with_upload_dir(dir);
    }

    let secret = secret.or_else(|| std::env::var("STOREFRONT_TOKEN_SECRET").ok());
    if let Some(secret) = secret {
        config = config.with_token_secret(secret);
    }

    if no_security {
        config = config.without_security();
    }
    if no_cors {
        config = config.without_cors();
    }

    if config.token_secret == DEV_TOKEN_SECRET {
        tracing::warn!("No token secret configured, using the insecure development secret");
    }

    tracing::info!("Starting storefront server on {}", config.addr);
    tracing::info!("Upload directory: {}", config.upload_dir.display());
    tracing::info!(
        "XSS screening: {}",
        if config.security_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let state = Arc::new(AppState::new(config.clone()).await?);
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind(config.addr).await?;
        axum::serve(listener, app).await?;
        Ok::<_, anyhow::Error>(())
    })
}

fn cmd_scan(input: Option<String>, file: Option<PathBuf>, json_output: bool) -> anyhow::Result<()> {
    let content = read_input(input, file)?;
    let detector = XssDetector::new();
    let report = detector.scan(&content);

    if json_output {
        let output = serde_json::json!({
            "clean": report.clean,
            "matches": report.matches.iter().map(|p| serde_json::json!({
                "name": p.name,
                "description": p.description,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if report.clean {
        println!("CLEAN");
    } else {
        println!("FLAGGED");
        println!();
        println!("Matched patterns:");
        for pattern in &report.matches {
            println!("  - {}: {}", pattern.name, pattern.description);
        }
    }

    if !report.clean {
        std::process::exit(1);
    }

    Ok(())
}

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        Ok(std::fs::read_to_string(path)?)
    } else if let Some(s) = input {
        if s == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        } else {
            Ok(s)
        }
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
