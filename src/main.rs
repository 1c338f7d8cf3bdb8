//! Catalog Service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/catalog-service/config.toml)
//! catalog-service
//!
//! # Custom config and catalog file
//! catalog-service --config /etc/catalog-service/config.toml --data ./products.json
//!
//! # Validate config without starting
//! catalog-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use catalog_service::config::{AppConfig, ConfigSource};
use catalog_service::server::{init_tracing, ServerHandle};

/// Product catalog server with category filtering and pagination.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-service",
    version,
    about = "Product catalog REST service",
    long_about = "REST API for browsing a product catalog by category and page, \
                  and for adding or deleting products.\n\n\
                  Default config: ~/.config/catalog-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the JSON catalog file.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(catalog_service::default_config_path);

    let (mut config, loaded) = match AppConfig::load_or_default(&config_path) {
        Ok((cfg, source)) => (cfg, Ok(source)),
        Err(e) if cli.check => {
            eprintln!("❌ Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Err(e) => (AppConfig::default(), Err(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(ConfigSource::File) => info!("Configuration loaded from {}", config_path.display()),
        Ok(ConfigSource::Defaults) => warn!(
            "No config file at {}, using default configuration",
            config_path.display()
        ),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(data) = cli.data {
        info!("CLI override: data = {}", data.display());
        config.catalog.data_path = Some(data);
    }

    if cli.check {
        config.validate()?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        match &config.catalog.data_path {
            Some(path) => println!("   Catalog     : {}", path.display()),
            None => println!("   Catalog     : in-memory"),
        }
        println!(
            "   Page sizes  : {} (all) / {} (category)",
            config.catalog.default_page_size_all, config.catalog.default_page_size_category
        );
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(config).await?;
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
