//! Implementação dos comandos CLI do feedrank.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::server;
use crate::service::FeedService;
use crate::types::config::Config;
use crate::FeedResult;

/// Inicia o servidor HTTP.
pub async fn serve(host: Option<String>, port: Option<u16>, config: &Config) -> FeedResult<()> {
    let mut config = config.clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = Arc::new(FeedService::from_config(&config)?);

    tracing::info!(
        "Starting feedrank on {} (cache capacity {})",
        config.server.bind_addr(),
        config.cache.capacity
    );

    server::serve(service, &config.server.bind_addr()).await
}

/// Ranks the catalog for `user_id` and prints the feed as pretty JSON.
pub async fn rank(user_id: &str, config: &Config) -> FeedResult<()> {
    let service = FeedService::from_config(config)?;
    let feed = service.feed(user_id).await?;

    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}

/// Writes a default configuration file into `path`.
pub async fn init(path: Option<PathBuf>) -> FeedResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("feedrank.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point [catalog].path at a JSON catalog (optional)");
    println!("  2. Start the server: feedrank serve");
    println!("  3. Try it: curl 'http://localhost:5000/feed?user_id=guest'");

    Ok(())
}

/// Prints the effective configuration as TOML.
pub async fn config_cmd(config_path: &Path, config: &Config) -> FeedResult<()> {
    if config_path.exists() {
        println!("# loaded from {}", config_path.display());
    } else {
        println!("# {} not found, showing defaults", config_path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("feedrank v{}", env!("CARGO_PKG_VERSION"));
}
