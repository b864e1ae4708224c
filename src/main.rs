use clap::Parser;
use feedrank::cli::{Cli, Commands};
use feedrank::types::config::Config;
use feedrank::FeedResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> FeedResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let (config, load_error) = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => (config, None),
            Err(e) => (Config::default_config(), Some(e)),
        }
    } else {
        (Config::default_config(), None)
    };

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("feedrank={}", log_level)
            .parse()
            .unwrap_or_else(|_| "feedrank=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    if let Some(e) = load_error {
        tracing::warn!(
            error = %e,
            "Failed to load {}, using defaults",
            cli.config.display()
        );
    } else {
        tracing::debug!("Configuration loaded from: {}", cli.config.display());
    }

    match cli.command {
        Commands::Serve { host, port } => {
            feedrank::cli::commands::serve(host, port, &config).await?;
        }
        Commands::Rank { user_id } => {
            feedrank::cli::commands::rank(&user_id, &config).await?;
        }
        Commands::Init { path } => {
            feedrank::cli::commands::init(path).await?;
        }
        Commands::Config => {
            feedrank::cli::commands::config_cmd(&cli.config, &config).await?;
        }
        Commands::Version => {
            feedrank::cli::commands::version();
        }
    }

    Ok(())
}
