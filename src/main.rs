//! tinyweb command line.
//!
//! ```text
//! tinyweb run    [--config tinyweb.toml] [--host H] [--port P]
//! tinyweb routes [--config tinyweb.toml]
//! ```

mod demo;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use tinyweb::config::{load_config, AppConfig};
use tinyweb::lifecycle::{bind_listener, signals, Shutdown};
use tinyweb::observability::init_logging;
use tinyweb::HttpServer;

#[derive(Parser)]
#[command(name = "tinyweb")]
#[command(version, about = "Lightweight web framework with a typed router", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the application
    Run {
        /// Host address to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the route table
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };

    match cli.command {
        Commands::Run { host, port } => {
            apply_overrides(&mut config, host, port);
            init_logging(&config.observability)?;

            let app = demo::build_app(config)?;
            tracing::info!(
                name = %app.config().app.name,
                routes = app.router().len(),
                "Application built"
            );

            let listener = bind_listener(&app.config().listener).await?;
            let shutdown = Shutdown::new();
            signals::spawn_signal_handler(shutdown.clone());

            let server = HttpServer::new(app);
            tracing::debug!(
                request_timeout_secs = server.app().config().timeouts.request_secs,
                "Server assembled"
            );
            server.run(listener, shutdown.subscribe()).await?;
            tracing::info!("Shutdown complete");
        }
        Commands::Routes => {
            let app = demo::build_app(config)?;
            println!("{:<20} {:<16} {:<32} PARAMS", "ENDPOINT", "METHODS", "PATH");
            for route in app.router().routes() {
                let methods: Vec<&str> = route.methods().collect();
                println!(
                    "{:<20} {:<16} {:<32} {}",
                    route.endpoint(),
                    methods.join(","),
                    route.path(),
                    param_summary(route)
                );
            }
        }
    }

    Ok(())
}

/// `tinyweb.toml` in the working directory if present, else built-in defaults.
fn default_config() -> Result<AppConfig, tinyweb::config::ConfigError> {
    let local = Path::new("tinyweb.toml");
    if local.exists() {
        load_config(local)
    } else {
        Ok(AppConfig::default())
    }
}

/// `name:type` for each declared parameter, e.g. `user_id:int`.
fn param_summary<H>(route: &tinyweb::routing::Route<H>) -> String {
    route
        .params()
        .iter()
        .map(|(name, ty)| format!("{name}:{}", ty.name()))
        .collect::<Vec<_>>()
        .join(",")
}

fn apply_overrides(config: &mut AppConfig, host: Option<String>, port: Option<u16>) {
    if host.is_none() && port.is_none() {
        return;
    }
    let (current_host, current_port) = config
        .listener
        .bind_address
        .rsplit_once(':')
        .map(|(h, p)| (h.to_string(), p.parse().unwrap_or(8000)))
        .unwrap_or_else(|| ("127.0.0.1".to_string(), 8000));
    let host = host.unwrap_or(current_host);
    let port = port.unwrap_or(current_port);
    config.listener.bind_address = format!("{host}:{port}");
}
