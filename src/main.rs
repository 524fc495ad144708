use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use coindaily::config::{Backend, Environment, ServerConfig};
use coindaily::http::{self, AppState};
use coindaily::{logging, InMemoryModelStore, ModelStore, Service, SqliteModelStore};

#[derive(Debug, Parser)]
#[command(name = "coindaily", version, about = "Crypto news content API")]
struct Args {
    /// TOML config file.
    #[arg(long, env = "COINDAILY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file.
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file, overrides the config file.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Keep everything in memory; nothing survives a restart.
    #[arg(long, conflicts_with = "database")]
    memory: bool,

    /// `development` or `production`.
    #[arg(long)]
    environment: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(path) = args.database {
        config.storage.backend = Backend::Sqlite;
        config.storage.path = path;
    }
    if args.memory {
        config.storage.backend = Backend::Memory;
    }
    if let Some(env) = args.environment {
        config.environment = Environment::try_from(env)?;
    }

    tracing::info!(
        environment = %config.environment,
        backend = ?config.storage.backend,
        "starting"
    );

    match config.storage.backend {
        Backend::Memory => start(InMemoryModelStore::new(), &config).await,
        Backend::Sqlite => {
            tracing::info!(path = %config.storage.path.display(), "opening database");
            let store = SqliteModelStore::open(&config.storage.path)?;
            start(store, &config).await
        }
    }
}

async fn start<S: ModelStore + 'static>(
    store: S,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = Service::new(store).with_limits(config.limits());
    if config.storage.seed && service.seed_if_empty()? {
        tracing::info!("seeded initial content");
    }

    let state = AppState::new(Arc::new(service))
        .expose_detail(config.expose_error_detail())
        .draft_delay(config.draft_delay());
    http::serve(state, &config.bind).await?;
    Ok(())
}
