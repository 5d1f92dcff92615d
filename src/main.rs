use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use parking_lot::Mutex;
use tracing::info;
use tutor_desk::{
    api::{self, Desk},
    config::Config,
    controller::Controller,
    store::SqliteStore,
    utils::init_log,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    #[arg(short = 'H', long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for log files, logs go to stdout when unset
    #[arg(short, long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(database) = self.database {
            config.database = database;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Cli::parse().into_config()?;
    let _guard = init_log(config.log_dir.clone())?;

    if let Some(dir) = config.database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let store = Arc::new(SqliteStore::connect(&config.database_url()).await?);
    let desk: Desk = Arc::new(Mutex::new(Controller::load(store).await));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Starting server at http://{}:{}", config.host, config.port);
    info!(
        "Swagger UI available at http://{}:{}/swagger-ui/",
        config.host, config.port
    );
    api::serve(listener, desk, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
