use crate::components::DataService;
use crate::config::{Config, StoreBackend};
use crate::error::Error;
use crate::seed;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging; `RUST_LOG` wins over the configured filter
pub fn init_logging(log_filter: &str) -> miette::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    Ok(Config::load()?)
}

/// Build the data service for the configured store
pub async fn build_service(config: &Config) -> miette::Result<DataService> {
    info!("Using {} store", config.store);

    let service = match config.store {
        StoreBackend::Memory => DataService::in_memory(),
        StoreBackend::Redis => DataService::redis(&config.redis_url)?,
    };

    if config.seed_demo_data {
        if config.store == StoreBackend::Redis {
            warn!("Seeding demo data into Redis");
        }
        seed::demo_data(&service).await?;
    }

    Ok(service)
}
