//! Backend entry-point: loads settings, initialises logging, and runs the
//! HTTP server.

mod server;

use mockable::DefaultEnv;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use envelope::config::{AppEnvironment, AppSettings};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = match AppSettings::from_env(&DefaultEnv::new()) {
        Ok(settings) => settings,
        Err(error) => {
            init_tracing(AppEnvironment::default());
            error!(%error, "invalid configuration");
            return Err(std::io::Error::other(error));
        }
    };
    init_tracing(settings.environment);

    create_server(ServerConfig::new(&settings))?.await
}

/// JSON logs in production, compact human-readable logs otherwise. The level
/// is taken from `RUST_LOG` and defaults to `info`.
fn init_tracing(environment: AppEnvironment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = if environment.is_production() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
