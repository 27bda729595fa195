//! Backend entry-point: loads configuration, prepares storage and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use parcel_backend::inbound::http::health::HealthState;
use parcel_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use parcel_backend::outbound::nominatim::NominatimHttpSource;
use parcel_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use parcel_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("session configuration")?;
    let geocoder = NominatimHttpSource::new(
        settings.nominatim_url()?,
        settings.nominatim_timeout(),
        settings.nominatim_identity(),
        settings.nominatim_options(),
    )
    .wrap_err("build geocoding client")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
        geocoder,
    );

    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations() {
            run_pending_migrations(database_url)
                .await
                .wrap_err("apply migrations")?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("connect to database")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(server::make_metrics());
    }

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr()?;
    let server = create_server(health_state, config).wrap_err("start server")?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated")
}
