//! Catalog entry-point: loads settings, prepares storage and serves the API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use catalog::inbound::http::health::HealthState;
use server::{CatalogSettings, connect_database, create_server};

/// Application bootstrap.
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

    let settings = CatalogSettings::load().wrap_err("load catalog settings")?;
    let pool = connect_database(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings, pool)?;
    server.await.wrap_err("run http server")
}
