//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{CatalogSettings, SettingsError};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use catalog::Trace;
#[cfg(debug_assertions)]
use catalog::doc::ApiDoc;
use catalog::inbound::http::health::{HealthState, live, ready};
use catalog::inbound::http::state::HttpState;
use catalog::inbound::http;
use catalog::outbound::persistence::{DbPool, run_pending_migrations};
use state_builders::build_http_state;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(http::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Connect to PostgreSQL and apply pending migrations when configured.
///
/// # Errors
/// Fails when migrations cannot be applied or the pool cannot be built.
pub async fn connect_database(settings: &CatalogSettings) -> Result<Option<DbPool>> {
    let Some(pool_config) = settings.pool_config() else {
        return Ok(None);
    };
    let applied = run_pending_migrations(pool_config.database_url())
        .await
        .wrap_err("apply database migrations")?;
    info!(applied, "database migrations complete");
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("create database pool")?;
    Ok(Some(pool))
}

/// Construct an Actix HTTP server from loaded settings.
///
/// The health state is marked ready once the listener is bound.
///
/// # Errors
/// Fails when the state cannot be built or the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &CatalogSettings,
    pool: Option<DbPool>,
) -> Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(settings, pool)?;
    let bind_addr = settings.bind_addr()?;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)
    .wrap_err_with(|| format!("bind {bind_addr}"))?
    .run();

    info!(%bind_addr, "catalog listening");
    health_state.mark_ready();
    Ok(server)
}
