//! Askdocs HTTP service.
//!
//! Hosts the request pipeline behind a `POST /` endpoint. Collaborator
//! clients are built once at startup and shared across requests; each
//! request runs the pipeline strictly sequentially with no cross-request
//! state.

pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::{middleware, web, App, HttpServer};
use askdocs_core::{AppResult, ServiceConfig};

pub use pipeline::{Answer, Pipeline};
pub use state::AppState;

/// Build the shared state and run the HTTP server until shutdown.
pub async fn run(config: &ServiceConfig) -> AppResult<()> {
    let state = web::Data::new(AppState::from_config(config)?);

    tracing::info!(
        host = %config.bind_host,
        port = config.bind_port,
        "Starting askdocs server"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(routes::json_config())
            .service(routes::health)
            .service(routes::ask)
    })
    .bind((config.bind_host.as_str(), config.bind_port))?
    .run()
    .await?;

    Ok(())
}
