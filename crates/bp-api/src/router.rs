use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::{get, put};
use axum::Router;
use bp_core::BlueprintsServices;
use tracing::{info, Instrument};

use crate::handlers;

/// Estado compartido por los handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: BlueprintsServices,
}

impl AppState {
    pub fn new(services: BlueprintsServices) -> Self {
        Self { services }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route(
            "/blueprints",
            get(handlers::list_blueprints_handler).post(handlers::create_blueprint_handler),
        )
        .route("/blueprints/:author", get(handlers::blueprints_by_author_handler))
        .route("/blueprints/:author/:name", get(handlers::blueprint_handler))
        .route(
            "/blueprints/:author/:name/points",
            put(handlers::add_point_handler),
        )
        .fallback(handlers::not_found_handler)
        .layer(from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);
    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
            info!(status = response.status().as_u16(),
                  latency_ms = started.elapsed().as_millis() as u64,
                  "request completed")
        });
    response
}
