pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::consolidate::handlers as consolidate_handlers;
use crate::render::handlers as render_handlers;
use crate::ssml::handlers as ssml_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ssml/parse", post(ssml_handlers::handle_parse_ssml))
        .route(
            "/api/v1/render/html",
            post(render_handlers::handle_render_html),
        )
        .route(
            "/api/v1/render/pdf",
            post(render_handlers::handle_render_pdf),
        )
        .route(
            "/api/v1/consolidate",
            get(consolidate_handlers::handle_consolidate),
        )
        .with_state(state)
}
