/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router and applies the
 * middleware stack through `ServiceBuilder`.
 */

use axum::{http::StatusCode, middleware, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::middleware::{authenticate_request, require_principal};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_api_routes(router);
    let router = configure_chat_routes(router);

    router
        .fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Not found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    authenticate_request,
                ))
                .layer(middleware::from_fn(require_principal)),
        )
        .with_state(app_state)
}
