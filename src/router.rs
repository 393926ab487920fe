use axum::{Router, middleware::from_fn_with_state, routing::get};
use crate::handlers::{health_handler, metrics_handler};
use crate::middleware::{api_key_middleware, rate_limit_middleware};
use crate::state::AppState;

// Put both gates in front of `router`. The layer added last runs first,
// so the API key is checked before the request touches the limiter.
pub fn guard<S>(router: Router<S>, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(from_fn_with_state(state, api_key_middleware))
}

pub fn build_router(state: AppState) -> Router {
    let guarded = guard(Router::new().route("/metrics", get(metrics_handler)), state);

    Router::new()
        .route("/health", get(health_handler))
        .merge(guarded)
}
