//! Axum middleware running the admission gates in front of guarded routes.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::auth::API_KEY_HEADER;
use crate::error::{GateError, Rejection};
use crate::metrics::{AUTH_REJECTED, RATE_LIMITED, REQUESTS_ADMITTED, TRACKED_BUCKETS};
use crate::state::AppState;

// Turn a gate failure into the JSON error response, logging it on the way
fn reject(request: &Request<Body>, error: GateError) -> Response {
    let path = request.uri().path().to_string();
    tracing::warn!(
        "{} {} -> {} {}",
        request.method(),
        path,
        error.status().as_u16(),
        error
    );
    Rejection { error, path }.into_response()
}

pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let result = state.auth.check(request.headers());

    match result {
        Ok(()) => next.run(request).await,
        Err(error) => {
            AUTH_REJECTED.inc();
            reject(&request, error)
        }
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Without into_make_service_with_connect_info there is no address
    let address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    // raw header bytes, so non-ASCII keys keep their own bucket
    let presented_key = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let result = state
        .limiter
        .check_rate_limit(address.as_deref(), presented_key.as_deref());
    TRACKED_BUCKETS.set(state.limiter.len() as f64);

    match result {
        Ok(()) => {
            REQUESTS_ADMITTED.inc();
            next.run(request).await
        }
        Err(error) => {
            RATE_LIMITED.inc();
            reject(&request, error)
        }
    }
}
