use std::sync::Arc;
use crate::auth::AuthGate;
use crate::rate_limit::AdmissionLimiter;
// app's shared state

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGate,                  // fixed after startup
    pub limiter: Arc<AdmissionLimiter>, // one per process, shared by every route
}

impl AppState {
    pub fn new(auth: AuthGate, limiter: AdmissionLimiter) -> Self {
        Self {
            auth,
            limiter: Arc::new(limiter),
        }
    }
}
