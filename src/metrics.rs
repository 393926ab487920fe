use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, register_counter, register_gauge};


lazy_static! {
    pub static ref REQUESTS_ADMITTED: Counter =
        register_counter!("gate_requests_admitted_total", "Requests that passed both gates")
            .expect("gate_requests_admitted_total registers once");
    pub static ref AUTH_REJECTED: Counter =
        register_counter!("gate_auth_rejected_total", "Requests rejected for a bad API key")
            .expect("gate_auth_rejected_total registers once");
    pub static ref RATE_LIMITED: Counter =
        register_counter!("gate_rate_limited_total", "Requests rejected by the rate limiter")
            .expect("gate_rate_limited_total registers once");
    pub static ref TRACKED_BUCKETS: Gauge =
        register_gauge!("gate_rate_limit_buckets", "Client buckets currently tracked")
            .expect("gate_rate_limit_buckets registers once");
}
