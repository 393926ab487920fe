use axum::http::HeaderMap;
use crate::error::GateError;

// Header carrying the shared secret. HeaderMap lookups ignore case,
// so "X-API-Key" and friends resolve to the same entry.
pub const API_KEY_HEADER: &str = "x-api-key";

// Static shared-secret check. No secret configured -> everything passes.
pub fn check_auth(headers: &HeaderMap, configured_secret: Option<&str>) -> Result<(), GateError> {
    let expected = match configured_secret {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(()),
    };

    // compared as raw bytes, missing and empty values count as a mismatch
    let presented = headers
        .get(API_KEY_HEADER)
        .map(|v| v.as_bytes())
        .unwrap_or_default();

    if presented.is_empty() || presented != expected.as_bytes() {
        return Err(GateError::Unauthorized);
    }
    Ok(())
}

// API key gate, built once at startup from config
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), GateError> {
        check_auth(headers, self.secret.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    fn headers_with(name: &str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_static(value),
        );
        headers
    }

    #[test]
    fn unset_secret_admits_anything() {
        assert!(check_auth(&HeaderMap::new(), None).is_ok());
        assert!(check_auth(&headers_with("x-api-key", "whatever"), None).is_ok());
    }

    #[test]
    fn empty_secret_admits_anything() {
        assert!(check_auth(&HeaderMap::new(), Some("")).is_ok());
        assert!(!AuthGate::new(Some(String::new())).is_enabled());
    }

    #[test]
    fn matching_key_is_admitted() {
        assert!(check_auth(&headers_with("x-api-key", "k1"), Some("k1")).is_ok());
    }

    #[test]
    fn header_name_casing_does_not_matter() {
        assert!(check_auth(&headers_with("X-API-Key", "k1"), Some("k1")).is_ok());
        assert!(check_auth(&headers_with("X-Api-KEY", "k1"), Some("k1")).is_ok());
    }

    #[test]
    fn wrong_key_is_rejected() {
        let err = check_auth(&headers_with("x-api-key", "k2"), Some("k1")).unwrap_err();
        assert_eq!(err, GateError::Unauthorized);
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(
            check_auth(&HeaderMap::new(), Some("k1")),
            Err(GateError::Unauthorized)
        );
    }

    #[test]
    fn empty_header_is_rejected() {
        assert_eq!(
            check_auth(&headers_with("x-api-key", ""), Some("k1")),
            Err(GateError::Unauthorized)
        );
    }

    #[test]
    fn value_comparison_is_exact() {
        assert!(check_auth(&headers_with("x-api-key", "K1"), Some("k1")).is_err());
        assert!(check_auth(&headers_with("x-api-key", "k1 "), Some("k1")).is_err());
    }

    #[test]
    fn non_ascii_secret_matches_exact_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_bytes("clé".as_bytes()).unwrap(),
        );
        assert!(check_auth(&headers, Some("clé")).is_ok());
        assert!(check_auth(&headers, Some("cle")).is_err());
    }

    #[test]
    fn gate_delegates_to_configured_secret() {
        let gate = AuthGate::new(Some("test-api-key".to_string()));
        assert!(gate.is_enabled());
        assert!(gate.check(&headers_with("x-api-key", "test-api-key")).is_ok());
        assert!(gate.check(&headers_with("x-api-key", "wrong-api-key")).is_err());
    }
}
