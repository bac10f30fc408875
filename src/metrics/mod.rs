pub mod exposition;
pub mod registry;

use std::fmt;

pub use registry::{MetricsRegistry, MetricsSnapshot};

/// Identity of one per-route series.
/// The middleware builds one per response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// e.g. "GET"
    pub method: String,
    /// Matched route template ("/api/info"), or the raw path when nothing matched
    pub route: String,
    /// Final response status code
    pub status: u16,
}

impl RouteKey {
    pub fn new(method: impl Into<String>, route: impl Into<String>, status: u16) -> Self {
        Self {
            method: method.into(),
            route: route.into(),
            status,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Renders the exposition label value, e.g. `GET_/health_200`.
impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.method, self.route, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_joins_fields_with_underscores() {
        let key = RouteKey::new("GET", "/api/info", 200);
        assert_eq!(key.to_string(), "GET_/api/info_200");
    }

    #[test]
    fn underscores_in_routes_do_not_collide() {
        // Same label text, different identities.
        let a = RouteKey::new("GET", "/a_b", 200);
        let b = RouteKey::new("GET_/a", "b", 200);
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn error_classification_starts_at_400() {
        assert!(!RouteKey::new("GET", "/", 399).is_error());
        assert!(RouteKey::new("GET", "/", 400).is_error());
        assert!(RouteKey::new("GET", "/", 503).is_error());
    }
}
