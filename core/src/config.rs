//! API configuration resolved once at application startup.
//!
//! # Design
//! The base URL is an explicitly constructed value handed to `HttpClient`,
//! not a module-level global. The only external input is the build-time
//! `GREETINGS_API_BASE_URL` variable; an empty base means request paths are
//! used as-is, relative to whatever origin the transport is bound to.

/// Where the greetings API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Normalizes the base URL: surrounding whitespace and a trailing slash
    /// are stripped so paths can always be appended verbatim.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Reads `GREETINGS_API_BASE_URL` captured at compile time, falling back
    /// to same-origin paths. Logs the resolved base once.
    pub fn from_build_env() -> Self {
        let config = Self::new(option_env!("GREETINGS_API_BASE_URL").unwrap_or(""));
        tracing::info!(base = config.label(), "greetings API base resolved");
        config
    }

    /// Empty when requests are same-origin relative.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Human-readable form of the base for logs and headers.
    pub fn label(&self) -> &str {
        if self.base_url.is_empty() {
            "(same-origin)"
        } else {
            &self.base_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ApiConfig::new("http://localhost:3000/");
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn whitespace_is_trimmed() {
        let config = ApiConfig::new("  http://localhost:3000 ");
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn empty_base_means_same_origin() {
        let config = ApiConfig::new("   ");
        assert_eq!(config.base_url(), "");
        assert_eq!(config.label(), "(same-origin)");
    }
}
