//! Client configuration and the process-wide default auth token.
//!
//! A single-user program can export `TODOIST_AUTH_TOKEN` and never pass a
//! token explicitly; clients without their own token fall back to it.

use std::sync::{LazyLock, PoisonError, RwLock};

pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v1";
pub const AUTH_TOKEN_ENV: &str = "TODOIST_AUTH_TOKEN";

static DEFAULT_TOKEN: LazyLock<RwLock<Option<String>>> = LazyLock::new(|| RwLock::new(token_from_env()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub auth_token: Option<String>,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Default base URL plus whatever token the environment provides.
    pub fn from_env() -> Self {
        Self {
            auth_token: token_from_env(),
            ..Self::default()
        }
    }
}

fn token_from_env() -> Option<String> {
    std::env::var(AUTH_TOKEN_ENV).ok().filter(|t| !t.is_empty())
}

/// The token used when a call carries none of its own.
pub fn default_token() -> Option<String> {
    DEFAULT_TOKEN
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide default token. Empty strings clear it.
pub fn set_default_token(token: Option<String>) {
    let token = token.filter(|t| !t.is_empty());
    log::debug!("default auth token {}", if token.is_some() { "set" } else { "cleared" });
    *DEFAULT_TOKEN.write().unwrap_or_else(PoisonError::into_inner) = token;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_points_at_rest_v1() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.todoist.com/rest/v1");
        assert!(config.auth_token.is_none());
    }

    #[test]
    #[serial]
    fn from_env_reads_token() {
        std::env::set_var(AUTH_TOKEN_ENV, "abc123");
        assert_eq!(Config::from_env().auth_token.as_deref(), Some("abc123"));
        std::env::set_var(AUTH_TOKEN_ENV, "");
        assert!(Config::from_env().auth_token.is_none());
        std::env::remove_var(AUTH_TOKEN_ENV);
        assert!(Config::from_env().auth_token.is_none());
    }

    #[test]
    #[serial]
    fn set_default_token_overrides_and_clears() {
        let saved = default_token();

        set_default_token(Some("override".to_string()));
        assert_eq!(default_token().as_deref(), Some("override"));

        set_default_token(Some(String::new()));
        assert!(default_token().is_none());

        set_default_token(saved);
    }
}
