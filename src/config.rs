//! Environment-driven configuration.
//!
//! `RUST_LOG` is read directly by `env_logger`; everything else lives here.

use crate::auth::ApiKeyGuard;
use std::env;

/// Variable holding the shared secret requests must present.
pub const API_KEY_VAR: &str = "ROUNDUP_API_KEY";

/// Runtime settings.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Configured shared secret; `None` disables the access check.
    pub api_key: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            api_key: lookup(API_KEY_VAR),
        }
    }

    /// Builds the access guard for this configuration.
    pub fn guard(&self) -> ApiKeyGuard {
        ApiKeyGuard::new(self.api_key.clone())
    }
}
