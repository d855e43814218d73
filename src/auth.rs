//! Static shared-secret check gating every operation.

use crate::error::{Result, RoundupError};
use log::{debug, warn};

/// Compares a presented API key against the configured one.
///
/// A guard built without a key, or with a blank one, lets every request
/// through.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGuard {
    configured: Option<String>,
}

impl ApiKeyGuard {
    pub fn new(configured: Option<String>) -> Self {
        ApiKeyGuard {
            configured: configured.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Returns `true` if a key is configured and requests are checked.
    pub fn is_enabled(&self) -> bool {
        self.configured.is_some()
    }

    /// Accepts the request if the check is disabled or `presented` matches
    /// the configured key exactly.
    pub fn authorize(&self, presented: Option<&str>) -> Result<()> {
        let Some(expected) = self.configured.as_deref() else {
            debug!("No API key configured, skipping check");
            return Ok(());
        };

        if presented == Some(expected) {
            return Ok(());
        }

        warn!(
            "Rejected request due to {} API key",
            if presented.is_some() { "invalid" } else { "missing" }
        );
        Err(RoundupError::Unauthorized)
    }
}
