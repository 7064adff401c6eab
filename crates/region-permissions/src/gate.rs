//! Bypass gate.
//!
//! When bypass is engaged every check answers with the configured forced
//! value instead of evaluating rules. The gate also owns the diagnostic
//! per-check logging switch.

use crate::config::EngineConfig;

/// Read-only view of the bypass and debug settings of one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BypassGate<'a> {
    config: &'a EngineConfig,
    region_name: &'a str,
}

impl<'a> BypassGate<'a> {
    /// Create a gate over a snapshot.
    pub fn new(config: &'a EngineConfig, region_name: &'a str) -> Self {
        Self {
            config,
            region_name,
        }
    }

    /// Whether bypass is engaged, and the outcome it forces.
    ///
    /// # Returns
    ///
    /// `(engaged, outcome)`; `outcome` is only meaningful when `engaged`
    pub fn should_bypass(&self) -> (bool, bool) {
        (self.config.bypass_enabled, self.config.bypass_value)
    }

    /// The forced outcome, if bypass is engaged.
    pub fn forced_outcome(&self) -> Option<bool> {
        self.config
            .bypass_enabled
            .then_some(self.config.bypass_value)
    }

    /// Record that a check ran. No-op unless debug logging is on.
    pub fn log(&self, check: &str) {
        if self.config.debug_logging {
            tracing::debug!(check = check, region = self.region_name, "Permission check called");
        }
    }
}

/// Derive a snapshot with a new forced outcome.
///
/// # Returns
///
/// `None` when bypass is not engaged; forcing is only meaningful while it is
pub fn force(config: &EngineConfig, value: bool) -> Option<EngineConfig> {
    config
        .bypass_enabled
        .then(|| config.with_bypass_value(value))
}
