//! Engine configuration.
//!
//! [`EngineConfig`] is an immutable snapshot read by every evaluation.
//! Startup values come from [`StartupConfig`]; operator commands derive a new
//! snapshot and swap it into a [`ConfigHandle`], so readers always observe a
//! complete, previously committed configuration.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use region_estate::UserSet;

use crate::error::ConfigError;

/// Immutable permission engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Skip rule evaluation and answer every check with `bypass_value`.
    pub bypass_enabled: bool,

    /// Answer returned while bypass is engaged.
    pub bypass_value: bool,

    /// Whether permissions propagate to copies handed to other users.
    pub propagate_enabled: bool,

    /// Treat users whose profile god level is at least 200 as administrators.
    pub allow_grid_gods: bool,

    /// Treat the region's master avatar as an administrator. Also lets estate
    /// managers see owner-level client flags.
    pub region_owner_is_god: bool,

    /// Let parcel owners see owner-level client flags for objects over their land.
    pub parcel_owner_is_god: bool,

    /// Who may create scripts.
    pub allowed_script_creators: UserSet,

    /// Who may save edited scripts.
    pub allowed_script_editors: UserSet,

    /// Log every permission check at debug level.
    pub debug_logging: bool,

    /// Budget for a single remote profile lookup, in milliseconds.
    pub profile_lookup_timeout_ms: u64,
}

impl Default for EngineConfig {
    /// Returns the values used when no startup keys are set.
    fn default() -> Self {
        Self {
            bypass_enabled: false,
            bypass_value: true,
            propagate_enabled: true,
            allow_grid_gods: false,
            region_owner_is_god: true,
            parcel_owner_is_god: true,
            allowed_script_creators: UserSet::All,
            allowed_script_editors: UserSet::All,
            debug_logging: false,
            profile_lookup_timeout_ms: 5_000,
        }
    }
}

impl EngineConfig {
    /// Build a snapshot from startup keys, logging and skipping invalid values.
    pub fn from_startup(startup: &StartupConfig) -> Self {
        let (config, errors) = Self::parse_startup(startup);
        for error in &errors {
            tracing::error!(error = %error, "Invalid permissions setting, keeping default");
        }
        config
    }

    /// Build a snapshot from startup keys.
    ///
    /// Every invalid value keeps its default and is reported in the returned
    /// error list; parsing never stops early.
    pub fn parse_startup(startup: &StartupConfig) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let mut errors = Vec::new();

        let mut bool_key = |key: &str, raw: &Option<String>, default: bool| -> bool {
            match raw.as_deref().map(|value| parse_bool(key, value)) {
                Some(Ok(value)) => value,
                Some(Err(err)) => {
                    errors.push(err);
                    default
                }
                None => default,
            }
        };

        let allow_grid_gods = bool_key(
            "allow_grid_gods",
            &startup.allow_grid_gods,
            defaults.allow_grid_gods,
        );
        let serverside = bool_key(
            "serverside_object_permissions",
            &startup.serverside_object_permissions,
            !defaults.bypass_enabled,
        );
        let propagate_enabled = bool_key(
            "propagate_permissions",
            &startup.propagate_permissions,
            defaults.propagate_enabled,
        );
        let region_owner_is_god = bool_key(
            "region_owner_is_god",
            &startup.region_owner_is_god,
            defaults.region_owner_is_god,
        );
        let parcel_owner_is_god = bool_key(
            "parcel_owner_is_god",
            &startup.parcel_owner_is_god,
            defaults.parcel_owner_is_god,
        );

        let mut user_set_key = |key: &str, raw: &Option<String>, default: UserSet| -> UserSet {
            let value = match raw.as_deref() {
                None => default,
                Some(value) => UserSet::parse(value).unwrap_or_else(|| {
                    errors.push(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                    default
                }),
            };
            tracing::debug!(setting = key, value = %value, "Permissions user set");
            value
        };

        let allowed_script_creators = user_set_key(
            "allowed_script_creators",
            &startup.allowed_script_creators,
            defaults.allowed_script_creators,
        );
        let allowed_script_editors = user_set_key(
            "allowed_script_editors",
            &startup.allowed_script_editors,
            defaults.allowed_script_editors,
        );

        let profile_lookup_timeout_ms = match startup.profile_lookup_timeout_ms.as_deref() {
            None => defaults.profile_lookup_timeout_ms,
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                errors.push(ConfigError::InvalidValue {
                    key: "profile_lookup_timeout_ms".to_string(),
                    value: value.to_string(),
                });
                defaults.profile_lookup_timeout_ms
            }),
        };

        let config = Self {
            bypass_enabled: !serverside,
            allow_grid_gods,
            propagate_enabled,
            region_owner_is_god,
            parcel_owner_is_god,
            allowed_script_creators,
            allowed_script_editors,
            profile_lookup_timeout_ms,
            ..defaults
        };

        if config.bypass_enabled {
            tracing::info!(
                "serverside_object_permissions = false, disabling all region permission checks"
            );
        } else {
            tracing::debug!("Enabling all region permission checks");
        }

        (config, errors)
    }

    /// Profile lookup budget as a Duration.
    pub fn profile_timeout(&self) -> Duration {
        Duration::from_millis(self.profile_lookup_timeout_ms)
    }

    /// Copy of this snapshot with bypass switched on or off.
    pub fn with_bypass(&self, enabled: bool) -> Self {
        Self {
            bypass_enabled: enabled,
            ..self.clone()
        }
    }

    /// Copy of this snapshot with a new forced outcome.
    pub fn with_bypass_value(&self, value: bool) -> Self {
        Self {
            bypass_value: value,
            ..self.clone()
        }
    }

    /// Copy of this snapshot with debug logging switched on or off.
    pub fn with_debug_logging(&self, enabled: bool) -> Self {
        Self {
            debug_logging: enabled,
            ..self.clone()
        }
    }
}

/// Raw startup keys, as read from the region's startup configuration.
///
/// Every key is optional; missing keys take the [`EngineConfig`] default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupConfig {
    pub allow_grid_gods: Option<String>,
    /// Inverted into `bypass_enabled`.
    pub serverside_object_permissions: Option<String>,
    pub propagate_permissions: Option<String>,
    pub region_owner_is_god: Option<String>,
    pub parcel_owner_is_god: Option<String>,
    /// `All`, `Administrators` or `gods`, case-insensitive.
    pub allowed_script_creators: Option<String>,
    /// `All`, `Administrators` or `gods`, case-insensitive.
    pub allowed_script_editors: Option<String>,
    pub profile_lookup_timeout_ms: Option<String>,
}

impl StartupConfig {
    /// Load startup keys from environment variables.
    ///
    /// Environment variables (upper-cased key names):
    /// - `ALLOW_GRID_GODS`
    /// - `SERVERSIDE_OBJECT_PERMISSIONS`
    /// - `PROPAGATE_PERMISSIONS`
    /// - `REGION_OWNER_IS_GOD`
    /// - `PARCEL_OWNER_IS_GOD`
    /// - `ALLOWED_SCRIPT_CREATORS`
    /// - `ALLOWED_SCRIPT_EDITORS`
    /// - `PROFILE_LOOKUP_TIMEOUT_MS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load startup keys through `lookup`, keyed by upper-cased key name.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            allow_grid_gods: lookup("ALLOW_GRID_GODS"),
            serverside_object_permissions: lookup("SERVERSIDE_OBJECT_PERMISSIONS"),
            propagate_permissions: lookup("PROPAGATE_PERMISSIONS"),
            region_owner_is_god: lookup("REGION_OWNER_IS_GOD"),
            parcel_owner_is_god: lookup("PARCEL_OWNER_IS_GOD"),
            allowed_script_creators: lookup("ALLOWED_SCRIPT_CREATORS"),
            allowed_script_editors: lookup("ALLOWED_SCRIPT_EDITORS"),
            profile_lookup_timeout_ms: lookup("PROFILE_LOOKUP_TIMEOUT_MS"),
        }
    }
}

/// Parse a boolean setting, case-insensitively.
pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Shared, atomically replaceable configuration.
///
/// Readers take a cheap `Arc` clone of the current snapshot; writers build a
/// complete new snapshot under the write lock and swap it in.
#[derive(Debug)]
pub struct ConfigHandle {
    current: RwLock<Arc<EngineConfig>>,
}

impl ConfigHandle {
    /// Create a handle holding `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The currently committed snapshot.
    pub fn load(&self) -> Arc<EngineConfig> {
        self.current.read().clone()
    }

    /// Replace the snapshot, returning the previous one.
    pub fn replace(&self, config: EngineConfig) -> Arc<EngineConfig> {
        std::mem::replace(&mut *self.current.write(), Arc::new(config))
    }

    /// Derive and commit a new snapshot from the current one.
    ///
    /// Concurrent updates are serialized; each sees the previous update's
    /// result.
    pub fn update<F>(&self, f: F) -> Arc<EngineConfig>
    where
        F: FnOnce(&EngineConfig) -> EngineConfig,
    {
        let mut guard = self.current.write();
        let next = Arc::new(f(&guard));
        *guard = next.clone();
        next
    }

    /// Like [`update`](Self::update), but `f` may decline by returning `None`,
    /// in which case the current snapshot stays in place.
    pub fn try_update<F>(&self, f: F) -> Option<Arc<EngineConfig>>
    where
        F: FnOnce(&EngineConfig) -> Option<EngineConfig>,
    {
        let mut guard = self.current.write();
        let next = Arc::new(f(&guard)?);
        *guard = next.clone();
        Some(next)
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
