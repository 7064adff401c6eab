//! Configurable user sets
//!
//! A user set names a class of users that a region-wide policy applies to,
//! such as who may create or save scripts.

use serde::{Deserialize, Serialize};

/// A class of users selected by configuration.
///
/// # Examples
///
/// ```
/// use region_estate::UserSet;
///
/// assert_eq!(UserSet::parse("administrators"), Some(UserSet::Administrators));
/// assert_eq!(UserSet::parse("Gods"), Some(UserSet::Administrators));
/// assert_eq!(UserSet::parse("ALL"), Some(UserSet::All));
/// assert_eq!(UserSet::parse("wizards"), None);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserSet {
    /// Every user
    #[default]
    All,

    /// Only administrators (gods)
    Administrators,
}

impl UserSet {
    /// Parse a user set from its configuration value.
    ///
    /// Matching is case-insensitive. `gods` is accepted as a synonym for
    /// `Administrators`.
    ///
    /// # Returns
    ///
    /// `Some(UserSet)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "administrators" | "gods" => Some(Self::Administrators),
            _ => None,
        }
    }

    /// Get the configuration name of the set.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Administrators => "Administrators",
        }
    }

    /// Whether membership is restricted to administrators.
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Administrators)
    }
}

impl std::fmt::Display for UserSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
