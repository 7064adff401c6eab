//! User profiles
//!
//! Profiles are fetched from the (possibly remote) user service. The only
//! field the permission engine cares about is the god level.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// God level carried on a user profile.
///
/// Levels at or above [`GodLevel::ADMINISTRATOR`] grant grid-wide
/// administrator status when grid gods are allowed.
///
/// # Examples
///
/// ```
/// use region_estate::GodLevel;
///
/// assert!(GodLevel(200).is_administrator());
/// assert!(GodLevel(250).is_administrator());
/// assert!(!GodLevel(199).is_administrator());
/// ```
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct GodLevel(pub u32);

impl GodLevel {
    /// Ordinary user.
    pub const NONE: GodLevel = GodLevel(0);

    /// Minimum level treated as a grid administrator.
    pub const ADMINISTRATOR: GodLevel = GodLevel(200);

    /// Check if this level grants administrator status.
    pub fn is_administrator(&self) -> bool {
        *self >= Self::ADMINISTRATOR
    }
}

/// A user profile as returned by the user service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// User ID
    pub user_id: Uuid,

    /// God level
    #[serde(default)]
    pub god_level: GodLevel,
}

impl UserProfile {
    /// Creates a profile for an ordinary user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            god_level: GodLevel::NONE,
        }
    }

    /// Builder-style helper that sets the god level.
    pub fn with_god_level(mut self, level: u32) -> Self {
        self.god_level = GodLevel(level);
        self
    }
}
