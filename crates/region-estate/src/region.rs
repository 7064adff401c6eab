//! Region identity
//!
//! A region is a single simulated area of the world. It belongs to exactly one
//! estate and may have a master avatar (the region owner) assigned to it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::estate::EstateSettings;

/// Region information consulted by the permission engine.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use region_estate::{EstateSettings, RegionInfo};
///
/// let master = Uuid::now_v7();
/// let region = RegionInfo::new("Sandbox", EstateSettings::default())
///     .with_master_avatar(master);
///
/// assert!(region.is_master_avatar(master));
/// assert_eq!(region.region_name, "Sandbox");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionInfo {
    /// Region identifier
    pub region_id: Uuid,

    /// Region name, used in log output
    pub region_name: String,

    /// Master avatar assigned to the region (nil when unassigned)
    #[serde(default)]
    pub master_avatar: Uuid,

    /// Estate the region belongs to
    #[serde(default)]
    pub estate: EstateSettings,
}

impl RegionInfo {
    /// Creates region info with a fresh region id and no master avatar.
    pub fn new(region_name: impl Into<String>, estate: EstateSettings) -> Self {
        Self {
            region_id: Uuid::now_v7(),
            region_name: region_name.into(),
            master_avatar: Uuid::nil(),
            estate,
        }
    }

    /// Builder-style helper that assigns the master avatar.
    pub fn with_master_avatar(mut self, master_avatar: Uuid) -> Self {
        self.master_avatar = master_avatar;
        self
    }

    /// Whether a master avatar is assigned.
    pub fn has_master_avatar(&self) -> bool {
        !self.master_avatar.is_nil()
    }

    /// Check if `user` is the region's assigned master avatar.
    pub fn is_master_avatar(&self, user: Uuid) -> bool {
        self.has_master_avatar() && self.master_avatar == user
    }
}
