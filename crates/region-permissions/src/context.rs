//! Per-evaluation context.
//!
//! A [`PermissionContext`] borrows one configuration snapshot, the region
//! info and the world collaborators for the duration of a single check. The
//! evaluators (identity, parcel, estate, object, client flags) are
//! implemented as methods on it so custom rules can compose them.

use region_estate::RegionInfo;

use crate::config::EngineConfig;
use crate::gate::BypassGate;
use crate::world::World;

/// Everything a permission rule can consult.
#[derive(Debug, Clone, Copy)]
pub struct PermissionContext<'a> {
    config: &'a EngineConfig,
    region: &'a RegionInfo,
    world: &'a World,
}

impl<'a> PermissionContext<'a> {
    /// Create a context over a configuration snapshot.
    pub fn new(config: &'a EngineConfig, region: &'a RegionInfo, world: &'a World) -> Self {
        Self {
            config,
            region,
            world,
        }
    }

    /// Configuration snapshot in effect for this evaluation.
    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Region being evaluated.
    pub fn region(&self) -> &'a RegionInfo {
        self.region
    }

    /// External collaborators.
    pub fn world(&self) -> &'a World {
        self.world
    }

    /// Bypass gate over this context's snapshot.
    pub fn gate(&self) -> BypassGate<'a> {
        let region: &'a RegionInfo = self.region;
        BypassGate::new(self.config, region.region_name.as_str())
    }
}
