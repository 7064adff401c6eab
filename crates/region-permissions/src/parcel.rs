//! Parcel authority.

use uuid::Uuid;

use crate::context::PermissionContext;
use crate::world::{Parcel, Vector3};

impl PermissionContext<'_> {
    /// Whether `user` has authority over `parcel`.
    ///
    /// The parcel owner, estate managers and administrators qualify.
    /// Group-owned parcels grant nothing to group members yet.
    pub fn has_parcel_authority(&self, user: Uuid, parcel: &Parcel) -> bool {
        // TODO: grant group officers authority over group-owned parcels once group roles are modelled.
        parcel.owner_id == user || self.is_estate_manager(user) || self.is_administrator(user)
    }

    /// Parcel authority over whatever parcel lies under `position`.
    ///
    /// No parcel means no authority.
    pub fn parcel_authority_at(&self, user: Uuid, position: Vector3) -> bool {
        match self.world().parcel_at(position) {
            Some(parcel) => self.has_parcel_authority(user, &parcel),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::memory::InMemoryWorld;
    use crate::world::World;
    use region_estate::{EstateSettings, RegionInfo};
    use std::sync::Arc;

    #[test]
    fn test_parcel_authority_chain() {
        let memory = Arc::new(InMemoryWorld::new());
        let world = World::from_shared(memory.clone());
        let estate_owner = Uuid::now_v7();
        let manager = Uuid::now_v7();
        let parcel_owner = Uuid::now_v7();
        let region = RegionInfo::new("Test", EstateSettings::new(estate_owner).with_manager(manager));
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &region, &world);

        let parcel = Parcel::new(1, parcel_owner);
        assert!(ctx.has_parcel_authority(parcel_owner, &parcel));
        assert!(ctx.has_parcel_authority(manager, &parcel));
        assert!(ctx.has_parcel_authority(estate_owner, &parcel));
        assert!(!ctx.has_parcel_authority(Uuid::now_v7(), &parcel));
    }

    #[test]
    fn test_group_owned_parcel_grants_nothing_extra() {
        let memory = Arc::new(InMemoryWorld::new());
        let world = World::from_shared(memory.clone());
        let region = RegionInfo::new("Test", EstateSettings::new(Uuid::now_v7()));
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &region, &world);

        let group = Uuid::now_v7();
        let mut parcel = Parcel::new(1, group);
        parcel.is_group_owned = true;
        assert!(!ctx.has_parcel_authority(Uuid::now_v7(), &parcel));
    }

    #[test]
    fn test_authority_at_missing_parcel() {
        let memory = Arc::new(InMemoryWorld::new());
        let world = World::from_shared(memory.clone());
        let parcel_owner = Uuid::now_v7();
        memory.add_parcel((0.0, 0.0), (64.0, 64.0), Parcel::new(1, parcel_owner));
        let region = RegionInfo::new("Test", EstateSettings::new(Uuid::now_v7()));
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &region, &world);

        assert!(ctx.parcel_authority_at(parcel_owner, Vector3::new(10.0, 10.0, 0.0)));
        assert!(!ctx.parcel_authority_at(parcel_owner, Vector3::new(100.0, 10.0, 0.0)));
    }
}
