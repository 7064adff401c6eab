//! Identity hierarchy.
//!
//! Resolves whether an identity is an administrator (god) or an estate
//! manager of the current region.

use uuid::Uuid;

use crate::context::PermissionContext;

impl PermissionContext<'_> {
    /// Whether `user` holds administrator authority in this region.
    ///
    /// In order:
    /// 1. the region's master avatar, when `region_owner_is_god` is set
    /// 2. the estate owner
    /// 3. when `allow_grid_gods` is set, a user whose profile reports a god
    ///    level of at least [`GodLevel::ADMINISTRATOR`](region_estate::GodLevel::ADMINISTRATOR)
    ///
    /// A failed profile lookup is logged and counts as "not administrator".
    pub fn is_administrator(&self, user: Uuid) -> bool {
        let config = self.config();
        let region = self.region();

        if config.region_owner_is_god && region.is_master_avatar(user) {
            return true;
        }

        if region.estate.is_estate_owner(user) {
            return true;
        }

        if config.allow_grid_gods {
            match self.world().users.profile(user, config.profile_timeout()) {
                Ok(Some(profile)) => return profile.god_level.is_administrator(),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        user_id = %user,
                        region = %region.region_name,
                        error = %e,
                        "Profile lookup failed, treating user as non-administrator"
                    );
                }
            }
        }

        false
    }

    /// Whether `user` is a manager of this region's estate.
    pub fn is_estate_manager(&self, user: Uuid) -> bool {
        self.region().estate.is_estate_manager(user)
    }

    /// Whether `user` owns this region's estate.
    pub fn is_estate_owner(&self, user: Uuid) -> bool {
        self.region().estate.is_estate_owner(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::LookupError;
    use crate::memory::InMemoryWorld;
    use crate::world::World;
    use region_estate::{EstateSettings, RegionInfo, UserProfile};
    use std::sync::Arc;

    struct Fixture {
        memory: Arc<InMemoryWorld>,
        world: World,
        region: RegionInfo,
        owner: Uuid,
        master: Uuid,
    }

    fn fixture() -> Fixture {
        let memory = Arc::new(InMemoryWorld::new());
        let owner = Uuid::now_v7();
        let master = Uuid::now_v7();
        let region = RegionInfo::new("Test", EstateSettings::new(owner)).with_master_avatar(master);
        Fixture {
            world: World::from_shared(memory.clone()),
            memory,
            region,
            owner,
            master,
        }
    }

    #[test]
    fn test_estate_owner_is_administrator() {
        let f = fixture();
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(ctx.is_administrator(f.owner));
        assert!(!ctx.is_administrator(Uuid::now_v7()));
    }

    #[test]
    fn test_master_avatar_requires_region_owner_is_god() {
        let f = fixture();
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(ctx.is_administrator(f.master));

        let config = EngineConfig {
            region_owner_is_god: false,
            ..EngineConfig::default()
        };
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(!ctx.is_administrator(f.master));
    }

    #[test]
    fn test_grid_gods_by_profile() {
        let f = fixture();
        let god = Uuid::now_v7();
        let mortal = Uuid::now_v7();
        f.memory.set_profile(UserProfile::new(god).with_god_level(250));
        f.memory.set_profile(UserProfile::new(mortal).with_god_level(100));

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(!ctx.is_administrator(god));

        let config = EngineConfig {
            allow_grid_gods: true,
            ..EngineConfig::default()
        };
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(ctx.is_administrator(god));
        assert!(!ctx.is_administrator(mortal));
    }

    #[test]
    fn test_profile_lookup_failure_is_not_administrator() {
        let f = fixture();
        let user = Uuid::now_v7();
        f.memory.fail_profile(user, LookupError::Timeout { timeout_ms: 5000 });

        let config = EngineConfig {
            allow_grid_gods: true,
            ..EngineConfig::default()
        };
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(!ctx.is_administrator(user));
    }

    #[test]
    fn test_estate_manager_membership() {
        let mut f = fixture();
        let manager = Uuid::now_v7();
        f.region.estate.add_manager(manager);

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(ctx.is_estate_manager(manager));
        assert!(!ctx.is_administrator(manager));
        assert!(!ctx.is_estate_manager(f.master));
    }
}
