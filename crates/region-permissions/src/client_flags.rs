//! Client permission flags.
//!
//! The client is told what it may do with an object through capability bits
//! in the object flags. Those bits are never stored: they are stripped from
//! the part's flags and rebuilt for each viewer from the owner or everyone
//! permission mask.

use uuid::Uuid;

use crate::context::PermissionContext;
use crate::masks::{apply_object_modify_masks, ObjectFlags};
use crate::world::ObjectPart;

/// The two candidate flag sets a viewer can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CandidateFlags {
    owner: ObjectFlags,
    everyone: ObjectFlags,
}

impl CandidateFlags {
    fn for_part(part: &ObjectPart) -> Self {
        let base = part.object_flags.difference(ObjectFlags::TEMPORARY_CAPABILITIES);

        let owner = apply_object_modify_masks(part.owner_mask, base) | ObjectFlags::OWNERSHIP;

        let mut everyone = apply_object_modify_masks(part.everyone_mask, base);
        // Movable-by-everyone implies modifiable until group permissions exist.
        if everyone.contains(ObjectFlags::OBJECT_MOVE) {
            everyone |= ObjectFlags::OBJECT_MODIFY;
        }

        Self { owner, everyone }
    }
}

impl PermissionContext<'_> {
    /// Compute the object flags `viewer` is told about for a part.
    ///
    /// First match wins:
    /// 1. bypass engaged: owner flags
    /// 2. viewer owns the part: owner flags
    /// 3. viewer owns the parcel under the part and `parcel_owner_is_god`: owner flags
    /// 4. part owned by an administrator: everyone flags
    /// 5. viewer is an estate manager and `region_owner_is_god`: owner flags
    /// 6. viewer is an administrator: owner flags
    /// 7. everyone flags
    ///
    /// An unknown part yields empty flags.
    pub fn generate_client_flags(&self, viewer: Uuid, object_id: Uuid) -> ObjectFlags {
        let Some(part) = self.world().scene.part(object_id) else {
            return ObjectFlags::empty();
        };

        let candidates = CandidateFlags::for_part(&part);
        let config = self.config();

        if config.bypass_enabled {
            return candidates.owner;
        }

        if viewer == part.owner_id {
            return candidates.owner;
        }

        if config.parcel_owner_is_god {
            if let Some(parcel) = self.world().parcel_at(part.position) {
                if parcel.owner_id == viewer {
                    return candidates.owner;
                }
            }
        }

        if self.is_administrator(part.owner_id) {
            return candidates.everyone;
        }

        if config.region_owner_is_god && self.is_estate_manager(viewer) {
            return candidates.owner;
        }

        if self.is_administrator(viewer) {
            return candidates.owner;
        }

        candidates.everyone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::masks::PermissionMask;
    use crate::memory::InMemoryWorld;
    use crate::world::{Parcel, SceneObject, Vector3, World};
    use region_estate::{EstateSettings, RegionInfo};
    use std::sync::Arc;

    fn part(owner: Uuid) -> ObjectPart {
        let mut part = ObjectPart::new(Uuid::now_v7(), owner);
        part.owner_mask = PermissionMask::COPY | PermissionMask::MODIFY | PermissionMask::MOVE;
        part.everyone_mask = PermissionMask::COPY;
        part.object_flags = ObjectFlags::PHYSICS | ObjectFlags::OBJECT_TRANSFER;
        part.position = Vector3::new(10.0, 10.0, 0.0);
        part
    }

    #[test]
    fn test_candidates_strip_stored_capabilities() {
        let candidates = CandidateFlags::for_part(&part(Uuid::now_v7()));

        assert_eq!(
            candidates.owner,
            ObjectFlags::PHYSICS
                | ObjectFlags::OBJECT_COPY
                | ObjectFlags::OBJECT_MODIFY
                | ObjectFlags::OBJECT_MOVE
                | ObjectFlags::OWNERSHIP
        );
        assert_eq!(candidates.everyone, ObjectFlags::PHYSICS | ObjectFlags::OBJECT_COPY);
    }

    #[test]
    fn test_everyone_move_implies_modify() {
        let mut p = part(Uuid::now_v7());
        p.everyone_mask = PermissionMask::MOVE;
        let candidates = CandidateFlags::for_part(&p);

        assert!(candidates.everyone.contains(ObjectFlags::OBJECT_MOVE | ObjectFlags::OBJECT_MODIFY));
        assert!(!candidates.everyone.contains(ObjectFlags::OBJECT_YOU_OWNER));
    }

    #[test]
    fn test_resolution_order() {
        let memory = Arc::new(InMemoryWorld::new());
        let world = World::from_shared(memory.clone());
        let estate_owner = Uuid::now_v7();
        let manager = Uuid::now_v7();
        let parcel_owner = Uuid::now_v7();
        let owner = Uuid::now_v7();
        let region = RegionInfo::new("Test", EstateSettings::new(estate_owner).with_manager(manager));
        memory.add_parcel((0.0, 0.0), (64.0, 64.0), Parcel::new(1, parcel_owner));

        let p = part(owner);
        let id = p.id;
        let candidates = CandidateFlags::for_part(&p);
        memory.add_object(SceneObject::new(p));

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &region, &world);
        assert_eq!(ctx.generate_client_flags(owner, id), candidates.owner);
        assert_eq!(ctx.generate_client_flags(parcel_owner, id), candidates.owner);
        assert_eq!(ctx.generate_client_flags(manager, id), candidates.owner);
        assert_eq!(ctx.generate_client_flags(estate_owner, id), candidates.owner);
        assert_eq!(ctx.generate_client_flags(Uuid::now_v7(), id), candidates.everyone);

        let config = EngineConfig {
            parcel_owner_is_god: false,
            region_owner_is_god: false,
            ..EngineConfig::default()
        };
        let ctx = PermissionContext::new(&config, &region, &world);
        assert_eq!(ctx.generate_client_flags(parcel_owner, id), candidates.everyone);
        assert_eq!(ctx.generate_client_flags(manager, id), candidates.everyone);
    }

    #[test]
    fn test_admin_owned_part_shows_everyone_flags_to_manager() {
        let memory = Arc::new(InMemoryWorld::new());
        let world = World::from_shared(memory.clone());
        let estate_owner = Uuid::now_v7();
        let manager = Uuid::now_v7();
        let region = RegionInfo::new("Test", EstateSettings::new(estate_owner).with_manager(manager));

        let p = part(estate_owner);
        let id = p.id;
        let candidates = CandidateFlags::for_part(&p);
        memory.add_object(SceneObject::new(p));

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &region, &world);
        assert_eq!(ctx.generate_client_flags(manager, id), candidates.everyone);
    }
}
