//! Object and communication permissions.
//!
//! [`generic_object_permission`](PermissionContext::generic_object_permission)
//! folds the whole authority chain into a single decision. Each step may
//! override the ones before it, so the order below is significant:
//!
//! 1. missing or non-object targets are denied
//! 2. a locked object denies non-administrators when `deny_on_locked` is set
//! 3. the owner is granted
//! 4. attachments are revoked
//! 5. the owner of the parcel under the object is granted
//! 6. estate managers are granted
//! 7. objects owned by an administrator are revoked
//! 8. administrators are granted

use uuid::Uuid;

use crate::context::PermissionContext;

const COMMUNICATION_DENIED: &str = "Only registered users may communicate with another account.";

impl PermissionContext<'_> {
    /// Whether `actor` may act on the object `object_id`.
    pub fn generic_object_permission(&self, actor: Uuid, object_id: Uuid, deny_on_locked: bool) -> bool {
        let Some(object) = self.world().scene_object(object_id) else {
            return false;
        };

        if deny_on_locked && object.is_locked() && !self.is_administrator(actor) {
            return false;
        }

        let mut permission = actor == object.owner_id;

        if object.is_attachment {
            permission = false;
        }

        if let Some(parcel) = self.world().parcel_at(object.position) {
            if parcel.owner_id == actor {
                permission = true;
            }
        }

        if self.is_estate_manager(actor) {
            permission = true;
        }

        if self.is_administrator(object.owner_id) {
            permission = false;
        }

        if self.is_administrator(actor) {
            permission = true;
        }

        permission
    }

    /// Whether `user` may send something to `target`.
    ///
    /// Open to everyone for now. Administrators and estate managers are
    /// always allowed; a denial is reported to `user` through the scene.
    pub fn generic_communication_permission(&self, user: Uuid, target: Uuid) -> bool {
        let mut permission = ordinary_user_may_communicate(user, target);

        if !permission && (self.is_administrator(user) || self.is_estate_manager(user)) {
            permission = true;
        }

        if !permission {
            self.world().scene.notify_permission_error(user, COMMUNICATION_DENIED);
        }

        permission
    }
}

fn ordinary_user_may_communicate(_user: Uuid, _target: Uuid) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::masks::PermissionMask;
    use crate::memory::InMemoryWorld;
    use crate::world::{ObjectPart, Parcel, SceneObject, Vector3, World};
    use region_estate::{EstateSettings, RegionInfo};
    use std::sync::Arc;

    struct Fixture {
        memory: Arc<InMemoryWorld>,
        world: World,
        region: RegionInfo,
        estate_owner: Uuid,
        manager: Uuid,
    }

    fn fixture() -> Fixture {
        let memory = Arc::new(InMemoryWorld::new());
        let estate_owner = Uuid::now_v7();
        let manager = Uuid::now_v7();
        Fixture {
            world: World::from_shared(memory.clone()),
            memory,
            region: RegionInfo::new("Test", EstateSettings::new(estate_owner).with_manager(manager)),
            estate_owner,
            manager,
        }
    }

    fn object(memory: &InMemoryWorld, owner: Uuid) -> Uuid {
        let mut root = ObjectPart::new(Uuid::now_v7(), owner);
        root.position = Vector3::new(10.0, 10.0, 20.0);
        let object = SceneObject::new(root);
        let id = object.id();
        memory.add_object(object);
        id
    }

    #[test]
    fn test_owner_may_act() {
        let f = fixture();
        let owner = Uuid::now_v7();
        let id = object(&f.memory, owner);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(ctx.generic_object_permission(owner, id, false));
        assert!(!ctx.generic_object_permission(Uuid::now_v7(), id, false));
    }

    #[test]
    fn test_missing_and_non_object_targets_denied() {
        let f = fixture();
        let avatar = Uuid::now_v7();
        f.memory.add_presence(avatar);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(!ctx.generic_object_permission(f.estate_owner, Uuid::now_v7(), false));
        assert!(!ctx.generic_object_permission(f.estate_owner, avatar, false));
    }

    #[test]
    fn test_parcel_owner_may_act_on_objects_over_their_land() {
        let f = fixture();
        let parcel_owner = Uuid::now_v7();
        f.memory.add_parcel((0.0, 0.0), (64.0, 64.0), Parcel::new(1, parcel_owner));
        let id = object(&f.memory, Uuid::now_v7());
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(ctx.generic_object_permission(parcel_owner, id, false));
    }

    #[test]
    fn test_attachment_revokes_owner() {
        let f = fixture();
        let owner = Uuid::now_v7();
        let id = object(&f.memory, owner);
        let mut attached = f.world.scene_object(id).unwrap();
        attached.is_attachment = true;
        f.memory.add_object(attached);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(!ctx.generic_object_permission(owner, id, false));
        assert!(ctx.generic_object_permission(f.manager, id, false));
    }

    #[test]
    fn test_locked_object_denies_owner_and_manager() {
        let f = fixture();
        let owner = Uuid::now_v7();
        let id = object(&f.memory, owner);
        let mut locked = f.world.scene_object(id).unwrap();
        locked.root.owner_mask = PermissionMask::COPY | PermissionMask::TRANSFER;
        f.memory.add_object(locked);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(!ctx.generic_object_permission(owner, id, true));
        assert!(!ctx.generic_object_permission(f.manager, id, true));
        assert!(ctx.generic_object_permission(f.estate_owner, id, true));
        assert!(ctx.generic_object_permission(owner, id, false));
    }

    #[test]
    fn test_admin_objects_are_inviolable() {
        let f = fixture();
        let master = Uuid::now_v7();
        let region = f.region.clone().with_master_avatar(master);
        let id = object(&f.memory, f.estate_owner);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &region, &f.world);

        assert!(!ctx.generic_object_permission(f.manager, id, false));
        assert!(ctx.generic_object_permission(master, id, false));
    }

    #[test]
    fn test_communication_is_open() {
        let f = fixture();
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(ctx.generic_communication_permission(Uuid::now_v7(), Uuid::now_v7()));
        assert!(f.memory.permission_errors().is_empty());
    }
}
