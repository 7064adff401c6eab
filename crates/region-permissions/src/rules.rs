//! Object, land and estate action rules.
//!
//! None of these consult the bypass gate; the engine applies it before a
//! rule runs. The one exception is [`bypass_move`](PermissionContext::bypass_move),
//! which is what bypass answers for a move.

use uuid::Uuid;

use crate::context::PermissionContext;
use crate::masks::{ParcelFlags, PermissionMask};
use crate::world::{Entity, Vector3};

/// Object positions outside this range have left the region.
const REGION_ENTRY_MIN: f32 = -1.0;
const REGION_ENTRY_MAX: f32 = 257.0;

/// Terraform positions are clamped into this range.
const TERRAIN_MAX: f32 = 255.0;

impl PermissionContext<'_> {
    /// Outcome of a move while bypass is engaged.
    ///
    /// Bypass never lets someone move an attachment worn by another avatar.
    pub fn bypass_move(&self, mover: Uuid, object_id: Uuid, forced: bool) -> bool {
        let Some(part) = self.world().scene.part(object_id) else {
            return forced;
        };

        if part.owner_id != mover {
            if let Some(Entity::Object(group)) = self.world().scene.entity(part.root_id()) {
                if !group.is_deleted && group.is_attachment {
                    return false;
                }
            }
        }

        forced
    }

    /// Whether `mover` may move an object.
    ///
    /// Objects everyone may move are movable by anyone unless locked, and an
    /// owner cannot move their own locked object.
    pub fn can_move_object(&self, mover: Uuid, object_id: Uuid) -> bool {
        let permission = self.generic_object_permission(mover, object_id, true);
        let Some(object) = self.world().scene_object(object_id) else {
            return false;
        };

        if !permission {
            let anyone_can_move = object.root.everyone_mask.contains(PermissionMask::MOVE);
            return anyone_can_move && !object.is_locked();
        }

        !(object.is_locked() && mover == object.owner_id)
    }

    /// Whether `actor` may take a copy of an object.
    pub fn can_take_copy_object(&self, actor: Uuid, object_id: Uuid) -> bool {
        let Some(object) = self.world().scene_object(object_id) else {
            return false;
        };

        let permission = self.generic_object_permission(actor, object_id, false)
            || object.root.everyone_mask.contains(PermissionMask::COPY);

        permission && object.effective_permissions().contains(PermissionMask::COPY)
    }

    /// Whether `actor` may duplicate an object at `position`.
    pub fn can_duplicate_object(
        &self,
        actor: Uuid,
        object_id: Uuid,
        object_count: usize,
        position: Vector3,
    ) -> bool {
        if !self.generic_object_permission(actor, object_id, true) {
            return false;
        }

        let Some(part) = self.world().scene.part(object_id) else {
            return false;
        };
        if !part.owner_mask.contains(PermissionMask::COPY) {
            return false;
        }

        let Some(object) = self.world().scene_object(part.root_id()) else {
            return false;
        };
        if !object.effective_permissions().contains(PermissionMask::COPY) {
            return false;
        }

        self.can_rez_object(actor, object_count, position)
    }

    /// Whether `actor` may rez objects at `position`.
    pub fn can_rez_object(&self, actor: Uuid, _object_count: usize, position: Vector3) -> bool {
        let Some(parcel) = self.world().parcel_at(position) else {
            return false;
        };

        parcel.flags.contains(ParcelFlags::CREATE_OBJECTS)
            || self.is_administrator(actor)
            || self.has_parcel_authority(actor, &parcel)
    }

    /// Whether `actor` may edit terrain at `position`.
    ///
    /// The position is clamped onto the terrain grid first.
    pub fn can_terraform(&self, actor: Uuid, position: Vector3) -> bool {
        if self.has_estate_authority(actor) {
            return true;
        }

        let clamped = Vector3::new(
            position.x.clamp(0.0, TERRAIN_MAX),
            position.y.clamp(0.0, TERRAIN_MAX),
            position.z,
        );

        let Some(parcel) = self.world().parcel_at(clamped) else {
            return false;
        };

        parcel.flags.contains(ParcelFlags::ALLOW_TERRAFORM) || self.has_parcel_authority(actor, &parcel)
    }

    /// Whether an object may enter the parcel at `new_position`.
    pub fn can_object_entry(&self, object_id: Uuid, entering_region: bool, new_position: Vector3) -> bool {
        // NaN is never outside, so it falls through to the parcel checks
        let outside = |v: f32| v < REGION_ENTRY_MIN || v > REGION_ENTRY_MAX;
        if outside(new_position.x) || outside(new_position.y) {
            return true;
        }

        let Some(object) = self.world().scene_object(object_id) else {
            return false;
        };

        let land = self.world().parcel_at(new_position);

        if !entering_region {
            let from = self.world().parcel_at(object.position);
            let same_parcel = match (&from, &land) {
                (Some(from), Some(to)) => from.is_same_parcel(to),
                (None, None) => true,
                _ => false,
            };
            if same_parcel {
                return true;
            }
        }

        let Some(land) = land else {
            return false;
        };

        if land.flags.contains(ParcelFlags::ALLOW_A_PRIMITIVE_ENTRY) {
            return true;
        }

        self.has_parcel_authority(object.owner_id, &land)
    }

    /// Whether `actor` may edit the contents of an object.
    ///
    /// Child parts are judged by their root, and only the owner qualifies.
    pub fn can_edit_object_inventory(&self, actor: Uuid, object_id: Uuid) -> bool {
        let Some(part) = self.world().scene.part(object_id) else {
            return false;
        };

        let part = if part.is_root() {
            part
        } else {
            match self.world().scene.part(part.root_id()) {
                Some(root) => root,
                None => return false,
            }
        };

        if part.owner_id != actor {
            return false;
        }

        self.generic_object_permission(actor, part.id, false)
    }

    /// Whether `actor` may reset a script inside an object.
    pub fn can_reset_script(&self, actor: Uuid, object_id: Uuid, _script_id: Uuid) -> bool {
        let root_id = match self.world().scene.part(object_id) {
            Some(part) => part.root_id(),
            None => object_id,
        };

        self.generic_object_permission(actor, root_id, false)
    }

    /// Whether `actor` may message or hand inventory to `target`.
    ///
    /// When an object sends on its owner's behalf, the owner is judged.
    pub fn can_communicate(&self, actor: Uuid, target: Uuid) -> bool {
        let sender = match self.world().scene.part(actor) {
            Some(part) => part.owner_id,
            None => actor,
        };

        self.generic_communication_permission(sender, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::memory::InMemoryWorld;
    use crate::world::{ObjectPart, Parcel, SceneObject, World};
    use region_estate::{EstateSettings, RegionInfo};
    use std::sync::Arc;

    struct Fixture {
        memory: Arc<InMemoryWorld>,
        world: World,
        region: RegionInfo,
        config: EngineConfig,
        parcel_owner: Uuid,
    }

    impl Fixture {
        fn new() -> Self {
            let memory = Arc::new(InMemoryWorld::new());
            let parcel_owner = Uuid::now_v7();
            memory.add_parcel((0.0, 0.0), (128.0, 256.0), Parcel::new(1, parcel_owner));
            memory.add_parcel(
                (128.0, 0.0),
                (256.0, 256.0),
                Parcel::new(2, Uuid::now_v7())
                    .with_flags(ParcelFlags::CREATE_OBJECTS | ParcelFlags::ALLOW_A_PRIMITIVE_ENTRY),
            );
            Self {
                world: World::from_shared(memory.clone()),
                memory,
                region: RegionInfo::new("Test", EstateSettings::new(Uuid::now_v7())),
                config: EngineConfig::default(),
                parcel_owner,
            }
        }

        fn ctx(&self) -> PermissionContext<'_> {
            PermissionContext::new(&self.config, &self.region, &self.world)
        }

        fn add(&self, owner: Uuid, edit: impl FnOnce(&mut SceneObject)) -> Uuid {
            let mut root = ObjectPart::new(Uuid::now_v7(), owner);
            root.position = Vector3::new(200.0, 10.0, 0.0);
            let mut object = SceneObject::new(root);
            edit(&mut object);
            object.position = object.root.position;
            let id = object.id();
            self.memory.add_object(object);
            id
        }
    }

    #[test]
    fn test_move_by_everyone_mask_unless_locked() {
        let f = Fixture::new();
        let stranger = Uuid::now_v7();
        let movable = f.add(Uuid::now_v7(), |o| o.root.everyone_mask = PermissionMask::MOVE);
        let locked = f.add(Uuid::now_v7(), |o| {
            o.root.everyone_mask = PermissionMask::MOVE;
            o.root.owner_mask = PermissionMask::COPY;
        });

        assert!(f.ctx().can_move_object(stranger, movable));
        assert!(!f.ctx().can_move_object(stranger, locked));
    }

    #[test]
    fn test_owner_cannot_move_own_locked_object() {
        let f = Fixture::new();
        let owner = Uuid::now_v7();
        let locked = f.add(owner, |o| o.root.owner_mask = PermissionMask::COPY);
        let free = f.add(owner, |_| {});

        assert!(!f.ctx().can_move_object(owner, locked));
        assert!(f.ctx().can_move_object(owner, free));
    }

    #[test]
    fn test_bypass_move_guards_foreign_attachments() {
        let f = Fixture::new();
        let wearer = Uuid::now_v7();
        let attachment = f.add(wearer, |o| o.is_attachment = true);

        assert!(!f.ctx().bypass_move(Uuid::now_v7(), attachment, true));
        assert!(f.ctx().bypass_move(wearer, attachment, true));
        assert!(!f.ctx().bypass_move(wearer, attachment, false));
        assert!(f.ctx().bypass_move(wearer, Uuid::now_v7(), true));
    }

    #[test]
    fn test_take_copy_needs_effective_copy() {
        let f = Fixture::new();
        let stranger = Uuid::now_v7();
        let copyable = f.add(Uuid::now_v7(), |o| o.root.everyone_mask = PermissionMask::COPY);
        let no_copy = f.add(Uuid::now_v7(), |o| {
            o.root.everyone_mask = PermissionMask::COPY;
            o.aggregate_permissions = PermissionMask::MOVE | PermissionMask::MODIFY;
        });

        assert!(f.ctx().can_take_copy_object(stranger, copyable));
        assert!(!f.ctx().can_take_copy_object(stranger, no_copy));
        assert!(!f.ctx().can_take_copy_object(stranger, Uuid::now_v7()));
    }

    #[test]
    fn test_duplicate_requires_copy_and_rez() {
        let f = Fixture::new();
        let owner = Uuid::now_v7();
        let id = f.add(owner, |_| {});
        let no_copy = f.add(owner, |o| o.root.owner_mask = PermissionMask::MOVE | PermissionMask::MODIFY);

        assert!(f.ctx().can_duplicate_object(owner, id, 1, Vector3::new(200.0, 10.0, 0.0)));
        assert!(!f.ctx().can_duplicate_object(owner, id, 1, Vector3::new(10.0, 10.0, 0.0)));
        assert!(!f.ctx().can_duplicate_object(owner, no_copy, 1, Vector3::new(200.0, 10.0, 0.0)));
    }

    #[test]
    fn test_rez_rules() {
        let f = Fixture::new();
        let stranger = Uuid::now_v7();

        assert!(f.ctx().can_rez_object(stranger, 1, Vector3::new(200.0, 10.0, 0.0)));
        assert!(!f.ctx().can_rez_object(stranger, 1, Vector3::new(10.0, 10.0, 0.0)));
        assert!(f.ctx().can_rez_object(f.parcel_owner, 1, Vector3::new(10.0, 10.0, 0.0)));
        assert!(!f.ctx().can_rez_object(f.parcel_owner, 1, Vector3::new(300.0, 10.0, 0.0)));
    }

    #[test]
    fn test_terraform_clamps_position() {
        let f = Fixture::new();

        assert!(f.ctx().can_terraform(f.parcel_owner, Vector3::new(-20.0, 10.0, 0.0)));
        assert!(!f.ctx().can_terraform(f.parcel_owner, Vector3::new(300.0, 300.0, 0.0)));
        assert!(f.ctx().can_terraform(f.region.estate.estate_owner, Vector3::new(300.0, 300.0, 0.0)));
    }

    #[test]
    fn test_object_entry() {
        let f = Fixture::new();
        let id = f.add(Uuid::now_v7(), |_| {});
        let native = f.add(f.parcel_owner, |_| {});

        assert!(f.ctx().can_object_entry(id, false, Vector3::new(300.0, 10.0, 0.0)));
        assert!(f.ctx().can_object_entry(id, false, Vector3::new(210.0, 20.0, 0.0)));
        assert!(f.ctx().can_object_entry(id, true, Vector3::new(210.0, 20.0, 0.0)));
        assert!(!f.ctx().can_object_entry(id, false, Vector3::new(10.0, 10.0, 0.0)));
        assert!(!f.ctx().can_object_entry(id, true, Vector3::new(10.0, 10.0, 0.0)));
        assert!(f.ctx().can_object_entry(native, false, Vector3::new(10.0, 10.0, 0.0)));
        assert!(!f.ctx().can_object_entry(id, false, Vector3::new(-0.5, 10.0, 0.0)));
        assert!(!f.ctx().can_object_entry(Uuid::now_v7(), false, Vector3::new(10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_object_entry_rejects_nan_position() {
        let f = Fixture::new();
        let id = f.add(Uuid::now_v7(), |o| o.root.position = Vector3::new(10.0, 10.0, 0.0));

        assert!(!f.ctx().can_object_entry(id, true, Vector3::new(20.0, 20.0, 0.0)));
        assert!(!f.ctx().can_object_entry(id, true, Vector3::new(f32::NAN, 20.0, 0.0)));
        assert!(!f.ctx().can_object_entry(id, false, Vector3::new(20.0, f32::NAN, 0.0)));
    }

    #[test]
    fn test_edit_object_inventory_uses_root() {
        let f = Fixture::new();
        let owner = Uuid::now_v7();
        let root_id = f.add(owner, |_| {});
        let mut child = ObjectPart::new(Uuid::now_v7(), owner);
        child.parent_id = Some(root_id);
        let child_id = child.id;
        f.memory.add_child_part(child);

        assert!(f.ctx().can_edit_object_inventory(owner, child_id));
        assert!(f.ctx().can_reset_script(owner, child_id, Uuid::now_v7()));
        assert!(!f.ctx().can_edit_object_inventory(f.parcel_owner, child_id));
        assert!(!f.ctx().can_edit_object_inventory(owner, Uuid::now_v7()));
    }

    #[test]
    fn test_communication_from_object() {
        let f = Fixture::new();
        let sender = f.add(Uuid::now_v7(), |_| {});

        assert!(f.ctx().can_communicate(sender, Uuid::now_v7()));
        assert!(f.memory.permission_errors().is_empty());
    }
}
