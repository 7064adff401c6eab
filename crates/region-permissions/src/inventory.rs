//! Inventory rules.
//!
//! Scripts and notecards may only be opened by someone holding the full
//! permission set for the asset kind (see [`AssetKind::required_permissions`]).
//! Library items are readable by everyone.

use uuid::Uuid;

use crate::actions::InventoryLocation;
use crate::context::PermissionContext;
use crate::masks::{AssetKind, InventoryType, PermissionMask};

impl PermissionContext<'_> {
    /// Whether `actor` may open a script or notecard.
    pub fn can_view_asset(&self, kind: AssetKind, actor: Uuid, item_id: Uuid, location: InventoryLocation) -> bool {
        match location {
            InventoryLocation::User => self.can_view_user_asset(kind, actor, item_id),
            InventoryLocation::Object(part_id) => self.can_view_task_asset(kind, actor, item_id, part_id),
        }
    }

    /// Whether `actor` may save a script.
    ///
    /// Same as viewing, but script editing may be restricted to administrators.
    pub fn can_edit_script(&self, actor: Uuid, item_id: Uuid, location: InventoryLocation) -> bool {
        if self.config().allowed_script_editors.is_restricted() && !self.is_administrator(actor) {
            return false;
        }

        self.can_view_asset(AssetKind::Script, actor, item_id, location)
    }

    /// Whether `actor` may create an item of `inventory_type`.
    ///
    /// Scripts may be restricted to administrators; everything else is allowed.
    pub fn can_create_inventory(&self, actor: Uuid, inventory_type: InventoryType) -> bool {
        if inventory_type == InventoryType::Script
            && self.config().allowed_script_creators.is_restricted()
            && !self.is_administrator(actor)
        {
            return false;
        }

        true
    }

    fn can_view_user_asset(&self, kind: AssetKind, actor: Uuid, item_id: Uuid) -> bool {
        let users = &self.world().users;

        let Some(root) = users.inventory_root(actor) else {
            tracing::error!(
                user_id = %actor,
                asset = kind.as_str(),
                "No inventory root folder found for user"
            );
            return false;
        };

        let Some(item) = users.find_item(root, item_id) else {
            return users
                .library_root()
                .and_then(|library| users.find_item(library, item_id))
                .is_some();
        };

        kind.is_readable_with(item.current_permissions)
    }

    fn can_view_task_asset(&self, kind: AssetKind, actor: Uuid, item_id: Uuid, part_id: Uuid) -> bool {
        let scene = &self.world().scene;

        let Some(part) = scene.part(part_id) else {
            return false;
        };

        if part.owner_id != actor || !part.owner_mask.contains(PermissionMask::MODIFY) {
            return false;
        }

        let Some(item) = scene.task_item(part_id, item_id) else {
            return false;
        };

        item.owner_id == actor && kind.is_readable_with(item.current_permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::memory::InMemoryWorld;
    use crate::world::{InventoryItem, ObjectPart, SceneObject, World};
    use region_estate::{EstateSettings, RegionInfo, UserSet};
    use std::sync::Arc;

    const MOD_COPY: PermissionMask = PermissionMask::MODIFY.union(PermissionMask::COPY);

    struct Fixture {
        memory: Arc<InMemoryWorld>,
        world: World,
        region: RegionInfo,
    }

    fn fixture() -> Fixture {
        let memory = Arc::new(InMemoryWorld::new());
        Fixture {
            world: World::from_shared(memory.clone()),
            memory,
            region: RegionInfo::new("Test", EstateSettings::new(Uuid::now_v7())),
        }
    }

    #[test]
    fn test_user_item_needs_full_set_for_kind() {
        let f = fixture();
        let user = Uuid::now_v7();
        let item = InventoryItem::new(Uuid::now_v7(), user, MOD_COPY);
        let item_id = item.id;
        f.memory.add_inventory_item(user, item);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(ctx.can_view_asset(AssetKind::Notecard, user, item_id, InventoryLocation::User));
        assert!(!ctx.can_view_asset(AssetKind::Script, user, item_id, InventoryLocation::User));
    }

    #[test]
    fn test_library_items_are_readable() {
        let f = fixture();
        let user = Uuid::now_v7();
        f.memory
            .add_inventory_item(user, InventoryItem::new(Uuid::now_v7(), user, PermissionMask::ALL));
        let library_item = InventoryItem::new(Uuid::now_v7(), Uuid::nil(), PermissionMask::empty());
        let library_id = library_item.id;
        f.memory.add_library_item(library_item);
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(ctx.can_view_asset(AssetKind::Script, user, library_id, InventoryLocation::User));
        assert!(!ctx.can_view_asset(AssetKind::Script, user, Uuid::now_v7(), InventoryLocation::User));
    }

    #[test]
    fn test_user_without_inventory_is_denied() {
        let f = fixture();
        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(!ctx.can_view_asset(AssetKind::Notecard, Uuid::now_v7(), Uuid::now_v7(), InventoryLocation::User));
    }

    #[test]
    fn test_task_item_rules() {
        let f = fixture();
        let owner = Uuid::now_v7();
        let object = SceneObject::new(ObjectPart::new(Uuid::now_v7(), owner));
        let part_id = object.id();
        f.memory.add_object(object);

        let script = InventoryItem::new(Uuid::now_v7(), owner, PermissionMask::ALL);
        let script_id = script.id;
        f.memory.add_task_item(part_id, script);
        let foreign = InventoryItem::new(Uuid::now_v7(), Uuid::now_v7(), PermissionMask::ALL);
        let foreign_id = foreign.id;
        f.memory.add_task_item(part_id, foreign);

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        let location = InventoryLocation::Object(part_id);

        assert!(ctx.can_view_asset(AssetKind::Script, owner, script_id, location));
        assert!(!ctx.can_view_asset(AssetKind::Script, owner, foreign_id, location));
        assert!(!ctx.can_view_asset(AssetKind::Script, Uuid::now_v7(), script_id, location));
        assert!(!ctx.can_view_asset(AssetKind::Script, owner, Uuid::now_v7(), location));
    }

    #[test]
    fn test_task_item_needs_modify_on_part() {
        let f = fixture();
        let owner = Uuid::now_v7();
        let mut root = ObjectPart::new(Uuid::now_v7(), owner);
        root.owner_mask = PermissionMask::COPY | PermissionMask::MOVE | PermissionMask::TRANSFER;
        let part_id = root.id;
        f.memory.add_object(SceneObject::new(root));
        let item = InventoryItem::new(Uuid::now_v7(), owner, PermissionMask::ALL);
        let item_id = item.id;
        f.memory.add_task_item(part_id, item);

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(!ctx.can_view_asset(AssetKind::Notecard, owner, item_id, InventoryLocation::Object(part_id)));
    }

    #[test]
    fn test_script_editors_restriction() {
        let f = fixture();
        let user = Uuid::now_v7();
        let item = InventoryItem::new(Uuid::now_v7(), user, PermissionMask::ALL);
        let item_id = item.id;
        f.memory.add_inventory_item(user, item);

        let config = EngineConfig::default();
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(ctx.can_edit_script(user, item_id, InventoryLocation::User));

        let config = EngineConfig {
            allowed_script_editors: UserSet::Administrators,
            ..EngineConfig::default()
        };
        let ctx = PermissionContext::new(&config, &f.region, &f.world);
        assert!(!ctx.can_edit_script(user, item_id, InventoryLocation::User));
    }

    #[test]
    fn test_script_creators_restriction() {
        let f = fixture();
        let user = Uuid::now_v7();
        let config = EngineConfig {
            allowed_script_creators: UserSet::Administrators,
            ..EngineConfig::default()
        };
        let ctx = PermissionContext::new(&config, &f.region, &f.world);

        assert!(!ctx.can_create_inventory(user, InventoryType::Script));
        assert!(ctx.can_create_inventory(user, InventoryType::Notecard));
        assert!(ctx.can_create_inventory(f.region.estate.estate_owner, InventoryType::Script));
    }
}
