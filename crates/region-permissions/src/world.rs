//! # World Views
//!
//! Read-only views of scene objects, parcels and inventory items, plus the
//! collaborator traits the engine resolves them through. The engine owns none
//! of this state; every view is resolved on demand for a single evaluation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use region_estate::UserProfile;

use crate::error::LookupResult;
use crate::masks::{ObjectFlags, ParcelFlags, PermissionMask};

/// A position in region coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Create a new position.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A single prim of a linked object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectPart {
    /// Part ID
    pub id: Uuid,
    /// Root part of the linkset, `None` when this part is the root.
    pub parent_id: Option<Uuid>,
    /// Owner of the part
    pub owner_id: Uuid,
    /// Permissions granted to the owner
    pub owner_mask: PermissionMask,
    /// Permissions granted to the owning group (unused until groups exist)
    pub group_mask: PermissionMask,
    /// Permissions granted to everyone else
    pub everyone_mask: PermissionMask,
    /// Effective object flags as stored on the part
    pub object_flags: ObjectFlags,
    /// Absolute position
    pub position: Vector3,
}

impl ObjectPart {
    /// Create a root part with full owner permissions.
    pub fn new(id: Uuid, owner_id: Uuid) -> Self {
        Self {
            id,
            parent_id: None,
            owner_id,
            owner_mask: PermissionMask::ALL,
            group_mask: PermissionMask::empty(),
            everyone_mask: PermissionMask::empty(),
            object_flags: ObjectFlags::empty(),
            position: Vector3::default(),
        }
    }

    /// Whether this part is the root of its linkset.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// ID of the object this part belongs to.
    ///
    /// Objects are identified by their root part.
    pub fn root_id(&self) -> Uuid {
        self.parent_id.unwrap_or(self.id)
    }
}

/// A composite object (linkset) in the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneObject {
    /// Root part; its ID is the object ID
    pub root: ObjectPart,
    /// Owner of the object
    pub owner_id: Uuid,
    /// Whether the object is worn by an avatar
    pub is_attachment: bool,
    /// Whether the object has been removed from the scene
    pub is_deleted: bool,
    /// Absolute position of the object
    pub position: Vector3,
    /// Permissions folded over every part of the linkset
    pub aggregate_permissions: PermissionMask,
}

impl SceneObject {
    /// Create a freestanding object from its root part.
    pub fn new(root: ObjectPart) -> Self {
        Self {
            owner_id: root.owner_id,
            position: root.position,
            root,
            is_attachment: false,
            is_deleted: false,
            aggregate_permissions: PermissionMask::ALL,
        }
    }

    /// Object ID.
    pub fn id(&self) -> Uuid {
        self.root.id
    }

    /// Whether the root owner mask marks the object as locked.
    pub fn is_locked(&self) -> bool {
        self.root.owner_mask.is_locked()
    }

    /// Effective permissions of the whole object.
    ///
    /// The intersection of the root part's owner mask and the aggregate
    /// permissions of the linkset.
    pub fn effective_permissions(&self) -> PermissionMask {
        self.root.owner_mask & self.aggregate_permissions
    }
}

/// Anything addressable in the scene by ID.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A composite object
    Object(SceneObject),
    /// An avatar's presence
    Presence(Uuid),
}

/// A land parcel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parcel {
    /// Region-local parcel ID
    pub local_id: i32,
    /// Parcel owner
    pub owner_id: Uuid,
    /// Whether the parcel is deeded to a group
    pub is_group_owned: bool,
    /// Parcel settings
    pub flags: ParcelFlags,
}

impl Parcel {
    /// Create a parcel owned by `owner_id` with no flags set.
    pub fn new(local_id: i32, owner_id: Uuid) -> Self {
        Self {
            local_id,
            owner_id,
            is_group_owned: false,
            flags: ParcelFlags::empty(),
        }
    }

    /// Builder-style helper that sets the parcel flags.
    pub fn with_flags(mut self, flags: ParcelFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether two views describe the same parcel.
    pub fn is_same_parcel(&self, other: &Parcel) -> bool {
        self.local_id == other.local_id
    }
}

/// An item in a user's inventory or in a prim's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Item ID
    pub id: Uuid,
    /// Item owner
    pub owner_id: Uuid,
    /// Permissions currently held on the item
    pub current_permissions: PermissionMask,
}

impl InventoryItem {
    /// Create an inventory item.
    pub fn new(id: Uuid, owner_id: Uuid, current_permissions: PermissionMask) -> Self {
        Self {
            id,
            owner_id,
            current_permissions,
        }
    }
}

/// Scene graph lookups.
pub trait SceneGraph: Send + Sync {
    /// Resolve an entity by ID.
    fn entity(&self, id: Uuid) -> Option<Entity>;

    /// Resolve a part (root or child) by ID.
    fn part(&self, id: Uuid) -> Option<ObjectPart>;

    /// Resolve an item in a part's inventory.
    fn task_item(&self, part_id: Uuid, item_id: Uuid) -> Option<InventoryItem>;

    /// Tell `user` that a request was denied.
    fn notify_permission_error(&self, _user: Uuid, _reason: &str) {}
}

/// Parcel lookups.
pub trait LandChannel: Send + Sync {
    /// Resolve the parcel under a point.
    fn parcel_at(&self, x: f32, y: f32) -> Option<Parcel>;
}

/// User service lookups.
pub trait UserDirectory: Send + Sync {
    /// Fetch a user profile.
    ///
    /// The lookup may be remote; implementations must give up after
    /// `timeout` and return [`LookupError::Timeout`](crate::LookupError::Timeout).
    fn profile(&self, user: Uuid, timeout: Duration) -> LookupResult<Option<UserProfile>>;

    /// Root folder of a user's inventory, `None` if the user is unknown.
    fn inventory_root(&self, user: Uuid) -> Option<Uuid>;

    /// Search a folder (recursively) for an item.
    fn find_item(&self, folder: Uuid, item: Uuid) -> Option<InventoryItem>;

    /// Root folder of the shared read-only library.
    fn library_root(&self) -> Option<Uuid>;
}

/// The external collaborators an engine evaluates against.
#[derive(Clone)]
pub struct World {
    /// Scene graph
    pub scene: Arc<dyn SceneGraph>,
    /// Land channel
    pub land: Arc<dyn LandChannel>,
    /// User service
    pub users: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World").finish_non_exhaustive()
    }
}

impl World {
    /// Create a world from separate collaborators.
    pub fn new(
        scene: Arc<dyn SceneGraph>,
        land: Arc<dyn LandChannel>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self { scene, land, users }
    }

    /// Create a world from a single value implementing every collaborator.
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: SceneGraph + LandChannel + UserDirectory + 'static,
    {
        Self {
            scene: shared.clone(),
            land: shared.clone(),
            users: shared,
        }
    }

    /// Resolve `id` as a scene object.
    ///
    /// Returns `None` when the ID is unknown or names something that is not
    /// an object.
    pub fn scene_object(&self, id: Uuid) -> Option<SceneObject> {
        match self.scene.entity(id)? {
            Entity::Object(object) => Some(object),
            Entity::Presence(_) => None,
        }
    }

    /// Resolve the parcel under a position.
    pub fn parcel_at(&self, position: Vector3) -> Option<Parcel> {
        self.land.parcel_at(position.x, position.y)
    }
}
