//! In-memory world.
//!
//! [`InMemoryWorld`] implements every collaborator trait over plain maps.
//! It is suitable for tests and for single-process tools; a region server
//! plugs in its own scene graph, land channel and user service instead.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

use region_estate::UserProfile;

use crate::error::{LookupError, LookupResult};
use crate::world::{
    Entity, InventoryItem, LandChannel, ObjectPart, Parcel, SceneGraph, SceneObject,
    UserDirectory,
};

/// A parcel covering the half-open rectangle `[min, max)`.
#[derive(Debug, Clone)]
struct ParcelArea {
    min: (f32, f32),
    max: (f32, f32),
    parcel: Parcel,
}

impl ParcelArea {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min.0 && x < self.max.0 && y >= self.min.1 && y < self.max.1
    }
}

/// Scene, land and user service held in memory.
pub struct InMemoryWorld {
    objects: RwLock<HashMap<Uuid, SceneObject>>,
    child_parts: RwLock<HashMap<Uuid, ObjectPart>>,
    presences: RwLock<HashSet<Uuid>>,
    task_items: RwLock<HashMap<(Uuid, Uuid), InventoryItem>>,
    parcels: RwLock<Vec<ParcelArea>>,
    profiles: RwLock<HashMap<Uuid, LookupResult<UserProfile>>>,
    inventory_roots: RwLock<HashMap<Uuid, Uuid>>,
    folders: RwLock<HashMap<Uuid, HashMap<Uuid, InventoryItem>>>,
    library_root: Uuid,
    permission_errors: RwLock<Vec<(Uuid, String)>>,
}

impl std::fmt::Debug for InMemoryWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWorld")
            .field("objects", &self.objects.read().len())
            .field("parcels", &self.parcels.read().len())
            .finish()
    }
}

impl InMemoryWorld {
    /// Create an empty world with an empty library folder.
    pub fn new() -> Self {
        let library_root = Uuid::now_v7();
        let mut folders = HashMap::new();
        folders.insert(library_root, HashMap::new());

        Self {
            objects: RwLock::new(HashMap::new()),
            child_parts: RwLock::new(HashMap::new()),
            presences: RwLock::new(HashSet::new()),
            task_items: RwLock::new(HashMap::new()),
            parcels: RwLock::new(Vec::new()),
            profiles: RwLock::new(HashMap::new()),
            inventory_roots: RwLock::new(HashMap::new()),
            folders: RwLock::new(folders),
            library_root,
            permission_errors: RwLock::new(Vec::new()),
        }
    }

    /// Add or replace an object.
    pub fn add_object(&self, object: SceneObject) {
        self.objects.write().insert(object.id(), object);
    }

    /// Remove an object along with its child parts.
    pub fn remove_object(&self, id: Uuid) -> Option<SceneObject> {
        let removed = self.objects.write().remove(&id)?;
        self.child_parts.write().retain(|_, part| part.parent_id != Some(id));
        Some(removed)
    }

    /// Add a child part to an existing linkset.
    pub fn add_child_part(&self, part: ObjectPart) {
        self.child_parts.write().insert(part.id, part);
    }

    /// Add an avatar presence.
    pub fn add_presence(&self, avatar: Uuid) {
        self.presences.write().insert(avatar);
    }

    /// Put an item into a part's inventory.
    pub fn add_task_item(&self, part_id: Uuid, item: InventoryItem) {
        self.task_items.write().insert((part_id, item.id), item);
    }

    /// Add a parcel covering `[min, max)`. Earlier parcels win on overlap.
    pub fn add_parcel(&self, min: (f32, f32), max: (f32, f32), parcel: Parcel) {
        self.parcels.write().push(ParcelArea { min, max, parcel });
    }

    /// Register a user profile.
    pub fn set_profile(&self, profile: UserProfile) {
        self.profiles.write().insert(profile.user_id, Ok(profile));
    }

    /// Make profile lookups for `user` fail.
    pub fn fail_profile(&self, user: Uuid, error: LookupError) {
        self.profiles.write().insert(user, Err(error));
    }

    /// Put an item into a user's inventory, creating the root folder if needed.
    pub fn add_inventory_item(&self, user: Uuid, item: InventoryItem) {
        let root = *self
            .inventory_roots
            .write()
            .entry(user)
            .or_insert_with(Uuid::now_v7);
        self.folders
            .write()
            .entry(root)
            .or_default()
            .insert(item.id, item);
    }

    /// Put an item into the shared library.
    pub fn add_library_item(&self, item: InventoryItem) {
        self.folders
            .write()
            .entry(self.library_root)
            .or_default()
            .insert(item.id, item);
    }

    /// Permission errors reported to users so far.
    pub fn permission_errors(&self) -> Vec<(Uuid, String)> {
        self.permission_errors.read().clone()
    }
}

impl Default for InMemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for InMemoryWorld {
    fn entity(&self, id: Uuid) -> Option<Entity> {
        if let Some(object) = self.objects.read().get(&id) {
            return Some(Entity::Object(object.clone()));
        }
        self.presences
            .read()
            .contains(&id)
            .then_some(Entity::Presence(id))
    }

    fn part(&self, id: Uuid) -> Option<ObjectPart> {
        if let Some(object) = self.objects.read().get(&id) {
            return Some(object.root.clone());
        }
        self.child_parts.read().get(&id).cloned()
    }

    fn task_item(&self, part_id: Uuid, item_id: Uuid) -> Option<InventoryItem> {
        self.task_items.read().get(&(part_id, item_id)).cloned()
    }

    fn notify_permission_error(&self, user: Uuid, reason: &str) {
        self.permission_errors
            .write()
            .push((user, reason.to_string()));
    }
}

impl LandChannel for InMemoryWorld {
    fn parcel_at(&self, x: f32, y: f32) -> Option<Parcel> {
        self.parcels
            .read()
            .iter()
            .find(|area| area.contains(x, y))
            .map(|area| area.parcel.clone())
    }
}

impl UserDirectory for InMemoryWorld {
    fn profile(&self, user: Uuid, _timeout: Duration) -> LookupResult<Option<UserProfile>> {
        match self.profiles.read().get(&user) {
            Some(Ok(profile)) => Ok(Some(profile.clone())),
            Some(Err(err)) => Err(err.clone()),
            None => Ok(None),
        }
    }

    fn inventory_root(&self, user: Uuid) -> Option<Uuid> {
        self.inventory_roots.read().get(&user).copied()
    }

    fn find_item(&self, folder: Uuid, item: Uuid) -> Option<InventoryItem> {
        self.folders.read().get(&folder)?.get(&item).cloned()
    }

    fn library_root(&self) -> Option<Uuid> {
        Some(self.library_root)
    }
}
