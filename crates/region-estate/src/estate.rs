//! Estate settings
//!
//! An estate groups one or more regions under a single owner. The owner can
//! delegate authority over every parcel and object in the estate to a set of
//! estate managers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Estate-level ownership and delegation.
///
/// The estate owner is always treated as an administrator by the permission
/// engine. Estate managers hold delegated authority that is subordinate to
/// administrators.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use region_estate::EstateSettings;
///
/// let owner = Uuid::now_v7();
/// let manager = Uuid::now_v7();
///
/// let mut estate = EstateSettings::new(owner);
/// estate.add_manager(manager);
///
/// assert!(estate.is_estate_owner(owner));
/// assert!(estate.is_estate_manager(manager));
/// assert!(!estate.is_estate_manager(owner));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EstateSettings {
    /// Estate identifier
    #[serde(default)]
    pub estate_id: u32,

    /// Human-readable estate name
    #[serde(default)]
    pub estate_name: String,

    /// Estate owner (nil when unassigned)
    pub estate_owner: Uuid,

    /// Users holding delegated estate authority
    #[serde(default)]
    pub managers: HashSet<Uuid>,
}

impl EstateSettings {
    /// Creates estate settings owned by `estate_owner` with no managers.
    pub fn new(estate_owner: Uuid) -> Self {
        Self {
            estate_id: 0,
            estate_name: String::new(),
            estate_owner,
            managers: HashSet::new(),
        }
    }

    /// Builder-style helper that adds a manager.
    pub fn with_manager(mut self, manager: Uuid) -> Self {
        self.add_manager(manager);
        self
    }

    /// Adds an estate manager.
    ///
    /// # Returns
    ///
    /// `true` if the user was not already a manager
    pub fn add_manager(&mut self, manager: Uuid) -> bool {
        self.managers.insert(manager)
    }

    /// Removes an estate manager.
    ///
    /// # Returns
    ///
    /// `true` if the user was a manager
    pub fn remove_manager(&mut self, manager: Uuid) -> bool {
        self.managers.remove(&manager)
    }

    /// Whether an owner has been assigned to this estate.
    pub fn has_owner(&self) -> bool {
        !self.estate_owner.is_nil()
    }

    /// Check if `user` owns this estate.
    ///
    /// An unassigned (nil) owner never matches, not even the nil user.
    pub fn is_estate_owner(&self, user: Uuid) -> bool {
        self.has_owner() && self.estate_owner == user
    }

    /// Check if `user` is one of the estate managers.
    pub fn is_estate_manager(&self, user: Uuid) -> bool {
        self.managers.contains(&user)
    }
}
