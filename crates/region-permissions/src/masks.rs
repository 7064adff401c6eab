//! # Masks
//!
//! Bit sets exchanged with viewers: the per-object permission masks, the
//! object flags sent to the client, parcel flags, and inventory types.
//! Bit positions follow the viewer protocol so values can be passed through
//! unchanged.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Permission bits stored on objects and inventory items.
    ///
    /// Every object carries an owner, group and everyone mask of this type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PermissionMask: u32 {
        /// May be given to another user
        const TRANSFER = 1 << 13;
        /// May be edited
        const MODIFY   = 1 << 14;
        /// May be copied
        const COPY     = 1 << 15;
        /// May be moved
        const MOVE     = 1 << 19;
        /// Every permission bit
        const ALL      = 0x7FFF_FFFF;
    }
}

impl PermissionMask {
    /// Bits probed to decide whether an object is locked.
    ///
    /// An object is locked when its root owner mask carries *none* of these
    /// bits. Absence, not presence, signals the lock.
    pub const LOCK_PROBE: Self = Self::MOVE.union(Self::MODIFY);

    /// Copy, modify, move and transfer.
    pub const CAPABILITIES: Self = Self::COPY
        .union(Self::MODIFY)
        .union(Self::MOVE)
        .union(Self::TRANSFER);

    /// Check whether an owner mask marks its object as locked.
    ///
    /// # Example
    ///
    /// ```
    /// use region_permissions::PermissionMask;
    ///
    /// assert!(PermissionMask::COPY.is_locked());
    /// assert!(!(PermissionMask::COPY | PermissionMask::MOVE).is_locked());
    /// assert!(!PermissionMask::ALL.is_locked());
    /// ```
    pub fn is_locked(self) -> bool {
        !self.intersects(Self::LOCK_PROBE)
    }
}

bitflags! {
    /// Object flags reported to the client.
    ///
    /// The capability bits (`OBJECT_COPY`, `OBJECT_MODIFY`, ...) are
    /// *temporary*: they are computed per viewer by the client-flags composer
    /// and must never be stored on the object itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ObjectFlags: u32 {
        const PHYSICS              = 0x0000_0001;
        const CREATE_SELECTED      = 0x0000_0002;
        const OBJECT_MODIFY        = 0x0000_0004;
        const OBJECT_COPY          = 0x0000_0008;
        const OBJECT_ANY_OWNER     = 0x0000_0010;
        const OBJECT_YOU_OWNER     = 0x0000_0020;
        const SCRIPTED             = 0x0000_0040;
        const TOUCH                = 0x0000_0080;
        const OBJECT_MOVE          = 0x0000_0100;
        const MONEY                = 0x0000_0200;
        const PHANTOM              = 0x0000_0400;
        const INVENTORY_EMPTY      = 0x0000_0800;
        const ALLOW_INVENTORY_DROP = 0x0001_0000;
        const OBJECT_TRANSFER      = 0x0002_0000;
        const OBJECT_GROUP_OWNED   = 0x0004_0000;
        const OBJECT_YOU_OFFICER   = 0x0008_0000;
        const CAST_SHADOWS         = 0x0080_0000;
        const OBJECT_OWNER_MODIFY  = 0x1000_0000;
        const TEMPORARY_ON_REZ     = 0x2000_0000;
        const TEMPORARY            = 0x4000_0000;
    }
}

impl ObjectFlags {
    /// Per-viewer capability bits, stripped and recomputed on every request.
    pub const TEMPORARY_CAPABILITIES: Self = Self::OBJECT_COPY
        .union(Self::OBJECT_MODIFY)
        .union(Self::OBJECT_MOVE)
        .union(Self::OBJECT_TRANSFER)
        .union(Self::OBJECT_YOU_OWNER)
        .union(Self::OBJECT_ANY_OWNER)
        .union(Self::OBJECT_OWNER_MODIFY)
        .union(Self::OBJECT_YOU_OFFICER);

    /// Ownership bits granted alongside the owner-level mask.
    pub const OWNERSHIP: Self = Self::OBJECT_YOU_OWNER
        .union(Self::OBJECT_ANY_OWNER)
        .union(Self::OBJECT_OWNER_MODIFY);
}

bitflags! {
    /// Parcel settings flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ParcelFlags: u32 {
        const ALLOW_FLY                = 0x0000_0001;
        const ALLOW_OTHER_SCRIPTS      = 0x0000_0002;
        const FOR_SALE                 = 0x0000_0004;
        const ALLOW_LANDMARK           = 0x0000_0008;
        const ALLOW_TERRAFORM          = 0x0000_0010;
        const ALLOW_DAMAGE             = 0x0000_0020;
        const CREATE_OBJECTS           = 0x0000_0040;
        const FOR_SALE_OBJECTS         = 0x0000_0080;
        const USE_ACCESS_GROUP         = 0x0000_0100;
        const USE_ACCESS_LIST          = 0x0000_0200;
        const USE_BAN_LIST             = 0x0000_0400;
        const USE_PASS_LIST            = 0x0000_0800;
        const SHOW_DIRECTORY           = 0x0000_1000;
        const ALLOW_DEED_TO_GROUP      = 0x0000_2000;
        const ALLOW_GROUP_SCRIPTS      = 0x0200_0000;
        const CREATE_GROUP_OBJECTS     = 0x0400_0000;
        const ALLOW_A_PRIMITIVE_ENTRY  = 0x0800_0000;
        const ALLOW_GROUP_OBJECT_ENTRY = 0x1000_0000;
    }
}

/// Derive the client capability flags implied by a permission mask.
///
/// Each of Copy, Move, Modify and Transfer in `mask` adds the matching
/// `OBJECT_*` bit to `flags`. Bits already present in `flags` are kept, so
/// applying the same mask twice yields the same result.
///
/// # Example
///
/// ```
/// use region_permissions::{apply_object_modify_masks, ObjectFlags, PermissionMask};
///
/// let flags = apply_object_modify_masks(
///     PermissionMask::COPY | PermissionMask::MOVE,
///     ObjectFlags::PHYSICS,
/// );
/// assert_eq!(
///     flags,
///     ObjectFlags::PHYSICS | ObjectFlags::OBJECT_COPY | ObjectFlags::OBJECT_MOVE
/// );
/// ```
pub fn apply_object_modify_masks(mask: PermissionMask, flags: ObjectFlags) -> ObjectFlags {
    let mut flags = flags;

    if mask.contains(PermissionMask::COPY) {
        flags |= ObjectFlags::OBJECT_COPY;
    }
    if mask.contains(PermissionMask::MOVE) {
        flags |= ObjectFlags::OBJECT_MOVE;
    }
    if mask.contains(PermissionMask::MODIFY) {
        flags |= ObjectFlags::OBJECT_MODIFY;
    }
    if mask.contains(PermissionMask::TRANSFER) {
        flags |= ObjectFlags::OBJECT_TRANSFER;
    }

    flags
}

/// Inventory item types, numbered as on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InventoryType {
    Texture,
    Sound,
    CallingCard,
    Landmark,
    Object,
    Notecard,
    Folder,
    /// Script source
    Script,
    Snapshot,
    Attachment,
    Wearable,
    Animation,
    Gesture,
}

impl InventoryType {
    /// Wire value of the type.
    pub fn as_raw(&self) -> i32 {
        match self {
            InventoryType::Texture => 0,
            InventoryType::Sound => 1,
            InventoryType::CallingCard => 2,
            InventoryType::Landmark => 3,
            InventoryType::Object => 6,
            InventoryType::Notecard => 7,
            InventoryType::Folder => 8,
            InventoryType::Script => 10,
            InventoryType::Snapshot => 15,
            InventoryType::Attachment => 17,
            InventoryType::Wearable => 18,
            InventoryType::Animation => 19,
            InventoryType::Gesture => 20,
        }
    }

    /// Parse a wire value.
    ///
    /// # Returns
    ///
    /// `Some(InventoryType)` if known, `None` otherwise
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(InventoryType::Texture),
            1 => Some(InventoryType::Sound),
            2 => Some(InventoryType::CallingCard),
            3 => Some(InventoryType::Landmark),
            6 => Some(InventoryType::Object),
            7 => Some(InventoryType::Notecard),
            8 => Some(InventoryType::Folder),
            10 => Some(InventoryType::Script),
            15 => Some(InventoryType::Snapshot),
            17 => Some(InventoryType::Attachment),
            18 => Some(InventoryType::Wearable),
            19 => Some(InventoryType::Animation),
            20 => Some(InventoryType::Gesture),
            _ => None,
        }
    }
}

/// Asset kinds whose contents are readable only with full permissions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Script source
    Script,
    /// Notecard text
    Notecard,
}

impl AssetKind {
    /// The permission set an item must carry before its contents are shown.
    ///
    /// Notecards need Modify and Copy. Scripts additionally need Transfer;
    /// a mod/copy/no-transfer script stays unreadable.
    pub fn required_permissions(&self) -> PermissionMask {
        match self {
            AssetKind::Notecard => PermissionMask::MODIFY | PermissionMask::COPY,
            AssetKind::Script => {
                PermissionMask::MODIFY | PermissionMask::COPY | PermissionMask::TRANSFER
            }
        }
    }

    /// Check if `mask` carries the full set for this kind.
    pub fn is_readable_with(&self, mask: PermissionMask) -> bool {
        mask.contains(self.required_permissions())
    }

    /// Get the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Script => "script",
            AssetKind::Notecard => "notecard",
        }
    }
}
