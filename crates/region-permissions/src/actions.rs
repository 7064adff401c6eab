//! # Actions
//!
//! Every action the engine can authorize, as a closed set of kinds plus a
//! request type carrying each kind's parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::masks::InventoryType;
use crate::world::{Parcel, Vector3};

/// Actions that can be authorized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Give a parcel back to the estate
    AbandonParcel,
    /// Reclaim a parcel for the estate
    ReclaimParcel,
    /// Change parcel settings
    EditParcel,
    /// Put a parcel up for sale
    SellParcel,
    /// Buy a parcel
    BuyLand,
    /// Ask whether a user is a god
    IsGod,
    /// Duplicate an object in place
    DuplicateObject,
    /// Delete an object
    DeleteObject,
    /// Edit an object
    EditObject,
    /// Return an object to its owner
    ReturnObject,
    /// Take an object into inventory
    TakeObject,
    /// Take a copy of an object into inventory
    TakeCopyObject,
    /// Move an object
    MoveObject,
    /// Edit the contents of an object
    EditObjectInventory,
    /// Send an instant message
    InstantMessage,
    /// Give an inventory item to someone
    InventoryTransfer,
    /// Run an estate tool
    IssueEstateCommand,
    /// Let an object cross into a parcel
    ObjectEntry,
    /// Rez an object
    RezObject,
    /// Run an operator console command
    RunConsoleCommand,
    /// Start a script
    RunScript,
    /// Reset a running script
    ResetScript,
    /// Edit terrain
    Terraform,
    /// Link objects
    LinkObject,
    /// Unlink objects
    DelinkObject,
    /// Open a script
    ViewScript,
    /// Save a script
    EditScript,
    /// Open a notecard
    ViewNotecard,
    /// Save a notecard
    EditNotecard,
    /// Create an item inside an object
    CreateObjectInventory,
    /// Create an item in a user's inventory
    CreateUserInventory,
    /// Copy an item out of an object
    CopyObjectInventory,
    /// Delete an item from an object
    DeleteObjectInventory,
    /// Copy a user inventory item
    CopyUserInventory,
    /// Edit a user inventory item
    EditUserInventory,
    /// Delete a user inventory item
    DeleteUserInventory,
    /// Teleport
    Teleport,
}

impl ActionKind {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::AbandonParcel => "abandon_parcel",
            ActionKind::ReclaimParcel => "reclaim_parcel",
            ActionKind::EditParcel => "edit_parcel",
            ActionKind::SellParcel => "sell_parcel",
            ActionKind::BuyLand => "buy_land",
            ActionKind::IsGod => "is_god",
            ActionKind::DuplicateObject => "duplicate_object",
            ActionKind::DeleteObject => "delete_object",
            ActionKind::EditObject => "edit_object",
            ActionKind::ReturnObject => "return_object",
            ActionKind::TakeObject => "take_object",
            ActionKind::TakeCopyObject => "take_copy_object",
            ActionKind::MoveObject => "move_object",
            ActionKind::EditObjectInventory => "edit_object_inventory",
            ActionKind::InstantMessage => "instant_message",
            ActionKind::InventoryTransfer => "inventory_transfer",
            ActionKind::IssueEstateCommand => "issue_estate_command",
            ActionKind::ObjectEntry => "object_entry",
            ActionKind::RezObject => "rez_object",
            ActionKind::RunConsoleCommand => "run_console_command",
            ActionKind::RunScript => "run_script",
            ActionKind::ResetScript => "reset_script",
            ActionKind::Terraform => "terraform",
            ActionKind::LinkObject => "link_object",
            ActionKind::DelinkObject => "delink_object",
            ActionKind::ViewScript => "view_script",
            ActionKind::EditScript => "edit_script",
            ActionKind::ViewNotecard => "view_notecard",
            ActionKind::EditNotecard => "edit_notecard",
            ActionKind::CreateObjectInventory => "create_object_inventory",
            ActionKind::CreateUserInventory => "create_user_inventory",
            ActionKind::CopyObjectInventory => "copy_object_inventory",
            ActionKind::DeleteObjectInventory => "delete_object_inventory",
            ActionKind::CopyUserInventory => "copy_user_inventory",
            ActionKind::EditUserInventory => "edit_user_inventory",
            ActionKind::DeleteUserInventory => "delete_user_inventory",
            ActionKind::Teleport => "teleport",
        }
    }

    /// Parse an action from its string representation.
    ///
    /// Case-insensitive; hyphens are accepted in place of underscores and a
    /// leading `can_` is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use region_permissions::ActionKind;
    ///
    /// assert_eq!(ActionKind::parse("move_object"), Some(ActionKind::MoveObject));
    /// assert_eq!(ActionKind::parse("can-move-object"), Some(ActionKind::MoveObject));
    /// assert_eq!(ActionKind::parse("fly"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let name = normalized.strip_prefix("can_").unwrap_or(&normalized);
        Self::all().into_iter().find(|kind| kind.as_str() == name)
    }

    /// Get all actions.
    pub fn all() -> Vec<ActionKind> {
        vec![
            ActionKind::AbandonParcel,
            ActionKind::ReclaimParcel,
            ActionKind::EditParcel,
            ActionKind::SellParcel,
            ActionKind::BuyLand,
            ActionKind::IsGod,
            ActionKind::DuplicateObject,
            ActionKind::DeleteObject,
            ActionKind::EditObject,
            ActionKind::ReturnObject,
            ActionKind::TakeObject,
            ActionKind::TakeCopyObject,
            ActionKind::MoveObject,
            ActionKind::EditObjectInventory,
            ActionKind::InstantMessage,
            ActionKind::InventoryTransfer,
            ActionKind::IssueEstateCommand,
            ActionKind::ObjectEntry,
            ActionKind::RezObject,
            ActionKind::RunConsoleCommand,
            ActionKind::RunScript,
            ActionKind::ResetScript,
            ActionKind::Terraform,
            ActionKind::LinkObject,
            ActionKind::DelinkObject,
            ActionKind::ViewScript,
            ActionKind::EditScript,
            ActionKind::ViewNotecard,
            ActionKind::EditNotecard,
            ActionKind::CreateObjectInventory,
            ActionKind::CreateUserInventory,
            ActionKind::CopyObjectInventory,
            ActionKind::DeleteObjectInventory,
            ActionKind::CopyUserInventory,
            ActionKind::EditUserInventory,
            ActionKind::DeleteUserInventory,
            ActionKind::Teleport,
        ]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a script or notecard lives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryLocation {
    /// The actor's own inventory (or the library)
    User,
    /// Inside the given part
    Object(Uuid),
}

impl InventoryLocation {
    /// Map a wire object ID to a location; the nil ID means user inventory.
    pub fn from_object_id(object_id: Uuid) -> Self {
        if object_id.is_nil() {
            InventoryLocation::User
        } else {
            InventoryLocation::Object(object_id)
        }
    }
}

/// A request to authorize one action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    AbandonParcel { actor: Uuid, parcel: Parcel },
    ReclaimParcel { actor: Uuid, parcel: Parcel },
    EditParcel { actor: Uuid, parcel: Parcel },
    SellParcel { actor: Uuid, parcel: Parcel },
    BuyLand { actor: Uuid, parcel: Parcel },
    IsGod { actor: Uuid },
    DuplicateObject {
        actor: Uuid,
        object_id: Uuid,
        object_count: usize,
        position: Vector3,
    },
    DeleteObject { actor: Uuid, object_id: Uuid },
    EditObject { actor: Uuid, object_id: Uuid },
    ReturnObject { actor: Uuid, object_id: Uuid },
    TakeObject { actor: Uuid, object_id: Uuid },
    TakeCopyObject { actor: Uuid, object_id: Uuid },
    MoveObject { actor: Uuid, object_id: Uuid },
    EditObjectInventory { actor: Uuid, object_id: Uuid },
    /// `actor` may be an avatar or the object sending on its owner's behalf
    InstantMessage { actor: Uuid, target: Uuid },
    InventoryTransfer { actor: Uuid, target: Uuid },
    IssueEstateCommand { actor: Uuid, owner_command: bool },
    /// Objects cross parcels on their own; there is no acting user
    ObjectEntry {
        object_id: Uuid,
        entering_region: bool,
        new_position: Vector3,
    },
    RezObject {
        actor: Uuid,
        object_count: usize,
        position: Vector3,
    },
    RunConsoleCommand { actor: Uuid },
    RunScript {
        actor: Uuid,
        script_id: Uuid,
        object_id: Uuid,
    },
    ResetScript {
        actor: Uuid,
        object_id: Uuid,
        script_id: Uuid,
    },
    Terraform { actor: Uuid, position: Vector3 },
    LinkObject { actor: Uuid, object_id: Uuid },
    DelinkObject { actor: Uuid, object_id: Uuid },
    ViewScript {
        actor: Uuid,
        item_id: Uuid,
        location: InventoryLocation,
    },
    EditScript {
        actor: Uuid,
        item_id: Uuid,
        location: InventoryLocation,
    },
    ViewNotecard {
        actor: Uuid,
        item_id: Uuid,
        location: InventoryLocation,
    },
    EditNotecard {
        actor: Uuid,
        item_id: Uuid,
        location: InventoryLocation,
    },
    CreateObjectInventory {
        actor: Uuid,
        object_id: Uuid,
        inventory_type: InventoryType,
    },
    CreateUserInventory {
        actor: Uuid,
        inventory_type: InventoryType,
    },
    CopyObjectInventory {
        actor: Uuid,
        item_id: Uuid,
        object_id: Uuid,
    },
    DeleteObjectInventory {
        actor: Uuid,
        item_id: Uuid,
        object_id: Uuid,
    },
    CopyUserInventory { actor: Uuid, item_id: Uuid },
    EditUserInventory { actor: Uuid, item_id: Uuid },
    DeleteUserInventory { actor: Uuid, item_id: Uuid },
    Teleport { actor: Uuid },
}

impl ActionRequest {
    /// The kind of action requested.
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::AbandonParcel { .. } => ActionKind::AbandonParcel,
            ActionRequest::ReclaimParcel { .. } => ActionKind::ReclaimParcel,
            ActionRequest::EditParcel { .. } => ActionKind::EditParcel,
            ActionRequest::SellParcel { .. } => ActionKind::SellParcel,
            ActionRequest::BuyLand { .. } => ActionKind::BuyLand,
            ActionRequest::IsGod { .. } => ActionKind::IsGod,
            ActionRequest::DuplicateObject { .. } => ActionKind::DuplicateObject,
            ActionRequest::DeleteObject { .. } => ActionKind::DeleteObject,
            ActionRequest::EditObject { .. } => ActionKind::EditObject,
            ActionRequest::ReturnObject { .. } => ActionKind::ReturnObject,
            ActionRequest::TakeObject { .. } => ActionKind::TakeObject,
            ActionRequest::TakeCopyObject { .. } => ActionKind::TakeCopyObject,
            ActionRequest::MoveObject { .. } => ActionKind::MoveObject,
            ActionRequest::EditObjectInventory { .. } => ActionKind::EditObjectInventory,
            ActionRequest::InstantMessage { .. } => ActionKind::InstantMessage,
            ActionRequest::InventoryTransfer { .. } => ActionKind::InventoryTransfer,
            ActionRequest::IssueEstateCommand { .. } => ActionKind::IssueEstateCommand,
            ActionRequest::ObjectEntry { .. } => ActionKind::ObjectEntry,
            ActionRequest::RezObject { .. } => ActionKind::RezObject,
            ActionRequest::RunConsoleCommand { .. } => ActionKind::RunConsoleCommand,
            ActionRequest::RunScript { .. } => ActionKind::RunScript,
            ActionRequest::ResetScript { .. } => ActionKind::ResetScript,
            ActionRequest::Terraform { .. } => ActionKind::Terraform,
            ActionRequest::LinkObject { .. } => ActionKind::LinkObject,
            ActionRequest::DelinkObject { .. } => ActionKind::DelinkObject,
            ActionRequest::ViewScript { .. } => ActionKind::ViewScript,
            ActionRequest::EditScript { .. } => ActionKind::EditScript,
            ActionRequest::ViewNotecard { .. } => ActionKind::ViewNotecard,
            ActionRequest::EditNotecard { .. } => ActionKind::EditNotecard,
            ActionRequest::CreateObjectInventory { .. } => ActionKind::CreateObjectInventory,
            ActionRequest::CreateUserInventory { .. } => ActionKind::CreateUserInventory,
            ActionRequest::CopyObjectInventory { .. } => ActionKind::CopyObjectInventory,
            ActionRequest::DeleteObjectInventory { .. } => ActionKind::DeleteObjectInventory,
            ActionRequest::CopyUserInventory { .. } => ActionKind::CopyUserInventory,
            ActionRequest::EditUserInventory { .. } => ActionKind::EditUserInventory,
            ActionRequest::DeleteUserInventory { .. } => ActionKind::DeleteUserInventory,
            ActionRequest::Teleport { .. } => ActionKind::Teleport,
        }
    }

    /// The acting user, if the action has one.
    pub fn actor(&self) -> Option<Uuid> {
        match self {
            ActionRequest::ObjectEntry { .. } => None,
            ActionRequest::AbandonParcel { actor, .. }
            | ActionRequest::ReclaimParcel { actor, .. }
            | ActionRequest::EditParcel { actor, .. }
            | ActionRequest::SellParcel { actor, .. }
            | ActionRequest::BuyLand { actor, .. }
            | ActionRequest::IsGod { actor }
            | ActionRequest::DuplicateObject { actor, .. }
            | ActionRequest::DeleteObject { actor, .. }
            | ActionRequest::EditObject { actor, .. }
            | ActionRequest::ReturnObject { actor, .. }
            | ActionRequest::TakeObject { actor, .. }
            | ActionRequest::TakeCopyObject { actor, .. }
            | ActionRequest::MoveObject { actor, .. }
            | ActionRequest::EditObjectInventory { actor, .. }
            | ActionRequest::InstantMessage { actor, .. }
            | ActionRequest::InventoryTransfer { actor, .. }
            | ActionRequest::IssueEstateCommand { actor, .. }
            | ActionRequest::RezObject { actor, .. }
            | ActionRequest::RunConsoleCommand { actor }
            | ActionRequest::RunScript { actor, .. }
            | ActionRequest::ResetScript { actor, .. }
            | ActionRequest::Terraform { actor, .. }
            | ActionRequest::LinkObject { actor, .. }
            | ActionRequest::DelinkObject { actor, .. }
            | ActionRequest::ViewScript { actor, .. }
            | ActionRequest::EditScript { actor, .. }
            | ActionRequest::ViewNotecard { actor, .. }
            | ActionRequest::EditNotecard { actor, .. }
            | ActionRequest::CreateObjectInventory { actor, .. }
            | ActionRequest::CreateUserInventory { actor, .. }
            | ActionRequest::CopyObjectInventory { actor, .. }
            | ActionRequest::DeleteObjectInventory { actor, .. }
            | ActionRequest::CopyUserInventory { actor, .. }
            | ActionRequest::EditUserInventory { actor, .. }
            | ActionRequest::DeleteUserInventory { actor, .. }
            | ActionRequest::Teleport { actor } => Some(*actor),
        }
    }
}
