//! # Action Predicate Registry
//!
//! Maps every [`ActionKind`] to the rule that decides it. Each kind starts
//! out with its built-in rule; embedders may replace any of them, including
//! the ones that currently always allow.
//!
//! ## Example
//!
//! ```
//! use region_permissions::{ActionKind, ActionPredicateRegistry, ActionRequest};
//!
//! let mut registry = ActionPredicateRegistry::new();
//!
//! // Only administrators may teleport
//! registry.register(ActionKind::Teleport, |ctx, request| {
//!     request.actor().is_some_and(|actor| ctx.is_administrator(actor))
//! });
//!
//! assert!(registry.is_overridden(ActionKind::Teleport));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::actions::{ActionKind, ActionRequest};
use crate::context::PermissionContext;
use crate::masks::AssetKind;

/// A rule deciding one kind of action.
pub type ActionRule = Arc<dyn Fn(&PermissionContext<'_>, &ActionRequest) -> bool + Send + Sync>;

/// The table of rules the engine evaluates.
#[derive(Clone, Default)]
pub struct ActionPredicateRegistry {
    overrides: HashMap<ActionKind, ActionRule>,
}

impl std::fmt::Debug for ActionPredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut overridden: Vec<&'static str> = self.overrides.keys().map(ActionKind::as_str).collect();
        overridden.sort_unstable();
        f.debug_struct("ActionPredicateRegistry")
            .field("overridden", &overridden)
            .finish()
    }
}

impl ActionPredicateRegistry {
    /// Create a registry with the built-in rule for every action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule for `kind`.
    ///
    /// The rule is only consulted for requests of that kind.
    pub fn register<F>(&mut self, kind: ActionKind, rule: F) -> &mut Self
    where
        F: Fn(&PermissionContext<'_>, &ActionRequest) -> bool + Send + Sync + 'static,
    {
        self.overrides.insert(kind, Arc::new(rule));
        self
    }

    /// Restore the built-in rule for `kind`.
    ///
    /// # Returns
    ///
    /// `true` if a replacement was removed
    pub fn reset(&mut self, kind: ActionKind) -> bool {
        self.overrides.remove(&kind).is_some()
    }

    /// Whether the built-in rule for `kind` has been replaced.
    pub fn is_overridden(&self, kind: ActionKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    /// Decide `request` with the rule registered for its kind.
    pub fn evaluate(&self, ctx: &PermissionContext<'_>, request: &ActionRequest) -> bool {
        match self.overrides.get(&request.kind()) {
            Some(rule) => rule(ctx, request),
            None => default_rule(ctx, request),
        }
    }
}

/// The built-in rule for every action.
pub fn default_rule(ctx: &PermissionContext<'_>, request: &ActionRequest) -> bool {
    match request {
        ActionRequest::AbandonParcel { actor, parcel }
        | ActionRequest::ReclaimParcel { actor, parcel }
        | ActionRequest::EditParcel { actor, parcel }
        | ActionRequest::SellParcel { actor, parcel } => ctx.has_parcel_authority(*actor, parcel),

        ActionRequest::IsGod { actor } | ActionRequest::RunConsoleCommand { actor } => {
            ctx.is_administrator(*actor)
        }

        ActionRequest::DuplicateObject {
            actor,
            object_id,
            object_count,
            position,
        } => ctx.can_duplicate_object(*actor, *object_id, *object_count, *position),

        ActionRequest::DeleteObject { actor, object_id }
        | ActionRequest::EditObject { actor, object_id }
        | ActionRequest::ReturnObject { actor, object_id }
        | ActionRequest::TakeObject { actor, object_id } => {
            ctx.generic_object_permission(*actor, *object_id, false)
        }

        ActionRequest::TakeCopyObject { actor, object_id } => ctx.can_take_copy_object(*actor, *object_id),
        ActionRequest::MoveObject { actor, object_id } => ctx.can_move_object(*actor, *object_id),
        ActionRequest::EditObjectInventory { actor, object_id } => {
            ctx.can_edit_object_inventory(*actor, *object_id)
        }

        ActionRequest::InstantMessage { actor, target }
        | ActionRequest::InventoryTransfer { actor, target } => ctx.can_communicate(*actor, *target),

        ActionRequest::IssueEstateCommand { actor, owner_command } => {
            ctx.can_issue_estate_command(*actor, *owner_command)
        }

        ActionRequest::ObjectEntry {
            object_id,
            entering_region,
            new_position,
        } => ctx.can_object_entry(*object_id, *entering_region, *new_position),

        ActionRequest::RezObject {
            actor,
            object_count,
            position,
        } => ctx.can_rez_object(*actor, *object_count, *position),

        ActionRequest::ResetScript {
            actor,
            object_id,
            script_id,
        } => ctx.can_reset_script(*actor, *object_id, *script_id),

        ActionRequest::Terraform { actor, position } => ctx.can_terraform(*actor, *position),

        ActionRequest::ViewScript {
            actor,
            item_id,
            location,
        } => ctx.can_view_asset(AssetKind::Script, *actor, *item_id, *location),
        ActionRequest::EditScript {
            actor,
            item_id,
            location,
        } => ctx.can_edit_script(*actor, *item_id, *location),
        ActionRequest::ViewNotecard {
            actor,
            item_id,
            location,
        }
        | ActionRequest::EditNotecard {
            actor,
            item_id,
            location,
        } => ctx.can_view_asset(AssetKind::Notecard, *actor, *item_id, *location),

        ActionRequest::CreateObjectInventory {
            actor, inventory_type, ..
        }
        | ActionRequest::CreateUserInventory {
            actor, inventory_type,
        } => ctx.can_create_inventory(*actor, *inventory_type),

        ActionRequest::BuyLand { .. }
        | ActionRequest::RunScript { .. }
        | ActionRequest::LinkObject { .. }
        | ActionRequest::DelinkObject { .. }
        | ActionRequest::CopyObjectInventory { .. }
        | ActionRequest::DeleteObjectInventory { .. }
        | ActionRequest::CopyUserInventory { .. }
        | ActionRequest::EditUserInventory { .. }
        | ActionRequest::DeleteUserInventory { .. }
        | ActionRequest::Teleport { .. } => true,
    }
}
