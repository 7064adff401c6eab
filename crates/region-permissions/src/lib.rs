//! # Region Permissions
//!
//! This crate decides whether an action in a shared-world region is
//! permitted, and computes the object flags each viewer is told about.
//!
//! ## Overview
//!
//! The region-permissions crate handles:
//! - **Identity**: Who is an administrator (god) or estate manager
//! - **Bypass**: A switch that answers every check with a forced outcome
//! - **Parcels and Estates**: Authority over land and estate tools
//! - **Objects**: Ownership, locking, attachments and admin-owned objects
//! - **Client Flags**: Per-viewer capability bits for an object
//! - **Actions**: One overridable rule per action kind
//!
//! ## Architecture
//!
//! ```text
//! PermissionEngine
//!   ├─ ConfigHandle ──> EngineConfig snapshot
//!   ├─ ActionPredicateRegistry (ActionKind -> rule)
//!   └─ World
//!        ├─ SceneGraph     (objects, parts, task inventory)
//!        ├─ LandChannel    (parcel under a point)
//!        └─ UserDirectory  (profiles, user inventory, library)
//!
//! check(request)
//!   └─ BypassGate ─> rule ─> object / parcel / estate evaluators
//!                               └─ identity hierarchy
//! ```
//!
//! Object authority resolves from weakest to strongest, each step
//! overriding the last: owner, attachment, parcel owner, estate manager,
//! admin-owned object, administrator.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use region_estate::{EstateSettings, RegionInfo};
//! use region_permissions::{
//!     ActionRequest, EngineConfig, InMemoryWorld, ObjectPart, PermissionEngine, SceneObject,
//!     World,
//! };
//! use uuid::Uuid;
//!
//! let memory = Arc::new(InMemoryWorld::new());
//! let region = RegionInfo::new("Sandbox", EstateSettings::new(Uuid::now_v7()));
//! let engine = PermissionEngine::new(region, World::from_shared(memory.clone()), EngineConfig::default());
//!
//! let owner = Uuid::now_v7();
//! let object = SceneObject::new(ObjectPart::new(Uuid::now_v7(), owner));
//! let object_id = object.id();
//! memory.add_object(object);
//!
//! assert!(engine.check(&ActionRequest::EditObject { actor: owner, object_id }));
//! assert!(!engine.check(&ActionRequest::EditObject { actor: Uuid::now_v7(), object_id }));
//! ```
//!
//! ## Operator Commands
//!
//! `bypass permissions`, `force permissions` and `debug permissions` each
//! take a boolean and produce a new configuration snapshot; see
//! [`PermissionEngine::run_command`].
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod actions;
mod client_flags;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
mod estate;
pub mod gate;
mod hierarchy;
mod inventory;
pub mod masks;
pub mod memory;
mod object;
mod parcel;
pub mod registry;
mod rules;
pub mod world;

// Re-export main types for convenience
pub use actions::{ActionKind, ActionRequest, InventoryLocation};
pub use commands::{CommandOutcome, ConsoleCommand};
pub use config::{ConfigHandle, EngineConfig, StartupConfig};
pub use context::PermissionContext;
pub use engine::PermissionEngine;
pub use error::{CommandError, ConfigError, LookupError, LookupResult};
pub use gate::BypassGate;
pub use masks::{
    apply_object_modify_masks, AssetKind, InventoryType, ObjectFlags, ParcelFlags, PermissionMask,
};
pub use memory::InMemoryWorld;
pub use registry::{ActionPredicateRegistry, ActionRule};
pub use world::{
    Entity, InventoryItem, LandChannel, ObjectPart, Parcel, SceneGraph, SceneObject, UserDirectory,
    Vector3, World,
};
