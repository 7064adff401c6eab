//! # Region Estate Model
//!
//! This crate provides the region and estate data that the region permission
//! engine reads when resolving who holds authority in a region.
//!
//! ## Overview
//!
//! The region-estate crate handles:
//! - **Regions**: Region identity and the assigned master avatar
//! - **Estates**: Estate owner and the set of estate managers
//! - **Profiles**: User profiles carrying a god level
//! - **User Sets**: Configurable groups of users (`All`, `Administrators`)
//!
//! ## Architecture
//!
//! ```text
//! RegionInfo
//!   ├─ master_avatar (region owner)
//!   └─ EstateSettings
//!         ├─ estate_owner
//!         └─ managers
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use region_estate::{EstateSettings, RegionInfo};
//! use uuid::Uuid;
//!
//! let owner = Uuid::now_v7();
//! let manager = Uuid::now_v7();
//!
//! let mut estate = EstateSettings::new(owner);
//! estate.add_manager(manager);
//!
//! let region = RegionInfo::new("Sandbox", estate);
//! assert!(region.estate.is_estate_manager(manager));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod estate;
pub mod profile;
pub mod region;
pub mod roles;

// Re-export main types for convenience
pub use estate::EstateSettings;
pub use profile::{GodLevel, UserProfile};
pub use region::RegionInfo;
pub use roles::UserSet;
