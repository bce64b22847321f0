//! Newsroom Domain Layer
//!
//! This crate contains the canonical news item model and the persistence
//! boundary that every other crate in the workspace depends upon.
//!
//! ## Key Concepts
//!
//! - **Canonical Item**: The normalized, format-independent news item
//! - **Item Builder**: The single place where item defaults are defined
//! - **Archive Record**: A persisted item plus workflow fields
//! - **Archive Filter**: Query criteria, including the expiry query builder
//!
//! ## Architecture
//!
//! - No parsing or storage code lives here
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod item;
pub mod record;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use filter::ArchiveFilter;
pub use item::{
    CanonicalItem, Category, ItemBuilder, ItemType, MissingField, Place, Subject, DEFAULT_PUBSTATUS,
    DEFAULT_URGENCY,
};
pub use record::{ArchiveRecord, RecordId, RecordPatch, TaskRef};
pub use traits::ArchiveStore;
