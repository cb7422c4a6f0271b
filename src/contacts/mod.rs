//! Contact Module
//!
//! The contact update workflow and its HTTP surface.
//!
//! ## Submodules
//! - **`types`**: The `Contact` document model.
//! - **`updater`**: `ContactUpdater`, which resolves a contact's partition key from its id
//!   and performs an entity-tag guarded read-modify-replace.
//! - **`handlers`**: axum handlers translating updater outcomes into HTTP status codes.
//! - **`protocol`**: Route paths and DTOs.
//! - **`seed`**: Startup loading of contacts from a JSON file.

pub mod handlers;
pub mod protocol;
pub mod seed;
pub mod types;
pub mod updater;

pub use types::{CONTACT_PARTITION_KEY_PATH, Contact, VersionedContact};
pub use updater::{ContactUpdater, UpdateError, UpdateStage};
