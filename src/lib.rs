//! Contact Manager Library
//!
//! Core modules of the contact service. The binary (`main.rs`) wires them together.
//!
//! ## Architecture Modules
//! - **`config`**: Environment-driven settings resolved once at startup.
//! - **`contacts`**: The update workflow (`ContactUpdater`) and its HTTP handlers. A contact
//!   is addressed by id alone; its partition key is discovered from the stored record.
//! - **`storage`**: The `DocumentStore` seam and a sharded in-memory implementation
//!   supporting paginated queries, point reads and entity-tag guarded replaces.

pub mod config;
pub mod contacts;
pub mod storage;
