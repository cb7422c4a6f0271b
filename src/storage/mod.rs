//! Partitioned Document Storage Module
//!
//! Defines the `DocumentStore` seam the contact workflow runs against, and an
//! in-process implementation of it.
//!
//! ## Core Concepts
//! - **Containers**: Documents live in named containers (`database/container`), each
//!   with a designated partition-key attribute.
//! - **Partitioning**: `PartitionManager` hashes a partition-key value onto a fixed
//!   number of physical partitions (shards).
//! - **Point Operations**: Reads and replaces address a document by `(id, partition key)`.
//! - **Queries**: Filtered queries return paginated results; `QueryPages` walks them lazily.
//! - **Versioning**: Every write assigns a fresh `ETag`; replaces may be made
//!   conditional on the tag read earlier.

pub mod error;
pub mod feed;
pub mod memory;
pub mod partitioner;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use feed::QueryPages;
pub use memory::InMemoryDocumentStore;
pub use partitioner::PartitionManager;
pub use store::DocumentStore;
pub use types::*;
