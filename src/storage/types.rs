//! Document Store Types
//!
//! Values exchanged across the `DocumentStore` seam: container addressing,
//! partition keys, entity tags, query definitions and result pages.

use super::error::StoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Addresses one logical collection of documents (`database/container`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerRef {
    pub database: String,
    pub container: String,
}

impl ContainerRef {
    pub fn new(database: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            container: container.into(),
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.database, self.container)
    }
}

/// Value of the partition-determining attribute of a document.
///
/// Point reads and writes need this together with the document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionKey(pub String);

impl PartitionKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque version token regenerated on every write of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ETag(pub String);

impl ETag {
    /// Generates a fresh random UUID v4-based tag.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ETag {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Equality filter on a top-level document attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDefinition {
    pub field: String,
    pub value: Value,
}

impl QueryDefinition {
    pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, body: &Value) -> bool {
        body.get(&self.field) == Some(&self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Upper bound on the number of documents returned in one page.
    /// Values below 1 are treated as 1.
    pub max_item_count: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { max_item_count: 100 }
    }
}

/// Opaque cursor pointing at the next page of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationToken(pub String);

/// A single page of query results.
///
/// `continuation` is `None` once the result set is exhausted.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub items: Vec<StoredDocument>,
    pub continuation: Option<ContinuationToken>,
}

impl FeedPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A document as held by the store, with its addressing and version metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub partition_key: PartitionKey,
    pub etag: ETag,
    pub body: Value,
}

impl StoredDocument {
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(self.body)?)
    }
}

/// Options for a point replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// When set, the replace only succeeds if the stored tag still matches.
    pub if_match: Option<ETag>,
}

impl ReplaceOptions {
    pub fn if_match(etag: ETag) -> Self {
        Self {
            if_match: Some(etag),
        }
    }
}
