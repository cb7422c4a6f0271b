use super::error::Result;
use super::types::{
    ContainerRef, ContinuationToken, FeedPage, PartitionKey, QueryDefinition, QueryOptions,
    ReplaceOptions, StoredDocument,
};

use async_trait::async_trait;
use serde_json::Value;

/// A partitioned document store.
///
/// Documents are addressed by `(id, partition key)`. Callers that only know the
/// id have to go through `query_page` to discover the partition key first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs a filtered query and returns one page of results.
    ///
    /// Pass the previous page's continuation to fetch the next page. A page
    /// without a continuation is the last one.
    async fn query_page(
        &self,
        container: &ContainerRef,
        query: &QueryDefinition,
        options: QueryOptions,
        continuation: Option<&ContinuationToken>,
    ) -> Result<FeedPage>;

    /// Point read by full key.
    async fn read_item(
        &self,
        container: &ContainerRef,
        id: &str,
        partition_key: &PartitionKey,
    ) -> Result<StoredDocument>;

    /// Point replace by full key. The whole body is swapped in one step or not at all.
    async fn replace_item(
        &self,
        container: &ContainerRef,
        id: &str,
        partition_key: &PartitionKey,
        body: Value,
        options: ReplaceOptions,
    ) -> Result<StoredDocument>;

    /// Inserts a new document; the partition key is taken from the body.
    async fn create_item(&self, container: &ContainerRef, body: Value) -> Result<StoredDocument>;
}
