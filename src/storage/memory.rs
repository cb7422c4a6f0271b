use super::error::{Result, StoreError};
use super::partitioner::PartitionManager;
use super::store::DocumentStore;
use super::types::{
    ContainerRef, ContinuationToken, ETag, FeedPage, PartitionKey, QueryDefinition, QueryOptions,
    ReplaceOptions, StoredDocument,
};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use std::sync::Arc;

/// Attribute every document must carry as its identifier.
pub const ID_FIELD: &str = "id";

type ItemKey = (PartitionKey, String);
type Shard = Arc<DashMap<ItemKey, StoredEntry>>;

#[derive(Debug, Clone)]
struct StoredEntry {
    etag: ETag,
    body: Value,
}

struct Container {
    partition_key_path: String,
    /// Structure: `Physical partition -> (partition key, id) -> entry`.
    /// Shards are cloned out before use so the outer guard is never held
    /// while an inner map is locked.
    partitions: DashMap<u32, Shard>,
}

impl Container {
    fn shard(&self, partition: u32) -> Option<Shard> {
        self.partitions.get(&partition).map(|s| s.value().clone())
    }

    fn shard_or_create(&self, partition: u32) -> Shard {
        self.partitions
            .entry(partition)
            .or_insert_with(|| Arc::new(DashMap::new()))
            .value()
            .clone()
    }

    fn shards(&self) -> Vec<(u32, Shard)> {
        self.partitions
            .iter()
            .map(|s| (*s.key(), s.value().clone()))
            .collect()
    }
}

/// In-process partitioned document store.
///
/// Each container shards its documents over the physical partitions chosen by
/// `PartitionManager`. Writes to a single document happen under that
/// document's map entry guard, so an `if_match` check and the write it guards
/// cannot interleave with another writer.
pub struct InMemoryDocumentStore {
    containers: DashMap<ContainerRef, Arc<Container>>,
    partitioner: PartitionManager,
}

impl InMemoryDocumentStore {
    pub fn new(partitioner: PartitionManager) -> Self {
        Self {
            containers: DashMap::new(),
            partitioner,
        }
    }

    /// Registers a container. Registering an existing container is a no-op.
    pub fn create_container(&self, container: ContainerRef, partition_key_path: impl Into<String>) {
        let partition_key_path = partition_key_path.into();
        self.containers.entry(container.clone()).or_insert_with(|| {
            tracing::info!(
                "Created container {} partitioned by '{}'",
                container,
                partition_key_path
            );
            Arc::new(Container {
                partition_key_path,
                partitions: DashMap::new(),
            })
        });
    }

    pub fn document_count(&self, container: &ContainerRef) -> usize {
        self.containers
            .get(container)
            .map(|c| c.shards().iter().map(|(_, shard)| shard.len()).sum())
            .unwrap_or(0)
    }

    fn container(&self, container: &ContainerRef) -> Result<Arc<Container>> {
        self.containers
            .get(container)
            .map(|c| c.value().clone())
            .ok_or_else(|| StoreError::ContainerNotFound(container.clone()))
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new(PartitionManager::default())
    }
}

fn id_of(body: &Value) -> Result<String> {
    match body.get(ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        _ => Err(StoreError::InvalidDocument(format!(
            "document must carry a non-empty string '{}'",
            ID_FIELD
        ))),
    }
}

fn partition_key_of(body: &Value, path: &str) -> Result<PartitionKey> {
    match body.get(path) {
        Some(Value::String(value)) if !value.is_empty() => Ok(PartitionKey(value.clone())),
        _ => Err(StoreError::InvalidDocument(format!(
            "document must carry a non-empty string partition key '{}'",
            path
        ))),
    }
}

fn ensure_object(body: &Value) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidDocument(
            "document must be a JSON object".to_string(),
        ))
    }
}

fn parse_offset(token: Option<&ContinuationToken>) -> Result<usize> {
    match token {
        None => Ok(0),
        Some(token) => token
            .0
            .parse()
            .map_err(|_| StoreError::InvalidContinuation(token.0.clone())),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query_page(
        &self,
        container: &ContainerRef,
        query: &QueryDefinition,
        options: QueryOptions,
        continuation: Option<&ContinuationToken>,
    ) -> Result<FeedPage> {
        let data = self.container(container)?;
        let offset = parse_offset(continuation)?;
        let page_size = options.max_item_count.max(1);

        // Stable order (physical partition, partition key, id) keeps offsets
        // meaningful between pages.
        let mut matches: Vec<(u32, StoredDocument)> = Vec::new();
        for (partition, shard) in data.shards() {
            for item in shard.iter() {
                if query.matches(&item.value().body) {
                    let (partition_key, id) = item.key().clone();
                    matches.push((
                        partition,
                        StoredDocument {
                            id,
                            partition_key,
                            etag: item.value().etag.clone(),
                            body: item.value().body.clone(),
                        },
                    ));
                }
            }
        }
        matches.sort_by(|(pa, a), (pb, b)| {
            pa.cmp(pb)
                .then_with(|| a.partition_key.cmp(&b.partition_key))
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matches.len();
        let items: Vec<StoredDocument> = matches
            .into_iter()
            .skip(offset)
            .take(page_size)
            .map(|(_, doc)| doc)
            .collect();

        let next = offset.saturating_add(page_size);
        let continuation = (next < total).then(|| ContinuationToken(next.to_string()));

        tracing::debug!(
            "Query on {} returned {} item(s) at offset {} (total {})",
            container,
            items.len(),
            offset,
            total
        );

        Ok(FeedPage {
            items,
            continuation,
        })
    }

    async fn read_item(
        &self,
        container: &ContainerRef,
        id: &str,
        partition_key: &PartitionKey,
    ) -> Result<StoredDocument> {
        let data = self.container(container)?;
        let partition = self.partitioner.get_partition(partition_key);
        let key = (partition_key.clone(), id.to_string());

        if let Some(shard) = data.shard(partition)
            && let Some(entry) = shard.get(&key)
        {
            return Ok(StoredDocument {
                id: id.to_string(),
                partition_key: partition_key.clone(),
                etag: entry.etag.clone(),
                body: entry.body.clone(),
            });
        }

        Err(StoreError::NotFound {
            id: id.to_string(),
            partition_key: partition_key.clone(),
        })
    }

    async fn replace_item(
        &self,
        container: &ContainerRef,
        id: &str,
        partition_key: &PartitionKey,
        body: Value,
        options: ReplaceOptions,
    ) -> Result<StoredDocument> {
        let data = self.container(container)?;
        ensure_object(&body)?;

        if id_of(&body)? != id {
            return Err(StoreError::InvalidDocument(format!(
                "document id does not match target id '{}'",
                id
            )));
        }
        if &partition_key_of(&body, &data.partition_key_path)? != partition_key {
            return Err(StoreError::InvalidDocument(format!(
                "partition key in document does not match target partition key '{}'",
                partition_key
            )));
        }

        let not_found = || StoreError::NotFound {
            id: id.to_string(),
            partition_key: partition_key.clone(),
        };

        let partition = self.partitioner.get_partition(partition_key);
        let shard = data.shard(partition).ok_or_else(not_found)?;
        let mut entry = shard
            .get_mut(&(partition_key.clone(), id.to_string()))
            .ok_or_else(not_found)?;

        if let Some(expected) = options.if_match
            && expected != entry.etag
        {
            return Err(StoreError::PreconditionFailed {
                id: id.to_string(),
                expected,
                actual: entry.etag.clone(),
            });
        }

        entry.etag = ETag::new();
        entry.body = body;

        Ok(StoredDocument {
            id: id.to_string(),
            partition_key: partition_key.clone(),
            etag: entry.etag.clone(),
            body: entry.body.clone(),
        })
    }

    async fn create_item(&self, container: &ContainerRef, body: Value) -> Result<StoredDocument> {
        let data = self.container(container)?;
        ensure_object(&body)?;
        let id = id_of(&body)?;
        let partition_key = partition_key_of(&body, &data.partition_key_path)?;

        let partition = self.partitioner.get_partition(&partition_key);
        let shard = data.shard_or_create(partition);

        match shard.entry((partition_key.clone(), id.clone())) {
            Entry::Occupied(_) => Err(StoreError::Conflict { id, partition_key }),
            Entry::Vacant(slot) => {
                let etag = ETag::new();
                slot.insert(StoredEntry {
                    etag: etag.clone(),
                    body: body.clone(),
                });
                tracing::debug!("Stored document {} in partition {}", id, partition);
                Ok(StoredDocument {
                    id,
                    partition_key,
                    etag,
                    body,
                })
            }
        }
    }
}
