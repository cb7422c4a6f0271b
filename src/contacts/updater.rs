//! Contact Update Workflow
//!
//! Callers only know a contact's id, but the store needs `(id, partition key)` for
//! point operations. `ContactUpdater` bridges the gap in three round trips:
//!
//! 1. **Query**: look the id up with a one-item-per-page query and stop at the first hit.
//! 2. **Read**: point-read the candidate with its own partition key to get the
//!    authoritative record and its entity tag.
//! 3. **Replace**: write the payload back at `(id, read-back partition key)`, conditional
//!    on the entity tag, so a concurrent write in between is reported instead of lost.

use super::types::{Contact, VersionedContact};
use crate::storage::memory::ID_FIELD;
use crate::storage::{
    ContainerRef, DocumentStore, QueryDefinition, QueryOptions, QueryPages, ReplaceOptions,
    StoreError, StoredDocument,
};

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Progress of a single update invocation.
///
/// `Started -> Querying -> {NotFound | Found -> Reading -> Replacing -> Replaced}`,
/// with `Failed` reachable from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStage {
    Started,
    Querying,
    NotFound,
    Found,
    Reading,
    Replacing,
    Replaced,
    Failed,
}

impl fmt::Display for UpdateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateStage::Started => "started",
            UpdateStage::Querying => "querying",
            UpdateStage::NotFound => "not found",
            UpdateStage::Found => "found",
            UpdateStage::Reading => "reading",
            UpdateStage::Replacing => "replacing",
            UpdateStage::Replaced => "replaced",
            UpdateStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Contact id must not be empty")]
    InvalidId,

    #[error("Contact {id} not found")]
    NotFound { id: String },

    #[error("Contact {id} was modified concurrently")]
    Conflict { id: String },

    #[error("Store failure while {stage} contact {id}: {source}")]
    StoreFailure {
        id: String,
        stage: UpdateStage,
        #[source]
        source: StoreError,
    },
}

impl UpdateError {
    /// Terminal stage the invocation ended in.
    pub fn stage(&self) -> UpdateStage {
        match self {
            UpdateError::NotFound { .. } => UpdateStage::NotFound,
            _ => UpdateStage::Failed,
        }
    }
}

fn store_failure(id: &str, stage: UpdateStage) -> impl FnOnce(StoreError) -> UpdateError + '_ {
    move |source| UpdateError::StoreFailure {
        id: id.to_string(),
        stage,
        source,
    }
}

/// Updates contacts in a partitioned container when only their id is known.
///
/// Holds no per-request state; one instance is shared by all concurrent requests.
pub struct ContactUpdater {
    store: Arc<dyn DocumentStore>,
    container: ContainerRef,
}

impl ContactUpdater {
    pub fn new(store: Arc<dyn DocumentStore>, container: ContainerRef) -> Self {
        Self { store, container }
    }

    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    /// Replaces the stored contact `id` with `payload`.
    ///
    /// The payload's `id` is overwritten with `id`, and its `contactType` with the
    /// stored document's, so the document never changes identity or partition.
    /// Failures are logged here exactly once; success logs nothing above debug.
    pub async fn update(&self, id: &str, payload: Contact) -> Result<VersionedContact, UpdateError> {
        let result = self.run_update(id, payload).await;
        if let Err(e) = &result {
            log_failure("update", id, e);
        }
        result
    }

    /// Looks a contact up by id alone, through the same query-then-read path as `update`.
    pub async fn fetch(&self, id: &str) -> Result<VersionedContact, UpdateError> {
        let result = self.run_fetch(id).await;
        if let Err(e) = &result {
            log_failure("read", id, e);
        }
        result
    }

    async fn run_update(
        &self,
        id: &str,
        mut payload: Contact,
    ) -> Result<VersionedContact, UpdateError> {
        if id.is_empty() {
            return Err(UpdateError::InvalidId);
        }
        payload.contact_id = id.to_string();

        let current = self.read_current(id).await?;

        payload.contact_type = current.partition_key.0.clone();
        let body = serde_json::to_value(&payload)
            .map_err(|e| store_failure(id, UpdateStage::Replacing)(e.into()))?;

        let replaced = self
            .store
            .replace_item(
                &self.container,
                &current.id,
                &current.partition_key,
                body,
                ReplaceOptions::if_match(current.etag),
            )
            .await
            .map_err(|e| match e {
                StoreError::PreconditionFailed { .. } => UpdateError::Conflict {
                    id: id.to_string(),
                },
                other => store_failure(id, UpdateStage::Replacing)(other),
            })?;

        let etag = replaced.etag.clone();
        let contact = replaced
            .into_typed::<Contact>()
            .map_err(store_failure(id, UpdateStage::Replacing))?;

        tracing::debug!("Contact {} {}", id, UpdateStage::Replaced);
        Ok(VersionedContact { contact, etag })
    }

    async fn run_fetch(&self, id: &str) -> Result<VersionedContact, UpdateError> {
        if id.is_empty() {
            return Err(UpdateError::InvalidId);
        }
        let current = self.read_current(id).await?;
        let etag = current.etag.clone();
        let contact = current
            .into_typed::<Contact>()
            .map_err(store_failure(id, UpdateStage::Reading))?;
        Ok(VersionedContact { contact, etag })
    }

    /// Resolves the partition key for `id` and point-reads the stored record.
    async fn read_current(&self, id: &str) -> Result<StoredDocument, UpdateError> {
        let Some(candidate) = self
            .locate(id)
            .await
            .map_err(store_failure(id, UpdateStage::Querying))?
        else {
            return Err(UpdateError::NotFound { id: id.to_string() });
        };

        tracing::debug!(
            "Contact {} {} in partition {}",
            id,
            UpdateStage::Found,
            candidate.partition_key
        );

        self.store
            .read_item(&self.container, id, &candidate.partition_key)
            .await
            .map_err(store_failure(id, UpdateStage::Reading))
    }

    async fn locate(&self, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let mut pages = QueryPages::new(
            self.store.as_ref(),
            &self.container,
            QueryDefinition::field_equals(ID_FIELD, id),
            QueryOptions { max_item_count: 1 },
        );
        pages.find_first().await
    }
}

fn log_failure(action: &str, id: &str, error: &UpdateError) {
    match error {
        UpdateError::InvalidId => tracing::warn!("Rejected contact {} with empty id", action),
        UpdateError::NotFound { .. } => tracing::error!("Couldn't find contact with id {}", id),
        UpdateError::Conflict { .. } => {
            tracing::error!("Contact {} changed between read and replace", id)
        }
        UpdateError::StoreFailure { stage, source, .. } => {
            tracing::error!(
                "Could not {} contact {} while {}: {}",
                action,
                id,
                stage,
                source
            )
        }
    }
}
