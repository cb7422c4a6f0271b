use super::types::Contact;
use crate::storage::{ContainerRef, DocumentStore};

use anyhow::{Context, Result};
use std::path::Path;

/// Loads a JSON array of contacts from `path` and creates each one in `container`.
///
/// Returns the number of contacts created. Stops at the first document the store rejects.
pub async fn load_seed_file(
    store: &dyn DocumentStore,
    container: &ContainerRef,
    path: &Path,
) -> Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read seed file {}", path.display()))?;
    let contacts: Vec<Contact> = serde_json::from_str(&raw)
        .with_context(|| format!("seed file {} is not a JSON array of contacts", path.display()))?;

    let mut created = 0;
    for contact in contacts {
        let body = serde_json::to_value(&contact)?;
        store
            .create_item(container, body)
            .await
            .with_context(|| format!("could not seed contact '{}'", contact.contact_id))?;
        created += 1;
    }

    tracing::info!("Seeded {} contact(s) into {}", created, container);
    Ok(created)
}
