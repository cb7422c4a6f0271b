use crate::storage::ETag;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Attribute that decides which partition a contact lives in.
pub const CONTACT_PARTITION_KEY_PATH: &str = "contactType";

/// A contact document.
///
/// Only `id` and `contactType` matter to the update workflow; everything else
/// is carried through untouched, including fields this type does not name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Externally assigned identifier. Always overwritten from the request path on update.
    #[serde(rename = "id", default, deserialize_with = "lenient_string")]
    pub contact_id: String,
    /// Partition-determining attribute. Never trusted from an inbound body.
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Accepts any JSON value, keeping strings and mapping everything else to `""`.
///
/// Both attributes using it are overwritten by the updater before a write.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// A contact together with the entity tag of the stored version it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedContact {
    pub contact: Contact,
    pub etag: ETag,
}
