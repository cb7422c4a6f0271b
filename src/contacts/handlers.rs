use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use super::protocol::{ENDPOINT_CONTACT, ENDPOINT_HEALTH, HealthResponse};
use super::types::{Contact, VersionedContact};
use super::updater::{ContactUpdater, UpdateError};

/// Builds the contact service router around a shared updater.
pub fn router(updater: Arc<ContactUpdater>) -> Router {
    Router::new()
        .route(
            ENDPOINT_CONTACT,
            get(handle_get_contact).put(handle_update_contact),
        )
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(updater))
}

/// `PUT /contacts/:id`
///
/// The body is decoded here rather than through the `Json` extractor so that a
/// malformed body gets the same bare 500 as any other failure.
pub async fn handle_update_contact(
    Extension(updater): Extension<Arc<ContactUpdater>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let payload: Contact = match serde_json::from_slice(&body) {
        Ok(contact) => contact,
        Err(e) => {
            tracing::error!("Failed to deserialize contact {}: {}", id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match updater.update(&id, payload).await {
        Ok(updated) => versioned_response(updated),
        Err(e) => e.into_response(),
    }
}

/// `GET /contacts/:id`
pub async fn handle_get_contact(
    Extension(updater): Extension<Arc<ContactUpdater>>,
    Path(id): Path<String>,
) -> Response {
    match updater.fetch(&id).await {
        Ok(found) => versioned_response(found),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

fn versioned_response(versioned: VersionedContact) -> Response {
    let mut response = (StatusCode::OK, Json(versioned.contact)).into_response();
    match HeaderValue::from_str(&format!("\"{}\"", versioned.etag)) {
        Ok(value) => {
            response.headers_mut().insert(header::ETAG, value);
        }
        Err(e) => tracing::error!("Failed to encode etag {}: {}", versioned.etag, e),
    }
    response
}

/// Failure bodies are always empty; the cause has already been logged by the updater.
impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        let status = match self {
            UpdateError::InvalidId => StatusCode::BAD_REQUEST,
            UpdateError::NotFound { .. } => StatusCode::NOT_FOUND,
            UpdateError::Conflict { .. } => StatusCode::CONFLICT,
            UpdateError::StoreFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        status.into_response()
    }
}
