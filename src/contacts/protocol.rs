//! Contact HTTP Protocol
//!
//! Route paths and response DTOs exposed by the contact service.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Update (`PUT`) or read (`GET`) a single contact by id.
pub const ENDPOINT_CONTACT: &str = "/contacts/:id";
/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
