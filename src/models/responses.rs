use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Gift;

/// Result of a suggestion request: the eligible gifts in catalog order
/// plus the size of the catalog they were drawn from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub gifts: Vec<Gift>,
    pub total_candidates: usize,
}

/// Full catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftListResponse {
    pub gifts: Vec<Gift>,
    pub total: usize,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Uniform error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Issued on successful signup or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}
