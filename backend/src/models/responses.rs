//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//! All responses are wrapped in a standard format. No response type
//! carries a password or password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::{FieldError, Location, Vendor};

/// Standard API response wrapper.
///
/// ## Success Response
///
/// ```json
/// { "success": true, "data": { ... }, "error": null }
/// ```
///
/// ## Error Response
///
/// ```json
/// {
///     "success": false,
///     "data": null,
///     "error": {
///         "code": "VALIDATION_ERROR",
///         "message": "Vendor validation failed: Please provide email",
///         "details": [{ "field": "email", "message": "Please provide email" }]
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,

    /// Response data (null on error).
    pub data: Option<T>,

    /// Error information (null on success).
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            }),
        }
    }

    /// Create an error response carrying per-field details.
    pub fn error_with_details(code: &str, message: &str, details: Vec<FieldErrorDetail>) -> Self {
        let mut response = Self::error(code, message);
        if let Some(error) = response.error.as_mut() {
            error.details = Some(details);
        }
        response
    }
}

/// API error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error code (e.g., "DUPLICATE_EMAIL").
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Per-field validation failures, when there are any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<Vec<FieldErrorDetail>>,
}

/// One failed field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorDetail {
    pub field: String,
    pub message: String,
}

impl From<&FieldError> for FieldErrorDetail {
    fn from(e: &FieldError) -> Self {
        Self {
            field: e.field.to_string(),
            message: e.message.clone(),
        }
    }
}

/// The caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub location: Location,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Vendor> for VendorResponse {
    fn from(v: &Vendor) -> Self {
        Self {
            id: v.id(),
            name: v.name.clone(),
            email: v.email.clone(),
            location: v.location,
            rating: v.rating,
            created_at: v.created_at(),
            updated_at: v.updated_at(),
        }
    }
}

/// What buyers see about a vendor. No email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicVendorResponse {
    pub id: Uuid,
    pub name: String,
    pub location: Location,
    pub rating: f64,
}

impl From<&Vendor> for PublicVendorResponse {
    fn from(v: &Vendor) -> Self {
        Self {
            id: v.id(),
            name: v.name.clone(),
            location: v.location,
            rating: v.rating,
        }
    }
}

/// Returned by register and login.
///
/// ## Example Response
///
/// ```json
/// {
///     "success": true,
///     "data": {
///         "vendor": { "id": "550e8400-...", "name": "Green Grocer", ... },
///         "token": "eyJhbGciOiJIUzI1NiJ9..."
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub vendor: VendorResponse,
    pub token: String,
}

/// Vendor listing with pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorListResponse {
    pub vendors: Vec<PublicVendorResponse>,

    /// Current offset.
    pub offset: i64,

    /// Page size used.
    pub limit: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,

    /// Whether the vendor store answered.
    pub database: bool,

    pub version: String,

    pub timestamp: DateTime<Utc>,
}
