//! # API Request Models
//!
//! Structures for incoming API request bodies.
//! Each struct represents the expected JSON body for an endpoint.
//!
//! Required vendor fields are still `Option` here: a missing field should
//! come back as a per-field validation message, not as a JSON parse error.

use serde::{Deserialize, Serialize};

use crate::services::Location;

/// Partial location. Missing coordinates fall back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationInput {
    pub fn into_location(self) -> Location {
        Location::with_defaults(self.latitude, self.longitude)
    }
}

/// Request to register a new vendor.
///
/// ## Example JSON
///
/// ```json
/// {
///     "name": "Green Grocer",
///     "email": "ann@farm.in",
///     "password": "secret1",
///     "location": { "latitude": 12.97, "longitude": 77.59 }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVendorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,

    /// Optional. Defaults to Mumbai.
    pub location: Option<LocationInput>,
}

/// Request to log in.
///
/// ## Example JSON
///
/// ```json
/// { "email": "ann@farm.in", "password": "secret1" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial update of the caller's own profile.
///
/// Absent fields are left untouched. Supplying `password` is the only
/// thing that causes the password to be re-hashed.
///
/// ## Example JSON
///
/// ```json
/// { "name": "Green Grocer & Sons", "location": { "latitude": 18.52 } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,

    /// Missing coordinates keep their current value.
    pub location: Option<LocationInput>,
}

/// Query parameters for vendor listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVendorsQuery {
    /// Page size (default 20, capped at 100).
    pub limit: Option<i64>,
    /// Number of vendors to skip.
    pub offset: Option<i64>,
}
