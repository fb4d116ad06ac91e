//! # Database Models
//!
//! Data structures that map to database tables. Each struct represents
//! a row in a table.
//!
//! | Table | Description |
//! |-------|-------------|
//! | `vendors` | Registered seller accounts |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a vendor row in the database.
///
/// The password column only ever holds a bcrypt hash. A record is built
/// from a [`Vendor`](crate::services::Vendor) after its password has been
/// hashed, so a plaintext password has no way into this type.
///
/// ## Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | id | Uuid | Primary key |
/// | name | String | Display name, 3-50 characters |
/// | email | String | Login email, unique |
/// | password_hash | String | bcrypt hash (`$2b$10$...`) |
/// | latitude / longitude | f64 | Vendor location |
/// | rating | f64 | Average rating, 0 for new vendors |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRecord {
    /// Unique vendor ID (UUID v4).
    pub id: Uuid,

    /// Display name of the vendor.
    pub name: String,

    /// Login email. Unique across all vendors.
    pub email: String,

    /// Salted bcrypt hash of the password.
    pub password_hash: String,

    /// Latitude of the vendor's stall or shop.
    pub latitude: f64,

    /// Longitude of the vendor's stall or shop.
    pub longitude: f64,

    /// Current rating.
    pub rating: f64,

    /// When the vendor registered.
    pub created_at: DateTime<Utc>,

    /// When this record was last written.
    pub updated_at: DateTime<Utc>,
}
