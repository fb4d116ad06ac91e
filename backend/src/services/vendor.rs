//! # Vendor Account
//!
//! The in-memory vendor document: field rules, defaults and the password
//! state that decides whether the next save has to hash.
//!
//! ## Password State
//!
//! ```text
//!   Vendor::new / set_password          save()
//!   ───────────────────────────► Plaintext ───► Hashed
//!                                                 │
//!   load from store ──────────────────────────────┘
//! ```
//!
//! Only `Plaintext` is hashed on save, so saving after an unrelated change
//! never re-hashes an existing hash.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::VendorRecord;

use super::password::{verify_password, PasswordError};

/// Default latitude (Mumbai).
pub const DEFAULT_LATITUDE: f64 = 19.076;
/// Default longitude (Mumbai).
pub const DEFAULT_LONGITUDE: f64 = 72.8777;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
        )
        .expect("Invalid email regex")
    })
}

/// Whether `email` matches the accepted email format.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Geographic position of a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Fill whichever coordinate is missing with its default.
    pub fn with_defaults(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude: latitude.unwrap_or(DEFAULT_LATITUDE),
            longitude: longitude.unwrap_or(DEFAULT_LONGITUDE),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

/// Password as held by an in-memory vendor.
#[derive(Clone, PartialEq, Eq)]
pub enum Password {
    /// Set or changed since the last save; hashed on the next save.
    Plaintext(String),
    /// bcrypt hash, unchanged since it was loaded or saved.
    Hashed(String),
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext(_) => f.write_str("Plaintext(<redacted>)"),
            Self::Hashed(_) => f.write_str("Hashed(<redacted>)"),
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Whether `field` is among the failures.
    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "Vendor validation failed: {}", messages.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// A vendor account document.
///
/// The id is assigned on construction, so a token can be minted for a
/// vendor before it is first saved.
#[derive(Debug, Clone)]
pub struct Vendor {
    id: Uuid,
    pub name: String,
    pub email: String,
    password: Password,
    pub location: Location,
    pub rating: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    persisted: bool,
}

impl Vendor {
    /// Create an unsaved vendor with the default location and a zero rating.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password: Password::Plaintext(password.into()),
            location: Location::default(),
            rating: 0.0,
            created_at: now,
            updated_at: now,
            persisted: false,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Rebuild a saved vendor from its database row.
    pub fn from_record(record: VendorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            password: Password::Hashed(record.password_hash),
            location: Location::new(record.latitude, record.longitude),
            rating: record.rating,
            created_at: record.created_at,
            updated_at: record.updated_at,
            persisted: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the vendor has been written to the store at least once.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Replace the password. The next save hashes it.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Password::Plaintext(password.into());
    }

    /// Whether the password changed since the last save.
    pub fn is_password_modified(&self) -> bool {
        matches!(self.password, Password::Plaintext(_))
    }

    /// The stored hash, if the password is not pending a save.
    pub fn password_hash(&self) -> Option<&str> {
        match &self.password {
            Password::Hashed(hash) => Some(hash),
            Password::Plaintext(_) => None,
        }
    }

    /// Check every field rule and collect all failures.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: &'static str, message: String| {
            errors.push(FieldError { field, message });
        };

        let name_len = self.name.chars().count();
        if name_len == 0 {
            fail("name", "Please provide name".to_string());
        } else if name_len < NAME_MIN_LEN {
            fail("name", format!("Name must be at least {} characters", NAME_MIN_LEN));
        } else if name_len > NAME_MAX_LEN {
            fail("name", format!("Name must be at most {} characters", NAME_MAX_LEN));
        }

        if self.email.is_empty() {
            fail("email", "Please provide email".to_string());
        } else if !is_valid_email(&self.email) {
            fail("email", "Please provide valid email".to_string());
        }

        match &self.password {
            Password::Plaintext(p) if p.is_empty() => {
                fail("password", "Please provide password".to_string());
            }
            Password::Plaintext(p) if p.chars().count() < PASSWORD_MIN_LEN => {
                fail(
                    "password",
                    format!("Password must be at least {} characters", PASSWORD_MIN_LEN),
                );
            }
            Password::Hashed(h) if h.is_empty() => {
                fail("password", "Please provide password".to_string());
            }
            _ => {}
        }

        if !self.location.latitude.is_finite() {
            fail("location.latitude", "Please provide latitude".to_string());
        }
        if !self.location.longitude.is_finite() {
            fail("location.longitude", "Please provide longitude".to_string());
        }

        // TODO: bound rating once product settles on a rating scale
        if !self.rating.is_finite() {
            fail("rating", "Rating must be a number".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }

    /// Compare a plaintext candidate against the stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and also when the password is still
    /// pending a save, since there is no stored hash to match yet.
    pub async fn compare_password(&self, candidate: &str) -> Result<bool, PasswordError> {
        match &self.password {
            Password::Hashed(hash) => verify_password(candidate, hash).await,
            Password::Plaintext(_) => Ok(false),
        }
    }

    /// Swap a pending plaintext for its hash.
    pub(crate) fn apply_password_hash(&mut self, hash: String) {
        self.password = Password::Hashed(hash);
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    /// Row image of this vendor. `None` while the password is plaintext.
    pub fn to_record(&self) -> Option<VendorRecord> {
        let password_hash = self.password_hash()?.to_string();
        Some(VendorRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash,
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            rating: self.rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
