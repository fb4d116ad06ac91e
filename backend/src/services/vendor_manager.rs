//! # Vendor Manager Service
//!
//! The VendorManager is the central service for vendor accounts. It
//! coordinates validation, password hashing, token issuance and the
//! vendor store.
//!
//! ## Flow Example: Registration
//!
//! ```text
//! 1. Client posts /auth/register
//!                ↓
//! 2. VendorManager.register() builds an unsaved Vendor
//!                ↓
//! 3. save(): validate → hash pending password → insert
//!                ↓
//! 4. Store rejects a taken email (unique constraint)
//!                ↓
//! 5. create_jwt() mints the session token
//!                ↓
//! 6. Return vendor + token
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::{DatabaseError, VendorStore};
use crate::models::{LoginRequest, RegisterVendorRequest, UpdateVendorRequest};
use crate::utils::mask_email;

use super::password::PasswordError;
use super::token_issuer::TokenError;
use super::vendor::{Password, ValidationError};
use super::{Claims, FieldError, Location, PasswordHasher, TokenIssuer, Vendor};

/// Errors that can occur in vendor account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// One or more fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another vendor already uses the email.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// No vendor with this id.
    #[error("Vendor not found: {0}")]
    VendorNotFound(Uuid),

    /// Unknown email or wrong password. Deliberately not told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Hashing library failure.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Signing failure or rejected token.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// The main service for vendor accounts.
///
/// ## Usage
///
/// ```rust,ignore
/// let manager = VendorManager::from_config(store, &config)?;
///
/// let (vendor, token) = manager.register(request).await?;
/// let claims = manager.authenticate(&token)?;
/// ```
#[derive(Clone)]
pub struct VendorManager {
    /// Vendor persistence.
    store: Arc<dyn VendorStore>,

    /// Hashes pending passwords on save.
    hasher: PasswordHasher,

    /// Mints and checks session tokens.
    tokens: TokenIssuer,
}

impl VendorManager {
    pub fn new(store: Arc<dyn VendorStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self { store, hasher, tokens }
    }

    /// Build the manager with hashing cost and token settings from `config`.
    pub fn from_config(store: Arc<dyn VendorStore>, config: &AppConfig) -> Result<Self, AccountError> {
        let hasher = PasswordHasher::new(config.bcrypt_cost)?;
        let tokens = TokenIssuer::from_config(config)?;
        Ok(Self::new(store, hasher, tokens))
    }

    /// Whether the store answers.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.is_healthy().await
    }

    // ==========================================
    // DOCUMENT OPERATIONS
    // ==========================================

    /// Validate and persist `vendor`.
    ///
    /// A password set since the last save is hashed first and the document
    /// is updated in place. An unchanged password is written back as-is.
    /// The first save inserts, later saves update.
    pub async fn save(&self, vendor: &mut Vendor) -> Result<(), AccountError> {
        vendor.validate()?;

        let pending = match vendor.password() {
            Password::Plaintext(plain) => Some(plain.clone()),
            Password::Hashed(_) => None,
        };
        if let Some(plain) = pending {
            debug!("Hashing changed password for vendor {}", vendor.id());
            let hash = self.hasher.hash(&plain).await?;
            vendor.apply_password_hash(hash);
        }

        vendor.touch(Utc::now());
        let record = vendor.to_record().ok_or_else(|| {
            AccountError::Password(PasswordError::Task("password was not hashed".to_string()))
        })?;

        let result = if vendor.is_persisted() {
            self.store.update_vendor(&record).await
        } else {
            self.store.insert_vendor(&record).await
        };
        result.map_err(|e| map_store_error(e, vendor))?;

        vendor.mark_persisted();
        Ok(())
    }

    /// Mint a session token for `vendor`.
    pub fn create_jwt(&self, vendor: &Vendor) -> Result<String, AccountError> {
        self.tokens.issue(vendor).map_err(|e| {
            error!("Failed to sign token for vendor {}: {}", vendor.id(), e);
            AccountError::from(e)
        })
    }

    /// Verify a session token and return its claims.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AccountError> {
        Ok(self.tokens.verify(token)?)
    }

    // ==========================================
    // ACCOUNT OPERATIONS
    // ==========================================

    /// Register a new vendor and log them in.
    pub async fn register(
        &self,
        request: RegisterVendorRequest,
    ) -> Result<(Vendor, String), AccountError> {
        let location = request
            .location
            .map(|l| l.into_location())
            .unwrap_or_default();

        let mut vendor = Vendor::new(
            request.name.unwrap_or_default(),
            request.email.unwrap_or_default(),
            request.password.unwrap_or_default(),
        )
        .with_location(location);

        self.save(&mut vendor).await?;
        let token = self.create_jwt(&vendor)?;

        info!("Vendor registered: {} ({})", vendor.id(), mask_email(&vendor.email));
        Ok((vendor, token))
    }

    /// Check credentials and mint a token.
    pub async fn login(&self, request: LoginRequest) -> Result<(Vendor, String), AccountError> {
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        let mut missing = Vec::new();
        if email.is_empty() {
            missing.push(FieldError { field: "email", message: "Please provide email".to_string() });
        }
        if password.is_empty() {
            missing.push(FieldError { field: "password", message: "Please provide password".to_string() });
        }
        if !missing.is_empty() {
            return Err(ValidationError { errors: missing }.into());
        }

        let record = self
            .store
            .find_vendor_by_email(&email)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        let Some(record) = record else {
            warn!("Login for unknown email {}", mask_email(&email));
            return Err(AccountError::InvalidCredentials);
        };

        let vendor = Vendor::from_record(record);
        if !vendor.compare_password(&password).await? {
            warn!("Wrong password for vendor {}", vendor.id());
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.create_jwt(&vendor)?;
        info!("Vendor logged in: {}", vendor.id());
        Ok((vendor, token))
    }

    /// Load one vendor.
    pub async fn get_vendor(&self, id: Uuid) -> Result<Vendor, AccountError> {
        self.store
            .find_vendor_by_id(id)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Vendor::from_record)
            .ok_or(AccountError::VendorNotFound(id))
    }

    /// List vendors, newest first.
    pub async fn list_vendors(&self, limit: i64, offset: i64) -> Result<Vec<Vendor>, AccountError> {
        let records = self
            .store
            .list_vendors(limit, offset)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(records.into_iter().map(Vendor::from_record).collect())
    }

    /// Apply a partial update and save.
    pub async fn update_vendor(
        &self,
        id: Uuid,
        request: UpdateVendorRequest,
    ) -> Result<Vendor, AccountError> {
        let mut vendor = self.get_vendor(id).await?;

        if let Some(name) = request.name {
            vendor.name = name;
        }
        if let Some(email) = request.email {
            vendor.email = email;
        }
        if let Some(location) = request.location {
            vendor.location = Location::new(
                location.latitude.unwrap_or(vendor.location.latitude),
                location.longitude.unwrap_or(vendor.location.longitude),
            );
        }
        let password_changed = request.password.is_some();
        if let Some(password) = request.password {
            vendor.set_password(password);
        }

        self.save(&mut vendor).await?;

        info!(
            "Vendor updated: {} (password changed: {})",
            vendor.id(),
            password_changed
        );
        Ok(vendor)
    }

    /// Delete a vendor account.
    pub async fn delete_vendor(&self, id: Uuid) -> Result<(), AccountError> {
        let removed = self
            .store
            .delete_vendor(id)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if !removed {
            return Err(AccountError::VendorNotFound(id));
        }

        info!("Vendor deleted: {}", id);
        Ok(())
    }
}

fn map_store_error(e: DatabaseError, vendor: &Vendor) -> AccountError {
    match e {
        DatabaseError::UniqueViolation(_) => {
            warn!("Duplicate email rejected: {}", mask_email(&vendor.email));
            AccountError::DuplicateEmail(vendor.email.clone())
        }
        DatabaseError::NotFound(_) => AccountError::VendorNotFound(vendor.id()),
        other => {
            error!("Failed to save vendor {}: {}", vendor.id(), other);
            AccountError::DatabaseError(other.to_string())
        }
    }
}
