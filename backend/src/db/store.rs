//! Vendor persistence port.
//!
//! Services talk to [`VendorStore`] instead of the pool directly. The
//! production implementation is [`PgVendorStore`]; tests use
//! [`mock::MemoryVendorStore`], which enforces the same email uniqueness.

use async_trait::async_trait;
use uuid::Uuid;

use super::models::VendorRecord;
use super::{queries, Database, DatabaseError};

/// Port for vendor persistence operations.
#[async_trait]
pub trait VendorStore: Send + Sync {
    /// Inserts a new vendor. Fails with `UniqueViolation` on a taken email.
    async fn insert_vendor(&self, vendor: &VendorRecord) -> Result<(), DatabaseError>;

    /// Overwrites an existing vendor. Fails with `NotFound` if it is gone.
    async fn update_vendor(&self, vendor: &VendorRecord) -> Result<(), DatabaseError>;

    async fn find_vendor_by_id(&self, id: Uuid) -> Result<Option<VendorRecord>, DatabaseError>;

    async fn find_vendor_by_email(&self, email: &str) -> Result<Option<VendorRecord>, DatabaseError>;

    /// Lists vendors, newest first.
    async fn list_vendors(&self, limit: i64, offset: i64) -> Result<Vec<VendorRecord>, DatabaseError>;

    /// Deletes a vendor. Returns whether anything was removed.
    async fn delete_vendor(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Liveness check used by the health endpoint.
    async fn is_healthy(&self) -> bool;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgVendorStore {
    db: Database,
}

impl PgVendorStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VendorStore for PgVendorStore {
    async fn insert_vendor(&self, vendor: &VendorRecord) -> Result<(), DatabaseError> {
        queries::insert_vendor(self.db.pool(), vendor).await
    }

    async fn update_vendor(&self, vendor: &VendorRecord) -> Result<(), DatabaseError> {
        queries::update_vendor(self.db.pool(), vendor).await
    }

    async fn find_vendor_by_id(&self, id: Uuid) -> Result<Option<VendorRecord>, DatabaseError> {
        queries::get_vendor_by_id(self.db.pool(), id).await
    }

    async fn find_vendor_by_email(&self, email: &str) -> Result<Option<VendorRecord>, DatabaseError> {
        queries::get_vendor_by_email(self.db.pool(), email).await
    }

    async fn list_vendors(&self, limit: i64, offset: i64) -> Result<Vec<VendorRecord>, DatabaseError> {
        queries::list_vendors(self.db.pool(), limit, offset).await
    }

    async fn delete_vendor(&self, id: Uuid) -> Result<bool, DatabaseError> {
        queries::delete_vendor(self.db.pool(), id).await
    }

    async fn is_healthy(&self) -> bool {
        match self.db.pool().get().await {
            Ok(client) => client.query("SELECT 1", &[]).await.is_ok(),
            Err(_) => false,
        }
    }
}
