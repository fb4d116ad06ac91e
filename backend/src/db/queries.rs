//! # Database Queries
//!
//! This module contains all the SQL queries for the `vendors` table.
//! Each function performs a specific database operation.
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Common errors:
//! - `UniqueViolation` - Another vendor already uses the email
//! - `NotFound` - Record doesn't exist
//! - `QueryError` - SQL execution failed

use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;
use tokio_postgres::Row;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::*;
use super::DatabaseError;

// ============================================
// HELPER FUNCTIONS
// ============================================

/// Helper to convert a database row to VendorRecord
fn row_to_vendor(row: &Row) -> VendorRecord {
    VendorRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        rating: row.get("rating"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a failed write, turning SQLSTATE 23505 into `UniqueViolation`.
fn map_write_error(e: tokio_postgres::Error, email: &str) -> DatabaseError {
    if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        DatabaseError::UniqueViolation(format!("email already in use: {}", email))
    } else {
        DatabaseError::QueryError(e)
    }
}

async fn client(pool: &Pool) -> Result<deadpool_postgres::Object, DatabaseError> {
    pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
}

// ============================================
// VENDOR QUERIES
// ============================================

/// Insert a new vendor.
pub async fn insert_vendor(
    pool: &Pool,
    vendor: &VendorRecord,
) -> Result<(), DatabaseError> {
    debug!("Inserting vendor: {}", vendor.id);

    let client = client(pool).await?;

    client.execute(
        r#"
        INSERT INTO vendors (
            id, name, email, password_hash,
            latitude, longitude, rating,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
        &[
            &vendor.id,
            &vendor.name,
            &vendor.email,
            &vendor.password_hash,
            &vendor.latitude,
            &vendor.longitude,
            &vendor.rating,
            &vendor.created_at,
            &vendor.updated_at,
        ],
    ).await
    .map_err(|e| map_write_error(e, &vendor.email))?;

    info!("Vendor inserted: {}", vendor.id);
    Ok(())
}

/// Overwrite every mutable column of an existing vendor.
pub async fn update_vendor(
    pool: &Pool,
    vendor: &VendorRecord,
) -> Result<(), DatabaseError> {
    debug!("Updating vendor: {}", vendor.id);

    let client = client(pool).await?;

    let rows_affected = client.execute(
        r#"
        UPDATE vendors
        SET
            name = $2,
            email = $3,
            password_hash = $4,
            latitude = $5,
            longitude = $6,
            rating = $7,
            updated_at = $8
        WHERE id = $1
        "#,
        &[
            &vendor.id,
            &vendor.name,
            &vendor.email,
            &vendor.password_hash,
            &vendor.latitude,
            &vendor.longitude,
            &vendor.rating,
            &vendor.updated_at,
        ],
    ).await
    .map_err(|e| map_write_error(e, &vendor.email))?;

    if rows_affected == 0 {
        return Err(DatabaseError::NotFound(format!("Vendor not found: {}", vendor.id)));
    }

    Ok(())
}

/// Get a vendor by ID.
pub async fn get_vendor_by_id(
    pool: &Pool,
    id: Uuid,
) -> Result<Option<VendorRecord>, DatabaseError> {
    debug!("Fetching vendor: {}", id);

    let client = client(pool).await?;

    let row = client.query_opt(
        r#"
        SELECT
            id, name, email, password_hash,
            latitude, longitude, rating,
            created_at, updated_at
        FROM vendors
        WHERE id = $1
        "#,
        &[&id],
    ).await?;

    Ok(row.as_ref().map(row_to_vendor))
}

/// Get a vendor by login email (exact match).
pub async fn get_vendor_by_email(
    pool: &Pool,
    email: &str,
) -> Result<Option<VendorRecord>, DatabaseError> {
    let client = client(pool).await?;

    let row = client.query_opt(
        r#"
        SELECT
            id, name, email, password_hash,
            latitude, longitude, rating,
            created_at, updated_at
        FROM vendors
        WHERE email = $1
        "#,
        &[&email],
    ).await?;

    Ok(row.as_ref().map(row_to_vendor))
}

/// List vendors, newest first.
pub async fn list_vendors(
    pool: &Pool,
    limit: i64,
    offset: i64,
) -> Result<Vec<VendorRecord>, DatabaseError> {
    debug!("Listing vendors (limit: {}, offset: {})", limit, offset);

    let client = client(pool).await?;

    let rows = client.query(
        r#"
        SELECT
            id, name, email, password_hash,
            latitude, longitude, rating,
            created_at, updated_at
        FROM vendors
        ORDER BY created_at DESC, id
        LIMIT $1 OFFSET $2
        "#,
        &[&limit, &offset],
    ).await?;

    Ok(rows.iter().map(row_to_vendor).collect())
}

/// Delete a vendor. Returns whether a row was removed.
pub async fn delete_vendor(
    pool: &Pool,
    id: Uuid,
) -> Result<bool, DatabaseError> {
    let client = client(pool).await?;

    let rows_affected = client.execute(
        "DELETE FROM vendors WHERE id = $1",
        &[&id],
    ).await?;

    if rows_affected > 0 {
        info!("Vendor deleted: {}", id);
    }
    Ok(rows_affected > 0)
}
