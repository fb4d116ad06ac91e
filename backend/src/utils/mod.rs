//! # Utilities Module
//!
//! This module contains helper functions used across the backend service.

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Mask an email for logging.
///
/// ## Examples
///
/// ```rust,ignore
/// assert_eq!(mask_email("ann@farm.in"), "a***@farm.in");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}

/// Normalize pagination parameters.
///
/// Returns `(limit, offset)` with the limit clamped to `1..=MAX_PAGE_SIZE`
/// and a non-negative offset.
pub fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}
