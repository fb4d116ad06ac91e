//! # API Models
//!
//! This module defines the request and response structures for the REST API.
//! These are separate from database models so that the password hash never
//! leaves the service layer.
//!
//! ## Organization
//!
//! - `requests.rs` - Incoming request bodies
//! - `responses.rs` - Outgoing response bodies
//!
//! Field names are converted to camelCase for JavaScript clients.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
