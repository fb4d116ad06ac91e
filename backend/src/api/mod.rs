//! # REST API Module
//!
//! This module defines all HTTP endpoints for the vendor account API.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/auth/register` | Register a vendor, returns a session token |
//! | POST | `/auth/login` | Log in, returns a session token |
//! | GET | `/vendors` | Public vendor listing |
//! | GET | `/vendors/me` | Own profile (Bearer token) |
//! | PATCH | `/vendors/me` | Update own profile (Bearer token) |
//! | DELETE | `/vendors/me` | Delete own account (Bearer token) |
//! | GET | `/vendors/:id` | Public vendor profile |
//! | GET | `/health` | Health check |
//!
//! ## Request/Response Format
//!
//! All requests and responses use JSON:
//!
//! ```json
//! // Success response
//! {
//!     "success": true,
//!     "data": { ... }
//! }
//!
//! // Error response
//! {
//!     "success": false,
//!     "error": {
//!         "code": "ERROR_CODE",
//!         "message": "Human readable message"
//!     }
//! }
//! ```

pub mod routes;
pub mod handlers;

pub use routes::configure_routes;
