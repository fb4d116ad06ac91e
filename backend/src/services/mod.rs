//! # Services Module
//!
//! This module contains the business logic for vendor accounts.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `VendorManager` | Registration, login, profile updates, deletion |
//! | `Vendor` | Vendor document, field rules, password state |
//! | `PasswordHasher` | Salted bcrypt hashing and verification |
//! | `TokenIssuer` | Session token minting and verification |
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SERVICES LAYER                            │
//! │                                                                  │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                    VendorManager                          │   │
//! │  │  • save()      • register()   • login()                   │   │
//! │  │  • create_jwt() • update_vendor() • delete_vendor()       │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                              │                                   │
//! │         ┌────────────────────┼────────────────────┐             │
//! │         ▼                    ▼                    ▼             │
//! │  ┌────────────┐      ┌────────────┐       ┌────────────┐       │
//! │  │   Vendor   │      │  Password  │       │   Token    │       │
//! │  │            │      │  Hasher    │       │   Issuer   │       │
//! │  │ validate() │      │ bcrypt     │       │ HS256 JWT  │       │
//! │  └────────────┘      └────────────┘       └────────────┘       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod password;
pub mod token_issuer;
pub mod vendor;
pub mod vendor_manager;

pub use password::PasswordHasher;
pub use token_issuer::{Claims, TokenError, TokenIssuer};
pub use vendor::{FieldError, Location, Vendor};
pub use vendor_manager::{AccountError, VendorManager};
