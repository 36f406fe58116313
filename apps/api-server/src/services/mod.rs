//! # Service Layer
//!
//! Sits between HTTP handlers and repositories.
//!
//! ```text
//! handler ──► service ──► repository
//!   │           │
//!   │           ├── validates request-shaped data (kasir_core::validation)
//!   │           └── normalizes the category reference of product writes
//!   │
//!   └── decodes HTTP, encodes JSON, picks status codes
//! ```
//!
//! Services hold no state of their own; every function takes the
//! `Database` handle it works against.

pub mod category;
pub mod product;
pub mod transaction;
