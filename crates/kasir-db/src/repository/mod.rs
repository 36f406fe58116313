//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Service layer                                                         │
//! │       │                                                                 │
//! │       │  db.products().get_by_id(7)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository        CategoryRepository     TransactionRepository │
//! │  ├── get_all(name)        ├── get_all()          ├── create_transaction│
//! │  ├── get_by_id(id)        ├── get_by_id(id)      ├── get_by_id(id)     │
//! │  ├── create(input)        ├── create(input)      ├── get_today_report  │
//! │  ├── update(id, input)    ├── update(id, input)  └── get_report_by_    │
//! │  └── delete(id)           └── delete(id)             date_range        │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository owns a clone of the pool; cloning is cheap.

pub mod category;
pub mod product;
pub mod transaction;
