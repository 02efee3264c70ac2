//! # Backend API Client Module
//!
//! HTTP client for communicating with the marketplace REST backend.
//! Handles authentication, product listings, transactions and uploads.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── client.rs       - ApiClient struct, executor and verb facade
//! ├── request.rs      - RequestSpec / RequestOptions construction
//! ├── users.rs        - Login, logout, session check, registration, profiles
//! ├── products.rs     - Product CRUD and image upload
//! └── transactions.rs - Public/own transaction queries and purchases
//! ```

pub mod client;
pub mod products;
pub mod request;
pub mod transactions;
pub mod users;

pub use client::{ApiClient, BASE_URL_ENV};
pub use request::{QueryValue, RequestBody, RequestOptions, RequestSpec};
pub use transactions::TransactionQuery;
