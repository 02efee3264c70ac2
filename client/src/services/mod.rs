//! # Services
//!
//! External integrations and derived data:
//!
//! - [`api`]: HTTP client for the marketplace backend
//! - [`stats`]: role-scoped aggregation over the API queries

pub mod api;
pub mod stats;
