//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between marketplace clients and the
//! backend REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::error`]**: The backend error envelope (`{errors: [{msg, field?}]}`)
//!   - **[`dto::user`]**: Authentication, session and profile DTOs
//!   - **[`dto::product`]**: Product listing DTOs
//!   - **[`dto::transaction`]**: Purchase/transaction DTOs
//!
//! ## Wire Format
//!
//! - Field names use **snake_case** in Rust and **camelCase** on the wire
//!   (`#[serde(rename_all = "camelCase")]` on every DTO)
//! - Optional fields are omitted from JSON when `None`
//!   (`#[serde(skip_serializing_if = "Option::is_none")]`)
//! - Dates travel as epoch timestamps (seconds for user birthdays,
//!   milliseconds for transaction dates)
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::error::ErrorEnvelope;
//!
//! let body = r#"{"errors":[{"msg":"Forbidden"}]}"#;
//! let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
//! assert_eq!(envelope.errors[0].msg, "Forbidden");
//! ```

pub mod dto;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
