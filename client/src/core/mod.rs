//! # Core Types
//!
//! Error taxonomy and service traits shared by the whole client.

pub mod error;
pub mod service;

pub use error::{ConfigError, RequestError, Result};
pub use service::MarketApi;
