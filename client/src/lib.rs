//! # Marketplace Data-Access Client
//!
//! The data-access and aggregation core of the PepMarket marketplace
//! application. UI layers (screens, forms, tables) sit on top of this crate
//! and stay free of HTTP, header and error-shape concerns.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  UI layer (not this crate)           │
//! └───────────────┬───────────────────────┬──────────────┘
//!                 │                       │
//!        typed endpoints /        aggregation (stats) /
//!        verb facade              eligibility
//!                 │                       │
//! ┌───────────────▼───────────────────────▼──────────────┐
//! │  ApiClient  - executor, verb facade (services::api)  │
//! │  Session    - token slot + header provider           │
//! └───────────────────────────┬──────────────────────────┘
//!                             │ HTTP (reqwest)
//!                  ┌──────────▼──────────┐
//!                  │   Backend REST API  │
//!                  └─────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **core**: error taxonomy ([`core::error`]) and the [`MarketApi`]
//!   dependency-injection trait ([`core::service`])
//! - **session**: session slot and request-header construction
//! - **services**: the HTTP client ([`services::api`]) and role-scoped
//!   aggregation ([`services::stats`])
//! - **eligibility**: pure purchase-eligibility decision
//!
//! ## Error contract
//!
//! Every failed call comes back as a [`RequestError`] that flattens to a
//! non-empty ordered list of server-shaped errors (`{msg, field?}`), so a
//! form can annotate fields and a page can show a notification without ever
//! branching on response shape. Transport failures stay distinguishable from
//! server rejections.
//!
//! ## Concurrency model
//!
//! Nothing in this crate blocks and nothing retries. The only concurrency is
//! inside [`services::stats::aggregate_role_counts`], which fires its three
//! queries concurrently and joins them before deriving counts. Requests read
//! the session token at dispatch time; rotating it mid-flight does not
//! affect calls already in the air.

pub mod core;
pub mod eligibility;
pub mod services;
pub mod session;

pub use crate::core::error::{ConfigError, RequestError, Result};
pub use crate::core::service::MarketApi;
pub use crate::eligibility::{evaluate, EligibilityReason, PurchaseEligibility};
pub use crate::services::api::{
    ApiClient, QueryValue, RequestOptions, RequestSpec, TransactionQuery, BASE_URL_ENV,
};
pub use crate::services::stats::{aggregate_role_counts, dedup_by_id, RoleCounts, RoleTotals};
pub use crate::session::{Identity, Session};
