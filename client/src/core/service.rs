//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and
//! modularity. UI layers depend on [`MarketApi`] instead of the concrete
//! [`crate::ApiClient`], so tests can substitute a mock.

use async_trait::async_trait;
use shared::{
    CreateProductRequest, CreateUserRequest, CreatedProduct, LoginResponse, Product, Transaction,
    UpdateProductRequest, UserProfile,
};

use crate::core::error::Result;
use crate::services::api::transactions::TransactionQuery;

/// The typed surface of the marketplace backend.
///
/// The concrete implementation is [`crate::ApiClient`], which delegates to
/// the endpoint modules under `services::api`.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Log in and store the issued token in the session slot.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;

    /// Best-effort server-side disconnect; the session slot is cleared
    /// regardless of the outcome.
    async fn logout(&self) -> Result<()>;

    /// Ask the backend whether the stored token is still active. An inactive
    /// verdict clears the session slot.
    async fn check_session(&self) -> Result<bool>;

    /// Register a new account. No auth header is sent.
    async fn create_user(&self, request: &CreateUserRequest) -> Result<serde_json::Value>;

    /// Public profile of any user.
    async fn user(&self, user_id: i64) -> Result<UserProfile>;

    /// Product listings, optionally restricted to one seller.
    async fn products(&self, seller_id: Option<i64>) -> Result<Vec<Product>>;

    async fn product(&self, product_id: i64) -> Result<Product>;

    /// Create a listing; the image is uploaded separately via
    /// [`MarketApi::upload_product_image`].
    async fn create_product(&self, request: &CreateProductRequest) -> Result<CreatedProduct>;

    /// Attach an image to a listing (multipart upload, single `image` field).
    async fn upload_product_image(
        &self,
        product_id: i64,
        image: Vec<u8>,
        file_name: String,
    ) -> Result<serde_json::Value>;

    async fn update_product(
        &self,
        product_id: i64,
        request: &UpdateProductRequest,
    ) -> Result<serde_json::Value>;

    async fn delete_product(&self, product_id: i64) -> Result<serde_json::Value>;

    /// Publicly visible transactions where the queried user acted as seller
    /// or buyer.
    async fn public_transactions(&self, query: TransactionQuery) -> Result<Vec<Transaction>>;

    /// Transactions of the logged-in user.
    async fn own_transactions(&self) -> Result<Vec<Transaction>>;

    /// Buy a product on behalf of the logged-in user.
    async fn purchase(&self, product_id: i64) -> Result<serde_json::Value>;
}
