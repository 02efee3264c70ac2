//! # Product Endpoints
//!
//! Listing queries and the two-step create flow (JSON listing first, then a
//! multipart image upload against the returned product id).

use reqwest::multipart;
use shared::{CreateProductRequest, CreatedProduct, Product, UpdateProductRequest};

use crate::core::error::Result;
use crate::services::api::client::ApiClient;
use crate::services::api::request::RequestOptions;

/// Product listings, optionally restricted to one seller.
pub async fn get_products(client: &ApiClient, seller_id: Option<i64>) -> Result<Vec<Product>> {
    client
        .fetch(
            "/products",
            &[("sellerId", seller_id.map(Into::into))],
            RequestOptions::default(),
        )
        .await
}

pub async fn get_product(client: &ApiClient, product_id: i64) -> Result<Product> {
    client
        .fetch(&format!("/products/{product_id}"), &[], RequestOptions::default())
        .await
}

/// Create a listing. The response carries the new product id, which the
/// image upload needs.
pub async fn create_product(
    client: &ApiClient,
    request: &CreateProductRequest,
    opts: RequestOptions<'_>,
) -> Result<CreatedProduct> {
    client.create("/products", request, opts).await
}

/// Attach an image to a listing.
///
/// The body is a multipart form with a single `image` field. No manual
/// `Content-Type` is set on the request: the transport writes the boundary
/// itself, and a hand-set header corrupts it.
pub async fn upload_product_image(
    client: &ApiClient,
    product_id: i64,
    image: Vec<u8>,
    file_name: String,
    opts: RequestOptions<'_>,
) -> Result<serde_json::Value> {
    let part = multipart::Part::bytes(image).file_name(file_name);
    let form = multipart::Form::new().part("image", part);
    client
        .create_multipart(&format!("/products/{product_id}/image"), form, opts)
        .await
}

pub async fn update_product(
    client: &ApiClient,
    product_id: i64,
    request: &UpdateProductRequest,
    opts: RequestOptions<'_>,
) -> Result<serde_json::Value> {
    client
        .replace(&format!("/products/{product_id}"), request, opts)
        .await
}

pub async fn delete_product(
    client: &ApiClient,
    product_id: i64,
    opts: RequestOptions<'_>,
) -> Result<serde_json::Value> {
    client
        .remove(&format!("/products/{product_id}"), opts)
        .await
}
