//! # Transaction Endpoints
//!
//! Public role-scoped transaction queries (the aggregator's inputs), the
//! logged-in user's own transactions, and the purchase call.

use chrono::Utc;
use shared::{CreateTransactionRequest, Transaction};

use crate::core::error::Result;
use crate::services::api::client::ApiClient;
use crate::services::api::request::RequestOptions;

/// Role filter for the public transaction query. At most one side is set by
/// the provided constructors; unset sides are omitted from the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub seller_id: Option<i64>,
    pub buyer_id: Option<i64>,
}

impl TransactionQuery {
    /// Transactions where `user_id` acted as seller.
    pub fn for_seller(user_id: i64) -> Self {
        Self {
            seller_id: Some(user_id),
            buyer_id: None,
        }
    }

    /// Transactions where `user_id` acted as buyer.
    pub fn for_buyer(user_id: i64) -> Self {
        Self {
            seller_id: None,
            buyer_id: Some(user_id),
        }
    }
}

/// Publicly visible transactions matching the role filter.
pub async fn public_transactions(
    client: &ApiClient,
    query: TransactionQuery,
) -> Result<Vec<Transaction>> {
    client
        .fetch(
            "/transactions/public",
            &[
                ("sellerId", query.seller_id.map(Into::into)),
                ("buyerId", query.buyer_id.map(Into::into)),
            ],
            RequestOptions::default(),
        )
        .await
}

/// Transactions of the logged-in user (either role).
pub async fn own_transactions(client: &ApiClient) -> Result<Vec<Transaction>> {
    client
        .fetch("/transactions/own", &[], RequestOptions::default())
        .await
}

/// Register a purchase of `product_id` by the logged-in user.
#[tracing::instrument(skip(client, opts))]
pub async fn purchase(
    client: &ApiClient,
    product_id: i64,
    opts: RequestOptions<'_>,
) -> Result<serde_json::Value> {
    let request = CreateTransactionRequest {
        product_id,
        buyer_payment_id: None,
        start_date: Utc::now().timestamp_millis(),
    };
    client.create("/transactions", &request, opts).await
}
