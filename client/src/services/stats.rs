//! # Role-Scoped Statistics
//!
//! Reconciles the seller-side and buyer-side transaction queries (plus the
//! owned-products query) into the deduplicated counts and totals shown on
//! profile and stats screens.
//!
//! The same function backs the public profile of any user and the private
//! "my stats" screen: the queried identity is always a caller-supplied
//! parameter, never read from the session, so viewing someone else's
//! reputation depends on the viewer's session only through the auth header.
//!
//! Dedup relies on a domain assumption: a user is never simultaneously buyer
//! and seller of the same transaction, so the seller and buyer result sets
//! do not overlap in practice. The code does not enforce this; it dedups by
//! id regardless, keeping the first occurrence in seller-then-buyer order.

use std::collections::HashSet;

use shared::Transaction;

use crate::services::api::client::ApiClient;
use crate::services::api::transactions::{self, TransactionQuery};
use crate::services::api::products;

/// Derived per-user counts. `sales_count` and `purchases_count` are the raw
/// lengths of their own query results; `unique_transaction_count` is the
/// post-dedup length of the union, so it is never larger than their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub unique_transaction_count: usize,
    pub sales_count: usize,
    pub purchases_count: usize,
    pub product_count: usize,
}

/// Money totals over a transaction list, split by the role `user_id` played.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoleTotals {
    /// Sum of prices where the user sold.
    pub earned: f64,
    /// Sum of prices where the user bought.
    pub spent: f64,
}

/// Deduplicate transactions by id, keeping the first occurrence.
///
/// Idempotent: deduplicating an already-deduplicated list is a no-op.
pub fn dedup_by_id(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::with_capacity(transactions.len());
    transactions
        .into_iter()
        .filter(|transaction| seen.insert(transaction.id))
        .collect()
}

/// Sum earned/spent totals for `user_id` over a transaction list. Missing
/// prices count as zero.
pub fn role_totals(transactions: &[Transaction], user_id: i64) -> RoleTotals {
    let mut totals = RoleTotals::default();
    for transaction in transactions {
        let price = transaction.product_price.unwrap_or(0.0);
        if transaction.seller_id == Some(user_id) {
            totals.earned += price;
        }
        if transaction.buyer_id == Some(user_id) {
            totals.spent += price;
        }
    }
    totals
}

/// Fetch and reconcile the three per-user queries into [`RoleCounts`].
///
/// The three fetches run concurrently and join before any count is derived,
/// so latency is bounded by the slowest call. Each branch degrades
/// independently: a failed query contributes an empty list and a zero count,
/// it never aborts the other two.
#[tracing::instrument(skip(client))]
pub async fn aggregate_role_counts(client: &ApiClient, user_id: i64) -> RoleCounts {
    let (sales, purchases, owned) = tokio::join!(
        transactions::public_transactions(client, TransactionQuery::for_seller(user_id)),
        transactions::public_transactions(client, TransactionQuery::for_buyer(user_id)),
        products::get_products(client, Some(user_id)),
    );

    let sales = sales.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "seller-side query failed, counting zero sales");
        Vec::new()
    });
    let purchases = purchases.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "buyer-side query failed, counting zero purchases");
        Vec::new()
    });
    let product_count = owned
        .map(|products| products.len())
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "owned-products query failed, counting zero products");
            0
        });

    let sales_count = sales.len();
    let purchases_count = purchases.len();

    // Seller results first: on an id collision the seller-side record wins.
    let mut union = sales;
    union.extend(purchases);
    let unique = dedup_by_id(union);

    RoleCounts {
        unique_transaction_count: unique.len(),
        sales_count,
        purchases_count,
        product_count,
    }
}
