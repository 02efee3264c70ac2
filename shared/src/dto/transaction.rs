use serde::{Deserialize, Serialize};

/// A completed or in-progress purchase.
///
/// Identity is `id`: two transaction records refer to the same entity iff
/// their ids match, regardless of which query produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_price: Option<f64>,
    /// Purchase date, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
}

/// Payload for registering a purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub product_id: i64,
    /// Reserved by the backend contract; the client always sends `null`.
    pub buyer_payment_id: Option<i64>,
    /// Purchase timestamp, epoch milliseconds.
    pub start_date: i64,
}
