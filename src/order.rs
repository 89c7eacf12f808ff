use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One customer order, as sent by the frontend.
///
/// Every field is optional on the wire; missing text fields default to empty
/// strings and missing numbers to zero. Nothing is validated: empty names and
/// negative quantities or prices pass through as-is. `id` and `created_at`
/// are absent until a store assigns them and are never changed afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: Option<i64>,
    pub customer_name: String,
    pub email: String,
    pub item_description: String,
    pub quantity: i32,
    pub price: f64,
    pub created_at: Option<NaiveDateTime>,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {{ customerName: '{}', email: '{}', itemDescription: '{}', quantity: {}, price: {} }}",
            self.customer_name, self.email, self.item_description, self.quantity, self.price
        )
    }
}

/// Acknowledgement returned for every create request. `status` is always
/// `"success"`; there is no failure variant of this envelope.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub status: String,
    pub message: String,
    pub customer_name: String,
}
