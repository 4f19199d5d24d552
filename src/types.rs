//! Common types used throughout the Afdian client
//!
//! Type aliases, the response envelope shared by every endpoint, and the
//! order/sponsor record models for callers who want typed items.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type; keys keep their insertion order
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Status code the platform reports for a successful call
pub const EC_OK: i64 = 200;

// ============================================================================
// Response Envelope
// ============================================================================

/// The `{ec, em, data}` envelope every endpoint answers with.
///
/// Decoding never fails: fields the body lacks stay `None`/`Null`, so a
/// caller can inspect error bodies as easily as successful ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Platform status code, 200 on success
    #[serde(default)]
    pub ec: Option<i64>,
    /// Platform status message
    #[serde(default)]
    pub em: Option<String>,
    /// Endpoint payload
    #[serde(default)]
    pub data: JsonValue,
}

impl ApiResponse {
    /// Read the envelope out of a raw response body
    pub fn from_body(body: &JsonValue) -> Self {
        let Some(obj) = body.as_object() else {
            return Self::default();
        };
        Self {
            ec: obj.get("ec").and_then(JsonValue::as_i64),
            em: obj
                .get("em")
                .and_then(JsonValue::as_str)
                .map(ToString::to_string),
            data: obj.get("data").cloned().unwrap_or(JsonValue::Null),
        }
    }

    /// True when the platform reported success
    pub fn is_ok(&self) -> bool {
        self.ec == Some(EC_OK)
    }

    /// Return `data`, or an `Error::Api` carrying the platform's code and message
    pub fn ensure_ok(self) -> Result<JsonValue> {
        if self.is_ok() {
            return Ok(self.data);
        }
        Err(Error::api(
            self.ec.unwrap_or_default(),
            self.em.unwrap_or_default(),
        ))
    }
}

// ============================================================================
// Orders
// ============================================================================

/// An order as returned by `query-order`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    /// Order number
    pub out_trade_no: String,
    /// Custom information attached at checkout
    pub custom_order_id: Option<String>,
    /// Buyer's user ID
    pub user_id: String,
    /// Plan ID, empty for a free-amount sponsorship
    pub plan_id: String,
    /// Order description
    pub title: Option<String>,
    /// Number of sponsored months
    pub month: u32,
    /// Amount actually paid; "0.00" when redeemed with a code
    pub total_amount: String,
    /// Displayed amount, before any discount
    pub show_amount: String,
    /// 2 means the payment succeeded
    pub status: i32,
    /// Buyer's message
    pub remark: String,
    /// Redeem code ID
    pub redeem_id: String,
    /// 0 for a regular plan, 1 for a product sale
    pub product_type: i32,
    /// Discount amount
    pub discount: String,
    /// Purchased variants for product sales
    pub sku_detail: Vec<JsonValue>,
    /// Shipping recipient
    pub address_person: String,
    /// Shipping phone
    pub address_phone: String,
    /// Shipping address
    pub address_address: String,
}

/// Order status the platform uses for a completed payment
pub const ORDER_STATUS_PAID: i32 = 2;

impl Order {
    /// True when the payment succeeded
    pub fn is_paid(&self) -> bool {
        self.status == ORDER_STATUS_PAID
    }

    /// True for product-sale orders (as opposed to sponsorship plans)
    pub fn is_product_sale(&self) -> bool {
        self.product_type == 1
    }
}

// ============================================================================
// Sponsors
// ============================================================================

/// A sponsor as returned by `query-sponsor`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    /// Every plan this sponsor has paid for
    pub sponsor_plans: Vec<JsonValue>,
    /// The sponsor's current plan
    pub current_plan: JsonValue,
    /// Accumulated amount before discounts
    pub all_sum_amount: String,
    /// Unix seconds of the first sponsorship
    pub create_time: i64,
    /// Unix seconds of the most recent sponsorship
    pub last_pay_time: i64,
    /// Public profile
    pub user: SponsorUser,
}

impl Sponsor {
    /// False when `current_plan` is empty or carries nothing but a blank `name`
    pub fn has_current_plan(&self) -> bool {
        match &self.current_plan {
            JsonValue::Object(plan) => plan.iter().any(|(key, value)| match key.as_str() {
                "name" => value.as_str().is_some_and(|name| !name.is_empty()),
                _ => true,
            }),
            _ => false,
        }
    }
}

/// The `user` node of a sponsor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SponsorUser {
    /// Unique user ID
    pub user_id: String,
    /// Display name, not unique
    pub name: String,
    /// Avatar URL
    pub avatar: String,
}
