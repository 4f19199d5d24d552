//! Endpoint parameter sets
//!
//! The platform signs the exact JSON text of the `params` field, so key
//! order matters. Typed variants serialize their fields in declaration
//! order; `Custom` keeps the order keys were inserted in.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// Parameters for one API call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Single order lookup: `{"out_trade_no": ...}`
    OrderLookup {
        /// Order number to look up
        out_trade_no: String,
    },

    /// One page of a listing: `{"page": ..., "per_page": ...}`
    Page {
        /// 1-based page index
        page: u32,
        /// Page size
        per_page: u32,
    },

    /// Any other parameter object, sent in insertion order
    Custom(JsonObject),
}

impl RequestParams {
    /// Order lookup parameters
    pub fn order_lookup(out_trade_no: impl Into<String>) -> Self {
        Self::OrderLookup {
            out_trade_no: out_trade_no.into(),
        }
    }

    /// Page parameters
    pub fn page(page: u32, per_page: u32) -> Self {
        Self::Page { page, per_page }
    }

    /// Custom parameters from ordered key/value pairs
    pub fn custom<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<JsonValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Custom(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Compact JSON text; this exact string is both signed and sent
    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
