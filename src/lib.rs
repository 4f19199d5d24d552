//! # Afdian Client
//!
//! A minimal client for the Afdian open API: signed requests, paginated
//! order and sponsor queries, and parsed JSON responses.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use afdian_client::{AfdianClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = AfdianClient::new("your_user_id", "your_token")?;
//!
//!     // Look up one order
//!     let order = client.query_order_by_out_trade_no("202106232138371083454010626").await?;
//!
//!     // Every order, 50 per request
//!     let orders = client.get_all_orders().await?;
//!
//!     // First page of sponsors, 20 per request
//!     let sponsors = client.list_sponsors().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller ─► AfdianClient ─► PageNumberPaginator
//!                 │
//!                 ├─► Signer (md5 over token/params/ts/user_id, per call)
//!                 │
//!                 └─► Transport (form POST → JSON) ─► afdian.com/api/open
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and record models
pub mod types;

/// Endpoint parameter sets
pub mod params;

/// Request signing
pub mod auth;

/// HTTP transport
pub mod http;

/// Pagination
pub mod pagination;

/// Client configuration
pub mod config;

/// The API client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{Clock, Credentials, FixedClock, SignedEnvelope, Signer, SystemClock};
pub use client::{AfdianClient, Endpoint};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{HttpClient, Transport};
pub use pagination::{Page, PageRequest, StopCondition};
pub use params::RequestParams;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
