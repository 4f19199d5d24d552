//! HTTP transport module
//!
//! The [`Transport`] trait is the seam between the client and the network:
//! a form-encoded POST that yields the decoded JSON body. [`HttpClient`] is
//! the reqwest implementation.
//!
//! No retries and no rate limiting happen here; each call is one request.

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{FormFields, Transport};
