//! Signer implementation

use super::clock::{Clock, SystemClock};
use super::types::{Credentials, SignedEnvelope};
use crate::error::Result;
use crate::params::RequestParams;
use md5::{Digest, Md5};
use std::sync::Arc;
use tracing::trace;

/// The exact string that gets digested
pub fn signing_string(token: &str, user_id: &str, params: &str, ts: i64) -> String {
    format!("{token}params{params}ts{ts}user_id{user_id}")
}

/// Lowercase hex MD5 over [`signing_string`]
pub fn compute_sign(token: &str, user_id: &str, params: &str, ts: i64) -> String {
    let digest = Md5::digest(signing_string(token, user_id, params, ts).as_bytes());
    hex::encode(digest)
}

/// Signs parameter sets with a fixed set of credentials
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl Signer {
    /// Create a signer that reads the system clock
    pub fn new(credentials: Credentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    /// Create a signer with a custom clock
    pub fn with_clock(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, clock }
    }

    /// The credentials this signer uses
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Signature for already-serialized params at a given timestamp
    pub fn sign_at(&self, params: &str, ts: i64) -> String {
        compute_sign(
            &self.credentials.token,
            &self.credentials.user_id,
            params,
            ts,
        )
    }

    /// Serialize `params` once, read the clock once, and build the envelope
    pub fn sign(&self, params: &RequestParams) -> Result<SignedEnvelope> {
        let params = params.to_canonical_json()?;
        let ts = self.clock.now_unix();
        let sign = self.sign_at(&params, ts);
        trace!(ts, %params, "Signed request params");

        Ok(SignedEnvelope {
            user_id: self.credentials.user_id.clone(),
            params,
            ts,
            sign,
        })
    }
}
