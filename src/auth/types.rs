//! Credential and envelope types

use serde::Serialize;

/// API credentials, fixed for the lifetime of a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Creator's user ID
    pub user_id: String,
    /// Secret API token
    pub token: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// The four form fields sent with every request.
///
/// Built fresh for each call and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedEnvelope {
    /// Creator's user ID
    pub user_id: String,
    /// Parameter object as compact JSON text
    pub params: String,
    /// Unix seconds used in the signature
    pub ts: i64,
    /// Lowercase hex MD5 signature
    pub sign: String,
}

impl SignedEnvelope {
    /// Form fields in wire order: `user_id`, `params`, `ts`, `sign`
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("user_id".to_string(), self.user_id.clone()),
            ("params".to_string(), self.params.clone()),
            ("ts".to_string(), self.ts.to_string()),
            ("sign".to_string(), self.sign.clone()),
        ]
    }
}
