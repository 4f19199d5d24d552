//! Transport trait

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Ordered form fields of a request body
pub type FormFields = [(String, String)];

/// Performs a form-encoded POST and returns the JSON body.
///
/// Implementations must report network failures, non-2xx statuses and
/// undecodable bodies as errors instead of substituting an empty value.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `form` to `url` and decode the response body as JSON
    async fn post_form(&self, url: &str, form: &FormFields) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_form(&self, url: &str, form: &FormFields) -> Result<Value> {
        (**self).post_form(url, form).await
    }
}
