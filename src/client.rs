//! Afdian API client
//!
//! [`AfdianClient`] signs each parameter set, posts it through a
//! [`Transport`] and hands back the decoded body. The `get_all_*`
//! operations drain a listing endpoint page by page.
//!
//! Draining stops on the first error: the failing page is signed and sent
//! once, nothing is retried, and the items gathered so far are dropped.
//! A body without `data.list` (including platform errors such as a
//! rejected signature) counts as an empty page.

use crate::auth::{Clock, Signer};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::pagination::{
    NextPage, Page, PageNumberPaginator, PageRequest, PaginationState, ORDERS_PER_PAGE,
    SPONSORS_PER_PAGE,
};
use crate::params::RequestParams;
use crate::types::{ApiResponse, EC_OK};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `query-order`: single lookup or order pages
    QueryOrder,
    /// `query-sponsor`: sponsor pages
    QuerySponsor,
}

impl Endpoint {
    /// Path relative to the API root
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::QueryOrder => "query-order",
            Endpoint::QuerySponsor => "query-sponsor",
        }
    }
}

/// Client for the Afdian open API
pub struct AfdianClient<T = HttpClient> {
    config: ClientConfig,
    signer: Signer,
    transport: T,
}

impl AfdianClient<HttpClient> {
    /// Client for the production API with default settings
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(user_id, token))
    }

    /// Client over the reqwest transport
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpClient::with_config(config.http_config())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> AfdianClient<T> {
    /// Client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let signer = Signer::new(config.credentials());
        Ok(Self {
            config,
            signer,
            transport,
        })
    }

    /// Replace the clock used for request timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.signer = Signer::with_clock(self.config.credentials(), clock);
        self
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request signer
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign `params` and post them to `endpoint`, returning the raw body
    pub async fn call(&self, endpoint: Endpoint, params: RequestParams) -> Result<Value> {
        let envelope = self.signer.sign(&params)?;
        let url = self.config.endpoint_url(endpoint.path());
        debug!(endpoint = endpoint.path(), params = %envelope.params, ts = envelope.ts, "Calling API");
        self.transport
            .post_form(&url, &envelope.form_fields())
            .await
    }

    // ========================================================================
    // Single requests
    // ========================================================================

    /// Look up one order by its order number
    pub async fn query_order_by_out_trade_no(&self, out_trade_no: &str) -> Result<Value> {
        self.call(
            Endpoint::QueryOrder,
            RequestParams::order_lookup(out_trade_no),
        )
        .await
    }

    /// One page of orders
    pub async fn list_orders_page(&self, request: PageRequest) -> Result<Value> {
        self.call(Endpoint::QueryOrder, request.into()).await
    }

    /// First page of orders, 50 per page
    pub async fn list_orders(&self) -> Result<Value> {
        self.list_orders_page(PageRequest::orders()).await
    }

    /// One page of sponsors
    pub async fn list_sponsors_page(&self, request: PageRequest) -> Result<Value> {
        self.call(Endpoint::QuerySponsor, request.into()).await
    }

    /// First page of sponsors, 20 per page
    pub async fn list_sponsors(&self) -> Result<Value> {
        self.list_sponsors_page(PageRequest::sponsors()).await
    }

    /// One page of orders, parsed
    pub async fn fetch_orders_page(&self, request: PageRequest) -> Result<Page> {
        let body = self.list_orders_page(request).await?;
        Ok(Page::from_response(&body, request.page))
    }

    /// One page of sponsors, parsed
    pub async fn fetch_sponsors_page(&self, request: PageRequest) -> Result<Page> {
        let body = self.list_sponsors_page(request).await?;
        Ok(Page::from_response(&body, request.page))
    }

    // ========================================================================
    // Draining
    // ========================================================================

    /// Every order, 50 per request
    pub async fn get_all_orders(&self) -> Result<Vec<Value>> {
        self.drain(Endpoint::QueryOrder, ORDERS_PER_PAGE).await
    }

    /// Every sponsor, 20 per request
    pub async fn get_all_sponsors(&self) -> Result<Vec<Value>> {
        self.drain(Endpoint::QuerySponsor, SPONSORS_PER_PAGE).await
    }

    /// Every order, decoded into `O`
    pub async fn get_all_orders_as<O: DeserializeOwned>(&self) -> Result<Vec<O>> {
        decode_items(self.get_all_orders().await?)
    }

    /// Every sponsor, decoded into `S`
    pub async fn get_all_sponsors_as<S: DeserializeOwned>(&self) -> Result<Vec<S>> {
        decode_items(self.get_all_sponsors().await?)
    }

    /// Fetch pages of `endpoint` from page 1 until the paginator says stop
    pub async fn drain(&self, endpoint: Endpoint, per_page: u32) -> Result<Vec<Value>> {
        let paginator = PageNumberPaginator::new(per_page)
            .with_max_pages(self.config.max_pages)
            .with_stop_condition(self.config.stop_condition);
        let mut state = PaginationState::new();
        let mut request = paginator.initial_request();
        let mut items = Vec::new();

        loop {
            let body = self.call(endpoint, request.into()).await?;
            warn_on_api_error(endpoint, request, &body);

            let page = Page::from_response(&body, request.page);
            debug!(
                endpoint = endpoint.path(),
                page = request.page,
                items = page.len(),
                "Fetched page"
            );

            let next = paginator.process_page(&page, &mut state)?;
            items.extend(page.items);

            match next {
                NextPage::Continue(next_request) => request = next_request,
                NextPage::Done => break,
            }
        }

        info!(
            endpoint = endpoint.path(),
            pages = state.pages_fetched,
            items = items.len(),
            "Pagination complete"
        );
        Ok(items)
    }
}

fn warn_on_api_error(endpoint: Endpoint, request: PageRequest, body: &Value) {
    let response = ApiResponse::from_body(body);
    if let Some(ec) = response.ec.filter(|ec| *ec != EC_OK) {
        warn!(
            endpoint = endpoint.path(),
            page = request.page,
            ec,
            em = response.em.as_deref().unwrap_or(""),
            "API returned an error; treating it as the last page"
        );
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(Into::into))
        .collect()
}

impl<T> std::fmt::Debug for AfdianClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AfdianClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{compute_sign, FixedClock};
    use crate::error::Error;
    use crate::pagination::StopCondition;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    const TS: i64 = 1_700_000_000;

    /// Replays canned responses and records every request
    #[derive(Default)]
    struct StubTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubTransport {
        fn with_responses(responses: Vec<Result<Value>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn url(&self, i: usize) -> String {
            self.calls.lock().unwrap()[i].0.clone()
        }

        fn field(&self, i: usize, name: &str) -> String {
            self.calls.lock().unwrap()[i]
                .1
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        }

        fn params(&self, i: usize) -> Value {
            serde_json::from_str(&self.field(i, "params")).unwrap()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn post_form(&self, url: &str, form: &crate::http::FormFields) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), form.to_vec()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({"ec": 200, "em": "ok", "data": {"list": []}})))
        }
    }

    /// Counts how often the signer asks for the time
    #[derive(Debug, Default)]
    struct CountingClock {
        reads: AtomicU32,
    }

    impl Clock for CountingClock {
        fn now_unix(&self) -> i64 {
            self.reads.fetch_add(1, Ordering::SeqCst);
            TS
        }
    }

    fn page(list: Value) -> Result<Value> {
        Ok(json!({"ec": 200, "em": "ok", "data": {"list": list, "total_count": 3, "total_page": 2}}))
    }

    fn client(stub: &Arc<StubTransport>) -> AfdianClient<Arc<StubTransport>> {
        client_with_config(stub, ClientConfig::new("u1", "tok"))
    }

    fn client_with_config(
        stub: &Arc<StubTransport>,
        config: ClientConfig,
    ) -> AfdianClient<Arc<StubTransport>> {
        AfdianClient::with_transport(config, Arc::clone(stub))
            .unwrap()
            .with_clock(Arc::new(FixedClock(TS)))
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::QueryOrder.path(), "query-order");
        assert_eq!(Endpoint::QuerySponsor.path(), "query-sponsor");
    }

    #[test]
    fn test_with_transport_validates_config() {
        let stub = StubTransport::with_responses(vec![]);
        let result = AfdianClient::with_transport(ClientConfig::new("u1", ""), stub);
        assert!(matches!(result, Err(Error::MissingConfigField { .. })));
    }

    #[tokio::test]
    async fn test_query_order_by_out_trade_no() {
        let stub = StubTransport::with_responses(vec![Ok(json!({"ec": 200, "data": {"list": [{"out_trade_no": "o1"}]}}))]);
        let body = client(&stub)
            .query_order_by_out_trade_no("o1")
            .await
            .unwrap();

        assert_eq!(body["data"]["list"][0]["out_trade_no"], "o1");
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.url(0), "https://afdian.com/api/open/query-order");
        assert_eq!(stub.field(0, "params"), r#"{"out_trade_no":"o1"}"#);
        assert_eq!(stub.field(0, "user_id"), "u1");
        assert_eq!(stub.field(0, "ts"), "1700000000");
        assert_eq!(
            stub.field(0, "sign"),
            compute_sign("tok", "u1", r#"{"out_trade_no":"o1"}"#, TS)
        );
    }

    #[tokio::test]
    async fn test_list_orders_defaults() {
        let stub = StubTransport::with_responses(vec![]);
        client(&stub).list_orders().await.unwrap();

        assert_eq!(stub.url(0), "https://afdian.com/api/open/query-order");
        assert_eq!(stub.field(0, "params"), r#"{"page":1,"per_page":50}"#);
    }

    #[tokio::test]
    async fn test_list_sponsors_defaults() {
        let stub = StubTransport::with_responses(vec![]);
        client(&stub).list_sponsors().await.unwrap();

        assert_eq!(stub.url(0), "https://afdian.com/api/open/query-sponsor");
        assert_eq!(stub.field(0, "params"), r#"{"page":1,"per_page":20}"#);
        assert_eq!(stub.field(0, "sign"), "7b2fd1db3c5441f76e243c912b63711f");
    }

    #[tokio::test]
    async fn test_list_sponsors_page_explicit() {
        let stub = StubTransport::with_responses(vec![]);
        client(&stub)
            .list_sponsors_page(PageRequest::new(3, 100))
            .await
            .unwrap();

        assert_eq!(stub.params(0), json!({"page": 3, "per_page": 100}));
    }

    #[tokio::test]
    async fn test_fetch_orders_page_parses() {
        let stub = StubTransport::with_responses(vec![page(json!(["a", "b"]))]);
        let parsed = client(&stub)
            .fetch_orders_page(PageRequest::new(2, 50))
            .await
            .unwrap();

        assert_eq!(parsed.items, vec![json!("a"), json!("b")]);
        assert_eq!(parsed.current_page, 2);
        assert_eq!(parsed.total_pages, Some(2));
        assert!(!parsed.has_more());
    }

    #[tokio::test]
    async fn test_get_all_orders_drains_until_empty() {
        let stub = StubTransport::with_responses(vec![
            page(json!(["a", "b"])),
            page(json!(["c"])),
            page(json!([])),
        ]);

        let orders = client(&stub).get_all_orders().await.unwrap();

        assert_eq!(orders, vec![json!("a"), json!("b"), json!("c")]);
        assert_eq!(stub.call_count(), 3);
        for i in 0..3 {
            assert_eq!(stub.url(i), "https://afdian.com/api/open/query-order");
            assert_eq!(stub.params(i), json!({"page": i + 1, "per_page": 50}));
        }
    }

    #[tokio::test]
    async fn test_get_all_orders_empty_first_page() {
        let stub = StubTransport::with_responses(vec![page(json!([]))]);

        let orders = client(&stub).get_all_orders().await.unwrap();

        assert!(orders.is_empty());
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_all_orders_missing_list_stops() {
        let stub = StubTransport::with_responses(vec![
            page(json!(["a"])),
            Ok(json!({"ec": 400005, "em": "sign validation failed", "data": {}})),
        ]);

        let orders = client(&stub).get_all_orders().await.unwrap();

        assert_eq!(orders, vec![json!("a")]);
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn test_get_all_orders_stops_on_transport_error() {
        let clock = Arc::new(CountingClock::default());
        let stub = StubTransport::with_responses(vec![
            page(json!(["a"])),
            Err(Error::http_status(503, "unavailable")),
            page(json!(["never"])),
        ]);
        let client = AfdianClient::with_transport(ClientConfig::new("u1", "tok"), Arc::clone(&stub))
            .unwrap()
            .with_clock(clock.clone());

        let err = client.get_all_orders().await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
        assert_eq!(stub.call_count(), 2);
        assert_eq!(clock.reads.load(Ordering::SeqCst), 2);
        assert_eq!(stub.params(0)["page"], 1);
        assert_eq!(stub.params(1)["page"], 2);
    }

    #[tokio::test]
    async fn test_get_all_orders_page_ceiling() {
        let stub = StubTransport::with_responses(
            (0..10).map(|_| page(json!(["same"]))).collect(),
        );
        let config = ClientConfig::new("u1", "tok").with_max_pages(4);

        let err = client_with_config(&stub, config)
            .get_all_orders()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PageLimitExceeded { max_pages: 4 }));
        assert_eq!(stub.call_count(), 4);
    }

    #[tokio::test]
    async fn test_get_all_orders_total_pages_stop() {
        let stub = StubTransport::with_responses(vec![
            page(json!(["a", "b"])),
            page(json!(["c"])),
        ]);
        let config =
            ClientConfig::new("u1", "tok").with_stop_condition(StopCondition::TotalPages);

        let orders = client_with_config(&stub, config)
            .get_all_orders()
            .await
            .unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn test_get_all_sponsors_uses_sponsor_defaults() {
        let stub = StubTransport::with_responses(vec![page(json!([{"user": {"name": "Alice"}}]))]);

        let sponsors = client(&stub).get_all_sponsors().await.unwrap();

        assert_eq!(sponsors.len(), 1);
        assert_eq!(stub.call_count(), 2);
        assert_eq!(stub.url(1), "https://afdian.com/api/open/query-sponsor");
        assert_eq!(stub.params(0), json!({"page": 1, "per_page": 20}));
        assert_eq!(stub.params(1), json!({"page": 2, "per_page": 20}));
    }

    #[tokio::test]
    async fn test_get_all_sponsors_as_typed() {
        let stub = StubTransport::with_responses(vec![page(json!([
            {"user": {"user_id": "s1", "name": "Alice"}, "all_sum_amount": "10.00"}
        ]))]);

        let sponsors: Vec<crate::types::Sponsor> =
            client(&stub).get_all_sponsors_as().await.unwrap();

        assert_eq!(sponsors[0].user.user_id, "s1");
        assert_eq!(sponsors[0].all_sum_amount, "10.00");
    }

    #[tokio::test]
    async fn test_get_all_orders_as_rejects_bad_item() {
        let stub = StubTransport::with_responses(vec![page(json!(["not an order"]))]);

        let result: Result<Vec<crate::types::Order>> = client(&stub).get_all_orders_as().await;

        assert!(matches!(result, Err(Error::JsonParse(_))));
    }

    #[test]
    fn test_client_debug_hides_token() {
        let stub = StubTransport::with_responses(vec![]);
        let debug = format!("{:?}", client(&stub));
        assert!(debug.contains("AfdianClient"));
        assert!(!debug.contains("tok\""));
    }
}
