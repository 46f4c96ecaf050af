//! Query and mutation handles over the route registry.
//!
//! Every API operation goes through the same two handles instead of one
//! wrapper function per endpoint. A handle carries its own request state:
//!
//! ```text
//! Idle -> Loading -> Success(data) | Error(err)
//! ```
//!
//! A query built with `enabled(false)` never leaves `Idle` and sends nothing.
//! Queries wrap GET operations only and mutations everything else; the
//! client refuses to build a handle of the wrong kind.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::routes::{Operation, PathParams};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Lifecycle of one request handle.
#[derive(Debug)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Error(ApiError),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RequestState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            RequestState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    fn settle(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => RequestState::Success(data),
            Err(err) => RequestState::Error(err),
        }
    }
}

/// Shared request description for both handle kinds.
#[derive(Debug, Clone)]
struct RequestSpec {
    operation: Operation,
    params: PathParams,
    query: Vec<(String, String)>,
}

impl RequestSpec {
    fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: PathParams::new(),
            query: Vec::new(),
        }
    }

    fn push_query(&mut self, name: &str, value: impl ToString) {
        self.query.push((name.to_string(), value.to_string()));
    }

    fn push_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.push_query("start", start.format("%Y-%m-%d"));
        self.push_query("end", end.format("%Y-%m-%d"));
    }
}

/// Read handle. Sends a request on [`Query::fetch`] only while enabled.
#[derive(Debug)]
pub struct Query<'a, T = Value> {
    client: &'a ApiClient,
    spec: RequestSpec,
    enabled: bool,
    state: RequestState<T>,
}

impl<'a, T> Query<'a, T> {
    pub(crate) fn new(client: &'a ApiClient, operation: Operation) -> Self {
        Self {
            client,
            spec: RequestSpec::new(operation),
            enabled: true,
            state: RequestState::Idle,
        }
    }

    pub fn operation(&self) -> Operation {
        self.spec.operation
    }

    /// Value for a `:name` placeholder in the route template.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.spec.params.insert(name, value);
        self
    }

    pub fn params(mut self, params: PathParams) -> Self {
        self.spec.params = params;
        self
    }

    /// Appended to the URL as `?name=value`.
    pub fn query_param(mut self, name: &str, value: impl ToString) -> Self {
        self.spec.push_query(name, value);
        self
    }

    /// Adds `start` and `end` as `YYYY-MM-DD`.
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.spec.push_date_range(start, end);
        self
    }

    /// Gate the fetch, typically until a route id is known.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Switch the gate on an existing handle, e.g. once the route id arrives.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Fill a placeholder on an existing handle.
    pub fn set_param(&mut self, name: &str, value: impl ToString) {
        self.spec.params.insert(name, value);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Decode responses into `U` instead of raw JSON.
    pub fn decode_as<U>(self) -> Query<'a, U> {
        Query {
            client: self.client,
            spec: self.spec,
            enabled: self.enabled,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn into_state(self) -> RequestState<T> {
        self.state
    }
}

impl<'a, T: DeserializeOwned> Query<'a, T> {
    /// Run the request if enabled; a disabled query keeps its current state.
    pub async fn fetch(&mut self) -> &RequestState<T> {
        if !self.enabled {
            debug!("{} disabled, not fetching", self.spec.operation);
            return &self.state;
        }

        self.state = RequestState::Loading;
        let result = self
            .client
            .send(
                self.spec.operation,
                &self.spec.params,
                &self.spec.query,
                None::<&Value>,
            )
            .await;
        self.state = RequestState::settle(result);
        &self.state
    }
}

/// Write handle. Sends a request every time it is executed.
#[derive(Debug)]
pub struct Mutation<'a, T = Value> {
    client: &'a ApiClient,
    spec: RequestSpec,
    state: RequestState<T>,
}

impl<'a, T> Mutation<'a, T> {
    pub(crate) fn new(client: &'a ApiClient, operation: Operation) -> Self {
        Self {
            client,
            spec: RequestSpec::new(operation),
            state: RequestState::Idle,
        }
    }

    pub fn operation(&self) -> Operation {
        self.spec.operation
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.spec.params.insert(name, value);
        self
    }

    pub fn params(mut self, params: PathParams) -> Self {
        self.spec.params = params;
        self
    }

    pub fn query_param(mut self, name: &str, value: impl ToString) -> Self {
        self.spec.push_query(name, value);
        self
    }

    pub fn decode_as<U>(self) -> Mutation<'a, U> {
        Mutation {
            client: self.client,
            spec: self.spec,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn into_state(self) -> RequestState<T> {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = RequestState::Idle;
    }
}

impl<'a, T: DeserializeOwned> Mutation<'a, T> {
    /// Send without a request body.
    pub async fn execute(&mut self) -> &RequestState<T> {
        self.run(None::<&Value>).await
    }

    /// Send `body` as JSON.
    pub async fn execute_with<B: Serialize + ?Sized>(&mut self, body: &B) -> &RequestState<T> {
        self.run(Some(body)).await
    }

    async fn run<B: Serialize + ?Sized>(&mut self, body: Option<&B>) -> &RequestState<T> {
        self.state = RequestState::Loading;
        let result = self
            .client
            .send(self.spec.operation, &self.spec.params, &self.spec.query, body)
            .await;
        self.state = RequestState::settle(result);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde::Deserialize;
    use wiremock::{
        matchers::{any, body_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&Config::for_base_url("main", &server.uri())).expect("client")
    }

    // ==================== RequestState Tests ====================

    #[test]
    fn test_default_state_is_idle() {
        let state: RequestState<Value> = RequestState::default();
        assert!(state.is_idle());
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_state_accessors() {
        let ok: RequestState<u32> = RequestState::Success(7);
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&7));
        assert_eq!(ok.into_data(), Some(7));

        let err: RequestState<u32> = RequestState::Error(ApiError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: String::new(),
        });
        assert!(err.is_error());
        assert!(err.error().is_some());
        assert!(err.data().is_none());

        let loading: RequestState<u32> = RequestState::Loading;
        assert!(loading.is_loading());
    }

    // ==================== Query Tests ====================

    #[tokio::test]
    async fn test_disabled_query_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut query = client.query(Operation::MemberDetail).unwrap().enabled(false);

        assert!(query.fetch().await.is_idle());
        assert!(query.fetch().await.is_idle());
        assert!(!query.is_enabled());
    }

    #[tokio::test]
    async fn test_query_substitutes_placeholder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/console/member/detail/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"idx": 42})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut query = client
            .query(Operation::MemberDetail)
            .unwrap()
            .param("idx", "42");

        let state = query.fetch().await;
        assert!(state.is_success());
        assert_eq!(state.data().unwrap()["idx"], 42);
    }

    #[tokio::test]
    async fn test_query_enabled_later() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/board/post/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let route_idx: Option<u32> = None;
        let mut query = client
            .query(Operation::PostDetail)
            .unwrap()
            .enabled(route_idx.is_some());
        assert!(query.fetch().await.is_idle());

        let route_idx: Option<u32> = Some(5);
        if let Some(idx) = route_idx {
            query.set_param("idx", idx);
        }
        query.set_enabled(route_idx.is_some());
        assert!(query.is_enabled());
        assert!(query.fetch().await.is_success());

        query.set_enabled(false);
        assert!(query.fetch().await.is_success());
    }

    #[tokio::test]
    async fn test_query_params_and_date_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/console/statistics/visitor/main"))
            .and(query_param("type", "day"))
            .and(query_param("start", "2024-01-01"))
            .and(query_param("end", "2024-01-31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut query = client
            .query(Operation::VisitorStatistics)
            .unwrap()
            .query_param("type", "day")
            .date_range(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            );

        assert!(query.fetch().await.is_success());
    }

    #[tokio::test]
    async fn test_query_error_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/policy/detail/999"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut query = client
            .query(Operation::PolicyDetail)
            .unwrap()
            .param("idx", 999);
        query.fetch().await;

        let err = query.state().error().expect("Should be an error");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    }

    #[tokio::test]
    async fn test_query_decode_as_typed() {
        #[derive(Debug, Deserialize)]
        struct Member {
            idx: u64,
            name: String,
        }

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/console/member/detail/3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"idx": 3, "name": "lee"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut query = client
            .query(Operation::MemberDetail)
            .unwrap()
            .param("idx", 3)
            .decode_as::<Member>();
        query.fetch().await;

        let member = query.into_state().into_data().expect("Should decode");
        assert_eq!(member.idx, 3);
        assert_eq!(member.name, "lee");
    }

    // ==================== Mutation Tests ====================

    #[tokio::test]
    async fn test_mutation_sends_body_each_time() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({"content": "nice post"});

        Mock::given(method("POST"))
            .and(path("/v1/comment/12"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut mutation = client
            .mutation(Operation::CreateComment)
            .unwrap()
            .param("idx", 12);
        assert!(mutation.state().is_idle());

        assert!(mutation.execute_with(&payload).await.is_success());
        assert!(mutation.execute_with(&payload).await.is_success());
    }

    #[tokio::test]
    async fn test_mutation_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/console/category/detail/8"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut mutation = client
            .mutation(Operation::DeleteCategory)
            .unwrap()
            .param("id", 8);

        let state = mutation.execute().await;
        assert!(state.is_success());
        assert_eq!(state.data(), Some(&Value::Null));

        mutation.reset();
        assert!(mutation.state().is_idle());
    }

    #[tokio::test]
    async fn test_mutation_error_is_forwarded() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1/console/member/detail/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut mutation = client
            .mutation(Operation::UpdateMember)
            .unwrap()
            .param("idx", 1);
        let state = mutation.execute_with(&serde_json::json!({"name": "x"})).await;

        match state.error() {
            Some(ApiError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }
}
