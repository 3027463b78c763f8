//! Common test utilities and harness for hubspot-mcp integration tests.

#![allow(dead_code)]

use hubspot_client::{Credential, HttpTransport, HubSpotClient};
use hubspot_mcp::{Dispatcher, Property, PropertyType, ToolRegistry};
use serde_json::{json, Map, Value};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test harness: a mock HubSpot and a dispatcher pointed at it.
pub struct TestHarness {
    /// Mock HubSpot API
    pub server: MockServer,
    /// Dispatcher over the full catalog
    pub dispatcher: Dispatcher,
}

impl TestHarness {
    /// Starts a mock server and builds a bearer-token dispatcher against it.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let transport = HttpTransport::new(
            &server.uri(),
            Some(Credential::BearerToken("test-token".into())),
        )
        .expect("transport should build");
        let dispatcher = Dispatcher::new(
            ToolRegistry::hubspot().expect("catalog should be valid"),
            HubSpotClient::new(transport),
        );
        Self { server, dispatcher }
    }

    /// Starts a harness whose mock answers every request with `body`.
    pub async fn answering(body: Value) -> Self {
        let harness = Self::new().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&harness.server)
            .await;
        harness
    }

    /// Number of requests the mock has seen so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// JSON body of the most recent request.
    pub async fn last_body(&self) -> Value {
        let requests = self.server.received_requests().await.unwrap_or_default();
        let last = requests.last().expect("at least one request");
        serde_json::from_slice(&last.body).expect("request body should be JSON")
    }
}

/// A plausible value for a declared property.
pub fn sample_value(property: &Property) -> Value {
    if let Some(allowed) = property.allowed_values() {
        if let Some(first) = allowed.first() {
            return Value::String(first.clone());
        }
    }
    match property.kind() {
        PropertyType::String => json!("1"),
        PropertyType::Integer => json!(5),
        PropertyType::Object => json!({"note": "sample"}),
        PropertyType::StringArray => json!(["email"]),
    }
}

/// Arguments supplying every required property of `tool` and nothing else.
pub fn required_args(registry: &ToolRegistry, tool: &str) -> Map<String, Value> {
    let descriptor = registry.describe(tool).expect("tool should exist");
    descriptor
        .parameters
        .properties()
        .iter()
        .filter(|p| p.is_required())
        .map(|p| (p.name().to_string(), sample_value(p)))
        .collect()
}
