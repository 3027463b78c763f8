//! End-to-end MCP sessions over an in-memory pipe.

use std::collections::HashMap;
use std::time::Duration;

use hubspot_mcp::McpServer;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestHarness;

fn initialize() -> Value {
    json!({"jsonrpc": "2.0", "id": 0, "method": "initialize",
           "params": {"protocolVersion": "2024-11-05", "capabilities": {},
                      "clientInfo": {"name": "test", "version": "0"}}})
}

struct Session {
    input: DuplexStream,
    output: Lines<BufReader<DuplexStream>>,
    handle: JoinHandle<hubspot_mcp::Result<()>>,
}

impl Session {
    fn start(server: McpServer) -> Self {
        let (input, server_in) = tokio::io::duplex(64 * 1024);
        let (server_out, client_in) = tokio::io::duplex(64 * 1024);
        let handle = tokio::spawn(server.serve_transport((server_in, server_out)));
        Self {
            input,
            output: BufReader::new(client_in).lines(),
            handle,
        }
    }

    /// Starts a session and completes the handshake.
    async fn initialized(server: McpServer) -> Self {
        let mut session = Self::start(server);
        session.send(&initialize()).await;
        let reply = session.next().await.expect("initialize reply");
        assert_eq!(reply["id"], json!(0));
        session
            .send(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        session
    }

    async fn send(&mut self, message: &Value) {
        let mut line = serde_json::to_vec(message).unwrap();
        line.push(b'\n');
        self.input.write_all(&line).await.unwrap();
    }

    async fn next(&mut self) -> Option<Value> {
        let line = self.output.next_line().await.unwrap()?;
        Some(serde_json::from_str(&line).unwrap())
    }

    /// Closes input, collects the remaining replies by id, and waits for the server.
    async fn finish(mut self) -> HashMap<String, Value> {
        self.input.shutdown().await.unwrap();
        drop(self.input);

        let mut replies = HashMap::new();
        while let Some(line) = self.output.next_line().await.unwrap() {
            let reply: Value = serde_json::from_str(&line).unwrap();
            replies.insert(reply["id"].to_string(), reply);
        }

        tokio::time::timeout(Duration::from_secs(10), self.handle)
            .await
            .expect("server should stop at end of input")
            .unwrap()
            .unwrap();
        replies
    }
}

/// Runs one handshake plus `requests`, then closes input.
async fn session(harness: &TestHarness, requests: &[Value]) -> HashMap<String, Value> {
    let server = McpServer::new(harness.dispatcher.clone()).with_name("hubspot-test");
    let mut session = Session::initialized(server).await;
    for request in requests {
        session.send(request).await;
    }
    session.finish().await
}

#[tokio::test]
async fn test_handshake_and_listing() {
    let harness = TestHarness::new().await;
    let mut session =
        Session::start(McpServer::new(harness.dispatcher.clone()).with_name("hubspot-test"));
    session.send(&initialize()).await;
    let init = session.next().await.unwrap();
    assert_eq!(init["result"]["serverInfo"]["name"], json!("hubspot-test"));
    assert_eq!(init["result"]["protocolVersion"], json!("2024-11-05"));
    assert!(init["result"]["capabilities"]["tools"].is_object());

    session
        .send(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .await;
    session
        .send(&json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await;
    session
        .send(&json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}))
        .await;
    let replies = session.finish().await;

    assert_eq!(replies.len(), 2);
    let tools = replies["2"]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names.first(), Some(&"list_contacts"));
    assert_eq!(names.last(), Some(&"search"));
    assert_eq!(tools[1]["inputSchema"]["required"], json!(["contact_id"]));
    assert_eq!(replies["3"]["result"], json!({}));
}

#[tokio::test]
async fn test_tools_call_returns_envelope_text() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let replies = session(
        &harness,
        &[json!({"jsonrpc": "2.0", "id": "call-1", "method": "tools/call",
                 "params": {"name": "get_contact", "arguments": {"contact_id": "42"}}})],
    )
    .await;

    let result = &replies["\"call-1\""]["result"];
    assert_eq!(result["isError"], json!(false));
    let envelope: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(envelope, json!({"success": true, "result": {"id": "42"}}));
}

#[tokio::test]
async fn test_tools_call_failure_and_unknown_tool() {
    let harness = TestHarness::new().await;
    let replies = session(
        &harness,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": "get_contact", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "get_lead", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "hubspot/unknown"}),
        ],
    )
    .await;

    let failed = &replies["1"]["result"];
    assert_eq!(failed["isError"], json!(true));
    let envelope: Value = serde_json::from_str(failed["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(envelope["success"], json!(false));
    assert!(envelope["error"].as_str().unwrap().contains("contact_id"));

    assert_eq!(replies["2"]["error"]["code"], json!(-32602));
    assert_eq!(replies["3"]["error"]["code"], json!(-32601));
    assert_eq!(harness.request_count().await, 0);
}

#[tokio::test]
async fn test_slow_call_does_not_delay_later_requests() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/deals/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "slow"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&harness.server)
        .await;

    let mut session = Session::initialized(McpServer::new(harness.dispatcher.clone())).await;
    session
        .send(&json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                      "params": {"name": "get_deal", "arguments": {"deal_id": "slow"}}}))
        .await;
    session
        .send(&json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}))
        .await;

    let first = session.next().await.unwrap();
    assert_eq!(first["id"], json!(2));

    let replies = session.finish().await;
    assert_eq!(replies["1"]["result"]["isError"], json!(false));
}

#[tokio::test]
async fn test_end_of_input_closes_transport() {
    let harness = TestHarness::new().await;
    let replies = session(&harness, &[]).await;
    assert!(replies.is_empty());

    let result = harness
        .dispatcher
        .invoke("list_contacts", json!({}))
        .await
        .unwrap();
    assert!(result.error().unwrap().contains("closed"));
}

#[tokio::test]
async fn test_input_closed_before_handshake_still_closes_transport() {
    let harness = TestHarness::new().await;
    let session = Session::start(McpServer::new(harness.dispatcher.clone()));
    assert!(session.finish().await.is_empty());

    let result = harness
        .dispatcher
        .invoke("list_contacts", json!({}))
        .await
        .unwrap();
    assert!(result.error().unwrap().contains("closed"));
}

#[tokio::test]
async fn test_parse_error_keeps_session_alive() {
    let harness = TestHarness::new().await;
    let mut session = Session::initialized(McpServer::new(harness.dispatcher.clone())).await;

    session.input.write_all(b"{oops\n").await.unwrap();
    session
        .send(&json!({"jsonrpc": "2.0", "id": 7, "method": "ping"}))
        .await;

    let first = session.next().await.unwrap();
    assert_eq!(first["error"]["code"], json!(-32700));
    let second = session.next().await.unwrap();
    assert_eq!(second["id"], json!(7));
    session.finish().await;
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_in_flight_call_and_closes() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/deals/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "slow"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&harness.server)
        .await;

    let mut session = Session::initialized(McpServer::new(harness.dispatcher.clone())).await;
    session
        .send(&json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                      "params": {"name": "get_deal", "arguments": {"deal_id": "slow"}}}))
        .await;
    session.input.write_all(&[0xff, 0xfe, b'\n']).await.unwrap();

    let parse_error = session.next().await.unwrap();
    assert_eq!(parse_error["error"]["code"], json!(-32700));

    let replies = session.finish().await;
    let envelope: Value =
        serde_json::from_str(replies["1"]["result"]["content"][0]["text"].as_str().unwrap())
            .unwrap();
    assert_eq!(envelope, json!({"success": true, "result": {"id": "slow"}}));

    let after = harness
        .dispatcher
        .invoke("list_contacts", json!({}))
        .await
        .unwrap();
    assert!(after.error().unwrap().contains("closed"));
}
