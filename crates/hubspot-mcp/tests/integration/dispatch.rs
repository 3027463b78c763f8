//! Dispatcher behaviour against a mock HubSpot.

use std::time::Duration;

use hubspot_mcp::InvocationResult;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestHarness;

#[tokio::test]
async fn test_create_contact_shorthand_fills_properties() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({"properties": {"email": "a@b.com", "firstname": "X"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "501"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke("create_contact", json!({"email": "a@b.com", "firstname": "X"}))
        .await
        .unwrap();

    assert_eq!(result, InvocationResult::Success(json!({"id": "501"})));
}

#[tokio::test]
async fn test_create_contact_shorthand_overwrites_properties() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts"))
        .and(body_json(json!({"properties": {"email": "a@b.com", "lastname": "Y"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "502"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke(
            "create_contact",
            json!({"email": "a@b.com", "properties": {"email": "old@b.com", "lastname": "Y"}}),
        )
        .await
        .unwrap();

    assert!(result.is_success());
}

#[tokio::test]
async fn test_create_deal_folds_deal_fields() {
    let harness = TestHarness::answering(json!({"id": "7"})).await;

    harness
        .dispatcher
        .invoke(
            "create_deal",
            json!({"dealname": "Renewal", "amount": "1200", "properties": {"closedate": "2026-12-01"}}),
        )
        .await
        .unwrap();

    assert_eq!(
        harness.last_body().await,
        json!({"properties": {"closedate": "2026-12-01", "dealname": "Renewal", "amount": "1200"}})
    );
}

#[tokio::test]
async fn test_delete_no_content_envelope() {
    let harness = TestHarness::new().await;
    Mock::given(method("DELETE"))
        .and(path("/crm/v3/objects/contacts/77"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke("delete_contact", json!({"contact_id": "77"}))
        .await
        .unwrap();

    assert_eq!(
        result.to_json(),
        json!({
            "success": true,
            "result": {"success": true, "message": "Operation completed successfully"}
        })
    );
}

#[tokio::test]
async fn test_search_builds_single_filter_group() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/contacts/search"))
        .and(body_json(json!({
            "filterGroups": [{
                "filters": [{"propertyName": "email", "operator": "EQ", "value": "a@b.com"}]
            }],
            "limit": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1, "results": []})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke(
            "search",
            json!({"object_type": "contacts", "property": "email", "value": "a@b.com", "limit": 10}),
        )
        .await
        .unwrap();

    assert!(result.is_success());
}

#[tokio::test]
async fn test_search_rejects_unknown_object_type_before_network() {
    let harness = TestHarness::answering(json!({})).await;

    let result = harness
        .dispatcher
        .invoke(
            "search",
            json!({"object_type": "tickets", "property": "email", "value": "a@b.com"}),
        )
        .await
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(harness.request_count().await, 0);
}

#[tokio::test]
async fn test_list_sends_limit_and_properties() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/companies"))
        .and(query_param("limit", "100"))
        .and(query_param("properties", "name,domain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke("list_companies", json!({"properties": ["name", "domain"]}))
        .await
        .unwrap();

    assert!(result.is_success());
}

#[tokio::test]
async fn test_update_company_patches_properties() {
    let harness = TestHarness::new().await;
    Mock::given(method("PATCH"))
        .and(path("/crm/v3/objects/companies/12"))
        .and(body_json(json!({"properties": {"domain": "example.com"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "12"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke(
            "update_company",
            json!({"company_id": "12", "properties": {"domain": "example.com"}}),
        )
        .await
        .unwrap();

    assert_eq!(result.value(), Some(&json!({"id": "12"})));
}

#[tokio::test]
async fn test_server_error_becomes_failure_envelope() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/deals/3"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke("get_deal", json!({"deal_id": "3"}))
        .await
        .unwrap();

    let envelope = result.to_json();
    assert_eq!(envelope["success"], json!(false));
    let message = envelope["error"].as_str().unwrap();
    assert!(message.contains("503"));
    assert!(message.contains("upstream unavailable"));
}

#[tokio::test]
async fn test_invalid_json_body_becomes_failure_envelope() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&harness.server)
        .await;

    let result = harness
        .dispatcher
        .invoke("get_company", json!({"company_id": "1"}))
        .await
        .unwrap();

    assert!(!result.is_success());
}

#[tokio::test]
async fn test_unknown_tool_never_succeeds() {
    let harness = TestHarness::answering(json!({})).await;

    for name in ["unknown_tool", "", "LIST_CONTACTS", "delete_deal"] {
        let err = harness.dispatcher.invoke(name, json!({})).await.unwrap_err();
        assert!(err.is_unknown_tool(), "{name} should be unknown");
    }
    assert_eq!(harness.request_count().await, 0);
}

#[tokio::test]
async fn test_close_twice_then_invoke_fails() {
    let harness = TestHarness::answering(json!({"results": []})).await;

    harness.dispatcher.close().await.unwrap();
    harness.dispatcher.close().await.unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        harness.dispatcher.invoke("list_contacts", json!({})),
    )
    .await
    .expect("invoke after close must not hang")
    .unwrap();

    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("closed"));
    assert_eq!(harness.request_count().await, 0);
}

#[tokio::test]
async fn test_slow_call_does_not_block_fast_call() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "slow"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "fast"})))
        .mount(&harness.server)
        .await;

    let slow = {
        let dispatcher = harness.dispatcher.clone();
        tokio::spawn(async move {
            dispatcher
                .invoke("get_contact", json!({"contact_id": "slow"}))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let fast = harness
        .dispatcher
        .invoke("get_contact", json!({"contact_id": "fast"}))
        .await
        .unwrap();
    assert_eq!(fast.value(), Some(&json!({"id": "fast"})));
    assert!(!slow.is_finished());

    let slow = slow.await.unwrap().unwrap();
    assert_eq!(slow.value(), Some(&json!({"id": "slow"})));
}

#[tokio::test]
async fn test_close_waits_for_in_flight_call() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "1"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&harness.server)
        .await;

    let in_flight = {
        let dispatcher = harness.dispatcher.clone();
        tokio::spawn(async move {
            dispatcher
                .invoke("get_deal", json!({"deal_id": "1"}))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    harness.dispatcher.close().await.unwrap();

    let result = in_flight.await.unwrap().unwrap();
    assert!(result.is_success());
}
