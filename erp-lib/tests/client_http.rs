//! HTTP behaviour of `ErpClient` against a mock backend.

use std::time::Duration;

use erp_lib::ErpClient;
use erp_lib::api::{Backend, ListQuery, OrderBy};
use erp_lib::auth::StaticTokenProvider;
use erp_lib::error::{ApiError, AuthError, Error};
use erp_lib::model::{ItemAction, ListResponse, Record, Resource};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ErpClient {
    ErpClient::builder()
        .url(format!("{}/api/", server.uri()))
        .token_provider(StaticTokenProvider::new("secret"))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client")
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn test_list_paginated_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/parts/"))
        .and(header("authorization", "Bearer secret"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "20"))
        .and(query_param("ordering", "-key"))
        .and(query_param("job_no", "001-23"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"key": "PT-1", "name": "Bracket"}],
            "count": 41
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::new()
        .filter("job_no", "001-23")
        .filter("status", "")
        .page(1)
        .page_size(20)
        .order_by(OrderBy::desc("key"));
    let list = client(&server)
        .list(Resource::Parts, &query)
        .await
        .expect("list");

    assert!(list.is_paginated());
    assert_eq!(list.total(), 41);
    assert_eq!(list.records()[0]["name"], "Bracket");
}

#[tokio::test]
async fn test_list_plain_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/procurement/payment-terms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Cash"},
            {"id": 2, "name": "30 days"}
        ])))
        .mount(&server)
        .await;

    let list = client(&server)
        .list(Resource::PaymentTerms, &ListQuery::new())
        .await
        .expect("list");

    assert!(matches!(list, ListResponse::Plain { .. }));
    assert_eq!(list.total(), 2);
}

#[tokio::test]
async fn test_list_unexpected_shape_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/operations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "ok"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .list(Resource::Operations, &ListQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Parse { .. })), "{err:?}");
}

#[tokio::test]
async fn test_http_error_carries_status_and_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/job-orders/001-23/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = client(&server)
        .retrieve(Resource::JobOrders, "001-23")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    match err {
        Error::Api(api) => {
            assert!(api.is_not_found());
            assert!(api.to_string().contains("Not found."));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/procurement/suppliers/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .list(Resource::Suppliers, &ListQuery::new())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, Error::Auth(AuthError::Unauthorized(msg)) if msg == "Token expired"),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_update_uses_patch() {
    let server = MockServer::start().await;
    let body = json!({"name": "Bracket v2"});
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/parts/PT-1/"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"key": "PT-1", "name": "Bracket v2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server)
        .update(Resource::Parts, "PT-1", &record(body))
        .await
        .expect("update");
    assert_eq!(updated["name"], "Bracket v2");
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/procurement/suppliers/7/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete(Resource::Suppliers, "7")
        .await
        .expect("delete");
}

#[tokio::test]
async fn test_item_action_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/operations/OP-3/mark_completed/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(&server)
        .action(Resource::Operations, "OP-3", ItemAction::MarkCompleted, None)
        .await
        .expect("action");
    assert_eq!(body, Some(json!({"status": "ok"})));
}

#[tokio::test]
async fn test_bulk_create_itemized_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/parts/bulk-create/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "failures": [
                {"index": 0, "errors": {"name": ["This field is required."]}}
            ]
        })))
        .mount(&server)
        .await;

    let records = vec![record(json!({"job_no": "001-23"}))];
    let err = client(&server)
        .bulk_create(Resource::Parts, &records)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::BulkCreate(_)), "{err:?}");
    let message = err.to_string();
    assert!(message.starts_with("Bulk creation failed:"));
    assert!(message.contains("Item 1"));
    assert!(message.contains("name: This field is required."));
}

#[tokio::test]
async fn test_bulk_create_other_failure_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/parts/bulk-create/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .bulk_create(Resource::Parts, &[])
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_planning_bulk_save_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/operations/planning/bulk-save/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let saved = client(&server)
        .bulk_save(Resource::Operations, &[record(json!({"key": "OP-1", "order": 2}))])
        .await
        .expect("bulk save");
    assert_eq!(saved, None);
}

#[tokio::test]
async fn test_missing_token_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ErpClient::builder()
        .url(server.uri())
        .token_provider(StaticTokenProvider::new(""))
        .build()
        .expect("client");
    let err = client
        .list(Resource::Parts, &ListQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
}
