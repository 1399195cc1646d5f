//! Router-level tests against mocked tracker and product-management APIs.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use casebridge_core::config::IntegrationConfig;
use http_body_util::BodyExt;
use mockito::Matcher;
use tower::ServiceExt;

fn config_for(server: &mockito::ServerGuard) -> IntegrationConfig {
    IntegrationConfig {
        fogbugz_url: server.url(),
        api_token: "token".to_string(),
        project_id: 7,
        product_api_url: server.url(),
        product_api_key: "key".to_string(),
        integration_name: "fogbugz".to_string(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok() {
    let server = mockito::Server::new_async().await;
    let router = casebridge_server::build_router(config_for(&server));

    let response = router
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_creates_case_and_persists_cross_reference() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/f/api/json")
        .with_body(
            serde_json::json!({
                "data": { "case": { "ixBug": 77, "sTitle": "Login flow", "sStatus": "Active" } },
                "errors": []
            })
            .to_string(),
        )
        .create_async()
        .await;
    let crossref = server
        .mock("POST", "/api/v1/features/APP-1/integrations/fogbugz/fields")
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let router = casebridge_server::build_router(config_for(&server));
    let request = Request::post("/api/sync")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"reference_num":"APP-1","name":"Login flow"}"#,
        ))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["case_id"], 77);
    assert_eq!(body["url"], format!("{}/f/cases/77", server.url()));
    create.assert_async().await;
    crossref.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_patches_workflow_status_of_linked_record() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/f/api/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("cmd".into(), "search".into()),
            Matcher::UrlEncoded("q".into(), "case:42".into()),
        ]))
        .with_body(
            serde_json::json!({
                "data": { "cases": [{
                    "ixBug": 42, "sTitle": "Login flow", "sStatus": "Resolved (Fixed)"
                }] },
                "errors": []
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/integrations/fogbugz/fields")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "number".into()),
            Matcher::UrlEncoded("value".into(), "42".into()),
        ]))
        .with_body(r#"{"feature":{"reference_num":"APP-12"}}"#)
        .create_async()
        .await;
    let patch = server
        .mock("PUT", "/api/v1/features/APP-12")
        .match_body(Matcher::Json(serde_json::json!({
            "feature": { "workflow_status": { "category": "done" } }
        })))
        .with_body("{}")
        .create_async()
        .await;

    let router = casebridge_server::build_router(config_for(&server));
    let response = router
        .oneshot(
            Request::post("/webhook?case_number=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    patch.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_for_unknown_case_returns_ok_without_patching() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/f/api/json")
        .match_query(Matcher::Any)
        .with_body(r#"{"data":{"cases":[]},"errors":[]}"#)
        .create_async()
        .await;
    // No product-side mocks: any lookup or patch attempt would 501.

    let router = casebridge_server::build_router(config_for(&server));
    let response = router
        .oneshot(
            Request::post("/webhook?case_number=999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["received"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn projects_endpoint_lists_tracker_projects() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/f/api/json")
        .match_query(Matcher::UrlEncoded("cmd".into(), "listProjects".into()))
        .with_body(
            serde_json::json!({
                "data": { "projects": [{ "ixProject": 7, "sProject": "Product" }] },
                "errors": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let router = casebridge_server::build_router(config_for(&server));
    let response = router
        .oneshot(Request::get("/api/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["projects"][0]["name"], "Product");
}

#[tokio::test(flavor = "multi_thread")]
async fn tracker_failure_surfaces_as_bad_gateway() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/f/api/json")
        .match_query(Matcher::Any)
        .with_body(r#"{"errors":[{"message":"Not logged in"}]}"#)
        .create_async()
        .await;

    let router = casebridge_server::build_router(config_for(&server));
    let response = router
        .oneshot(
            Request::post("/webhook?case_number=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
