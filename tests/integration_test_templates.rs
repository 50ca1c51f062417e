mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_template_crud_and_activity_set() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let a1 = app.seed_activity("Meet the team", 1, 3600).await;
    let a2 = app.seed_activity("Security training", 2, 5400).await;

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/templates")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Engineering onboarding",
                "department": "Engineering",
                "companyId": company_id,
                "activityIds": [a1, a2]
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::OK);
    let created = parse_body(create_res).await;
    let template_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["activityIds"], json!([a1, a2]));
    assert_eq!(created["data"]["companyId"], company_id);

    // Replace the activity set
    let update_res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/templates/{}", template_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Engineering onboarding v2",
                "activityIds": [a2]
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(update_res.status(), StatusCode::OK);
    let updated = parse_body(update_res).await;
    assert_eq!(updated["data"]["name"], "Engineering onboarding v2");
    assert_eq!(updated["data"]["activityIds"], json!([a2]));

    // Company-scoped listing
    let list_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/templates?companyId={}", company_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(list_res).await["data"].as_array().unwrap().len(), 1);

    let other_company_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/templates?companyId=4242")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(other_company_res).await["data"].as_array().unwrap().len(), 0);

    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/templates/{}", template_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::NO_CONTENT);

    let gone_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/templates/{}", template_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(gone_res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_template_update_ignores_company_and_department() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/templates")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Sales onboarding",
                "department": "Sales",
                "companyId": company_id
            }).to_string())).unwrap()
    ).await.unwrap();
    let template_id = parse_body(create_res).await["data"]["id"].as_i64().unwrap();

    // The payload tries to move the template; only the name may change
    let update_res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/templates/{}", template_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "id": 4242,
                "name": "Renamed",
                "companyId": 4242,
                "department": "Engineering"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(update_res.status(), StatusCode::OK);
    let updated = parse_body(update_res).await;
    assert_eq!(updated["data"]["id"], template_id);
    assert_eq!(updated["data"]["name"], "Renamed");
    assert_eq!(updated["data"]["companyId"], company_id);
    assert_eq!(updated["data"]["department"], "Sales");
}

#[tokio::test]
async fn test_template_requires_existing_company() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/templates")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Orphan template",
                "companyId": 4242
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
