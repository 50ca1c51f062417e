mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_user_activity_lifecycle() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let user_id = app.seed_user(1, company_id, "uma@acme.io").await;
    let activity_id = app.seed_activity("Pair with a teammate", 1, 3600).await;

    // Assign
    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/{}/activities", user_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "activityId": activity_id }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::OK);
    let created = parse_body(create_res).await;
    let assignment_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["status"], "PENDING");
    assert_eq!(created["data"]["userId"], user_id);
    assert!(created["data"]["startedWorkedOn"].is_null());

    // Starting stamps the start time
    let start_res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "IN_PROGRESS" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(start_res.status(), StatusCode::OK);
    let started = parse_body(start_res).await;
    assert_eq!(started["data"]["status"], "IN_PROGRESS");
    assert!(!started["data"]["startedWorkedOn"].is_null());

    // Completing with an explicit duration derives the on-time flag and
    // feeds the activity aggregates
    let done_res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "DONE", "timeTookToCompleteSecs": 1200 }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(done_res.status(), StatusCode::OK);
    let done = parse_body(done_res).await;
    assert_eq!(done["data"]["status"], "DONE");
    assert_eq!(done["data"]["timeTookToCompleteSecs"], 1200);
    assert_eq!(done["data"]["isOnTime"], true);

    let activity_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/activities/{}", activity_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let activity = parse_body(activity_res).await;
    assert_eq!(activity["data"]["userCompletedCount"], 1);
    assert_eq!(activity["data"]["userAverageTimeSecs"], 1200);

    // Delete, then reads fail
    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::NO_CONTENT);

    let get_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(get_res.status(), StatusCode::NOT_FOUND);

    let list_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/{}/activities", user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(list_res).await["data"].as_array().unwrap().len(), 0);

    let second_delete = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(second_delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_completion_time_is_derived_from_start() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let user_id = app.seed_user(1, company_id, "tim@acme.io").await;
    let activity_id = app.seed_activity("Write a design doc", 3, 7200).await;

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/{}/activities", user_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "activityId": activity_id }).to_string())).unwrap()
    ).await.unwrap();
    let assignment_id = parse_body(create_res).await["data"]["id"].as_i64().unwrap();

    // Backdate the start by an hour, then complete without explicit timing
    let started_at = (Utc::now() - Duration::hours(1)).to_rfc3339();
    let start_res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "IN_PROGRESS", "startedWorkedOn": started_at }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(start_res.status(), StatusCode::OK);

    let done_res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "DONE" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(done_res.status(), StatusCode::OK);
    let done = parse_body(done_res).await;

    let took = done["data"]["timeTookToCompleteSecs"].as_i64().unwrap();
    assert!(took >= 3600, "expected at least an hour, got {}", took);
    // An hour against a two-hour estimate is on time
    assert_eq!(done["data"]["isOnTime"], true);
}

#[tokio::test]
async fn test_create_against_unknown_user_or_activity() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let user_id = app.seed_user(1, company_id, "vera@acme.io").await;
    let activity_id = app.seed_activity("Meet your buddy", 1, 1800).await;

    let unknown_activity = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/{}/activities", user_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "activityId": 4242 }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(unknown_activity.status(), StatusCode::NOT_FOUND);

    let unknown_user = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/4242/activities")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "activityId": activity_id }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(unknown_user.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_rejects_unknown_status() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let user_id = app.seed_user(1, company_id, "walt@acme.io").await;
    let activity_id = app.seed_activity("File expenses", 1, 900).await;

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/{}/activities", user_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "activityId": activity_id }).to_string())).unwrap()
    ).await.unwrap();
    let assignment_id = parse_body(create_res).await["data"]["id"].as_i64().unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/api/{}/activities/{}", user_id, assignment_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "status": "WIP" }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assign_template_fans_out() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let user_id = app.seed_user(1, company_id, "yuri@acme.io").await;
    let a1 = app.seed_activity("Meet the team", 1, 3600).await;
    let a2 = app.seed_activity("Security training", 2, 5400).await;

    let template_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/templates")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Engineering onboarding",
                "department": "Engineering",
                "companyId": company_id,
                "activityIds": [a1, a2]
            }).to_string())).unwrap()
    ).await.unwrap();
    let template_id = parse_body(template_res).await["data"]["id"].as_i64().unwrap();

    let assign_res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/assign/{}?userId={}", template_id, user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(assign_res.status(), StatusCode::NO_CONTENT);

    let list_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/{}/activities", user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let listed = parse_body(list_res).await;
    let assignments = listed["data"].as_array().unwrap().clone();
    assert_eq!(assignments.len(), 2);
    let mut assigned_ids: Vec<i64> = assignments.iter()
        .map(|a| {
            assert_eq!(a["userId"], user_id);
            assert_eq!(a["status"], "PENDING");
            a["activityId"].as_i64().unwrap()
        })
        .collect();
    assigned_ids.sort();
    assert_eq!(assigned_ids, vec![a1, a2]);

    // Unknown template assigns nothing
    let unknown_res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/assign/4242?userId={}", user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(unknown_res.status(), StatusCode::NOT_FOUND);

    let recount_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/{}/activities", user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(recount_res).await["data"].as_array().unwrap().len(), 2);

    // Unknown user gets nothing either
    let unknown_user_res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/assign/{}?userId=4242", template_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(unknown_user_res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_template_skips_deleted_activities() {
    let app = TestApp::new().await;
    let company_id = app.seed_company("Acme").await;
    let user_id = app.seed_user(1, company_id, "zoe@acme.io").await;
    let a1 = app.seed_activity("Meet the team", 1, 3600).await;
    let a2 = app.seed_activity("Legacy training", 2, 5400).await;

    let template_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/templates")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Onboarding",
                "companyId": company_id,
                "activityIds": [a1, a2]
            }).to_string())).unwrap()
    ).await.unwrap();
    let template_id = parse_body(template_res).await["data"]["id"].as_i64().unwrap();

    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/activities/{}", a2))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::NO_CONTENT);

    let assign_res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/assign/{}?userId={}", template_id, user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(assign_res.status(), StatusCode::NO_CONTENT);

    let list_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/{}/activities", user_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let listed = parse_body(list_res).await;
    let assignments = listed["data"].as_array().unwrap().clone();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["activityId"], a1);
}
