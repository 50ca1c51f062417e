use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{activity, company, health, template, user, user_activity};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Companies
        .route("/api/companies", get(company::list_companies).post(company::create_company))
        .route("/api/companies/{company_id}", get(company::get_company).put(company::update_company).delete(company::delete_company))

        // Users
        .route("/api/users/by-email/{email}", get(user::get_user_by_email))
        .route("/api/users/{user_id}", get(user::get_user).put(user::update_user).delete(user::delete_user))
        .route("/api/users/{user_id}/employees", get(user::list_employees).post(user::create_employee))

        // Activity catalog
        .route("/api/activities", get(activity::list_activities).post(activity::create_activity))
        .route("/api/activities/{activity_id}", get(activity::get_activity).put(activity::update_activity).delete(activity::delete_activity))

        // Templates
        .route("/api/templates", get(template::list_templates).post(template::create_template))
        .route("/api/templates/{template_id}", get(template::get_template).put(template::update_template).delete(template::delete_template))

        // User activities
        .route("/api/{user_id}/activities", get(user_activity::list_user_activities).post(user_activity::create_user_activity))
        .route("/api/{user_id}/activities/{user_activity_id}", get(user_activity::get_user_activity).patch(user_activity::update_user_activity).delete(user_activity::delete_user_activity))
        .route("/assign/{template_id}", post(user_activity::assign_template))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
