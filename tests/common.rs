use onboard_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::IdentityProvider,
    domain::services::{
        user_activity_service::UserActivityService, user_service::UserService,
    },
    error::AppError,
    infra::repositories::{
        sqlite_activity_repo::SqliteActivityRepo, sqlite_company_repo::SqliteCompanyRepo,
        sqlite_template_repo::SqliteTemplateRepo,
        sqlite_user_activity_repo::SqliteUserActivityRepo, sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::Request,
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

/// In-memory stand-in for the identity provider. Counts calls and can be
/// switched into a failing mode to exercise upstream-failure paths.
pub struct MockIdentityProvider {
    pub sign_up_calls: AtomicUsize,
    pub update_email_calls: AtomicUsize,
    pub update_password_calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            sign_up_calls: AtomicUsize::new(0),
            update_email_calls: AtomicUsize::new(0),
            update_password_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::Upstream("mock identity provider failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<(), AppError> {
        self.check()?;
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update_email(&self, _id_token: &str, _new_email: &str) -> Result<(), AppError> {
        self.check()?;
        self.update_email_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update_password(&self, _id_token: &str, _new_password: &str) -> Result<(), AppError> {
        self.check()?;
        self.update_password_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub identity: Arc<MockIdentityProvider>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            identity_api_url: "http://localhost:9099".to_string(),
            identity_api_key: "test-key".to_string(),
        };

        let identity = Arc::new(MockIdentityProvider::new());

        let company_repo = Arc::new(SqliteCompanyRepo::new(pool.clone()));
        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let activity_repo = Arc::new(SqliteActivityRepo::new(pool.clone()));
        let user_activity_repo = Arc::new(SqliteUserActivityRepo::new(pool.clone()));
        let template_repo = Arc::new(SqliteTemplateRepo::new(pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            user_activity_repo.clone(),
            identity.clone(),
        ));
        let user_activity_service = Arc::new(UserActivityService::new(
            user_activity_repo.clone(),
            activity_repo.clone(),
            template_repo.clone(),
            user_repo.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            company_repo,
            user_repo,
            activity_repo,
            user_activity_repo,
            template_repo,
            identity_provider: identity.clone(),
            user_service,
            user_activity_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            identity,
        }
    }

    /// Creates a company through the API and returns its id.
    pub async fn seed_company(&self, name: &str) -> i64 {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/companies")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({
                    "name": name,
                    "departments": ["Engineering", "Sales"]
                }).to_string()))
                .unwrap()
        ).await.unwrap();

        assert!(response.status().is_success(), "seed_company failed: {}", response.status());
        parse_body(response).await["data"]["id"].as_i64().unwrap()
    }

    /// Creates a user under the given manager and returns its id.
    pub async fn seed_user(&self, manager_id: i64, company_id: i64, email: &str) -> i64 {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/users/{}/employees", manager_id))
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({
                    "email": email,
                    "password": "initial-password",
                    "companyId": company_id
                }).to_string()))
                .unwrap()
        ).await.unwrap();

        assert!(response.status().is_success(), "seed_user failed: {}", response.status());
        parse_body(response).await["data"]["id"].as_i64().unwrap()
    }

    /// Creates an activity and returns its id.
    pub async fn seed_activity(&self, title: &str, week: i32, time_estimation_secs: i64) -> i64 {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/activities")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({
                    "title": title,
                    "week": week,
                    "timeEstimationSecs": time_estimation_secs
                }).to_string()))
                .unwrap()
        ).await.unwrap();

        assert!(response.status().is_success(), "seed_activity failed: {}", response.status());
        parse_body(response).await["data"]["id"].as_i64().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}
