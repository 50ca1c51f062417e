use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::IdentityProvider;
use crate::domain::services::{
    user_activity_service::UserActivityService, user_service::UserService,
};
use crate::infra::identity::http_identity_provider::HttpIdentityProvider;
use crate::infra::repositories::{
    postgres_activity_repo::PostgresActivityRepo, postgres_company_repo::PostgresCompanyRepo,
    postgres_template_repo::PostgresTemplateRepo,
    postgres_user_activity_repo::PostgresUserActivityRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_activity_repo::SqliteActivityRepo, sqlite_company_repo::SqliteCompanyRepo,
    sqlite_template_repo::SqliteTemplateRepo, sqlite_user_activity_repo::SqliteUserActivityRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let identity_provider: Arc<dyn IdentityProvider> = Arc::new(HttpIdentityProvider::new(
        config.identity_api_url.clone(),
        config.identity_api_key.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let company_repo = Arc::new(PostgresCompanyRepo::new(pool.clone()));
        let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));
        let activity_repo = Arc::new(PostgresActivityRepo::new(pool.clone()));
        let user_activity_repo = Arc::new(PostgresUserActivityRepo::new(pool.clone()));
        let template_repo = Arc::new(PostgresTemplateRepo::new(pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            user_activity_repo.clone(),
            identity_provider.clone(),
        ));
        let user_activity_service = Arc::new(UserActivityService::new(
            user_activity_repo.clone(),
            activity_repo.clone(),
            template_repo.clone(),
            user_repo.clone(),
        ));

        AppState {
            config: config.clone(),
            company_repo,
            user_repo,
            activity_repo,
            user_activity_repo,
            template_repo,
            identity_provider,
            user_service,
            user_activity_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let company_repo = Arc::new(SqliteCompanyRepo::new(pool.clone()));
        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let activity_repo = Arc::new(SqliteActivityRepo::new(pool.clone()));
        let user_activity_repo = Arc::new(SqliteUserActivityRepo::new(pool.clone()));
        let template_repo = Arc::new(SqliteTemplateRepo::new(pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            user_activity_repo.clone(),
            identity_provider.clone(),
        ));
        let user_activity_service = Arc::new(UserActivityService::new(
            user_activity_repo.clone(),
            activity_repo.clone(),
            template_repo.clone(),
            user_repo.clone(),
        ));

        AppState {
            config: config.clone(),
            company_repo,
            user_repo,
            activity_repo,
            user_activity_repo,
            template_repo,
            identity_provider,
            user_service,
            user_activity_service,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
