use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use dreamjob::board::repository::{
    MemoryCandidateRepository, MemoryCityRepository, MemoryFileRepository,
    MemoryVacancyRepository, SqlUserRepository,
};
use dreamjob::board::service::{
    FileService, SimpleCandidateService, SimpleCityService, SimpleFileService, SimpleUserService,
    SimpleVacancyService,
};
use dreamjob::board::web::{session_store, WebState};
use dreamjob::config::{AppConfig, DatabaseConfig};
use dreamjob::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing::{debug, error, info};

const SESSION_CLEANUP_PERIOD: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) async fn connect_users(config: &DatabaseConfig) -> Result<SqlUserRepository, AppError> {
    let repository = SqlUserRepository::connect(config).await?;
    debug!(
        database = %config.url,
        pool_size = config.pool_size(),
        pinned = repository.is_pinned(),
        "users database connected"
    );
    Ok(repository)
}

/// Wire repositories, services and controllers for the job board.
pub(crate) async fn build_web_state(config: &AppConfig) -> Result<WebState, AppError> {
    let (candidates, vacancies) = if config.seed_data {
        info!("seeding demo vacancies and candidates");
        (
            MemoryCandidateRepository::with_demo_data()?,
            MemoryVacancyRepository::with_demo_data()?,
        )
    } else {
        (
            MemoryCandidateRepository::default(),
            MemoryVacancyRepository::default(),
        )
    };
    let users = connect_users(&config.database).await?;
    let sessions = session_store(users.pool().clone()).await?;

    let files: Arc<dyn FileService> = Arc::new(SimpleFileService::new(Arc::new(
        MemoryFileRepository::default(),
    )));

    Ok(WebState::new(
        Arc::new(SimpleCandidateService::new(
            Arc::new(candidates),
            files.clone(),
        )),
        Arc::new(SimpleVacancyService::new(Arc::new(vacancies), files.clone())),
        Arc::new(SimpleCityService::new(Arc::new(
            MemoryCityRepository::default(),
        ))),
        files,
        Arc::new(SimpleUserService::new(Arc::new(users))),
        sessions,
    ))
}

/// Delete expired session records in the background for the life of the process.
pub(crate) fn spawn_session_cleanup(store: SqliteStore) {
    tokio::spawn(async move {
        if let Err(err) = store
            .continuously_delete_expired(SESSION_CLEANUP_PERIOD)
            .await
        {
            error!(error = %err, "expired session cleanup stopped");
        }
    });
}
