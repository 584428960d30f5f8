//! Controllers and the axum router exposing them.
//!
//! Each controller turns decoded input into a [`View`] plus a [`Model`]; the handlers around
//! them only deal with extraction, sessions and rendering.

pub mod candidates;
pub mod files;
pub mod form;
pub mod index;
pub mod session;
pub mod users;
pub mod vacancies;
pub mod view;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;
use tower_sessions_sqlx_store::SqliteStore;

use super::service::{CandidateService, CityService, FileService, UserService, VacancyService};

pub use candidates::{CandidateController, CANDIDATE_NOT_FOUND};
pub use files::FileController;
pub use form::{FormError, LoginForm, MultipartForm, RegistrationForm};
pub use session::{
    session_layer, session_store, Session, SessionHandle, SESSION_COOKIE, SESSION_IDLE_TIMEOUT,
};
pub use users::{UserController, BAD_CREDENTIALS, DUPLICATE_EMAIL};
pub use vacancies::{VacancyController, VACANCY_NOT_FOUND};
pub use view::{Model, View, ERROR_VIEW};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct WebState {
    pub candidates: Arc<CandidateController>,
    pub vacancies: Arc<VacancyController>,
    pub users: Arc<UserController>,
    pub files: Arc<FileController>,
    pub sessions: SqliteStore,
}

impl WebState {
    pub fn new(
        candidates: Arc<dyn CandidateService>,
        vacancies: Arc<dyn VacancyService>,
        cities: Arc<dyn CityService>,
        files: Arc<dyn FileService>,
        users: Arc<dyn UserService>,
        sessions: SqliteStore,
    ) -> Self {
        Self {
            candidates: Arc::new(CandidateController::new(candidates, cities.clone())),
            vacancies: Arc::new(VacancyController::new(vacancies, cities)),
            users: Arc::new(UserController::new(users)),
            files: Arc::new(FileController::new(files)),
            sessions,
        }
    }
}

/// Router builder exposing every job board page.
pub fn board_router(state: WebState) -> Router {
    let sessions = session_layer(state.sessions.clone());
    Router::new()
        .merge(index::routes())
        .merge(candidates::routes())
        .merge(vacancies::routes())
        .merge(users::routes())
        .merge(files::routes())
        .layer(sessions)
        .with_state(state)
}
