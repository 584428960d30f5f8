//! Thin services between the controllers and the repositories.
//!
//! Candidate and vacancy services also keep attachments in step with the records that
//! point at them.

mod candidates;
mod cities;
mod files;
mod users;
mod vacancies;

use async_trait::async_trait;

use super::domain::{Candidate, City, FileDto, StoredFile, User, Vacancy};
use super::repository::RepositoryError;

pub use candidates::SimpleCandidateService;
pub use cities::SimpleCityService;
pub use files::SimpleFileService;
pub use users::SimpleUserService;
pub use vacancies::SimpleVacancyService;

/// Error raised by the services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub trait CandidateService: Send + Sync {
    fn save(&self, candidate: Candidate, image: FileDto) -> Result<Candidate, ServiceError>;
    fn update(&self, candidate: Candidate, image: FileDto) -> Result<bool, ServiceError>;
    fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Candidate>, ServiceError>;
    fn find_all(&self) -> Result<Vec<Candidate>, ServiceError>;
}

pub trait VacancyService: Send + Sync {
    fn save(&self, vacancy: Vacancy, image: FileDto) -> Result<Vacancy, ServiceError>;
    fn update(&self, vacancy: Vacancy, image: FileDto) -> Result<bool, ServiceError>;
    fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>, ServiceError>;
    fn find_all(&self) -> Result<Vec<Vacancy>, ServiceError>;
}

pub trait CityService: Send + Sync {
    fn find_by_id(&self, id: i32) -> Result<Option<City>, ServiceError>;
    fn find_all(&self) -> Result<Vec<City>, ServiceError>;
}

pub trait FileService: Send + Sync {
    fn save(&self, file: FileDto) -> Result<StoredFile, ServiceError>;
    fn get_file_by_id(&self, id: i32) -> Result<Option<FileDto>, ServiceError>;
    fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn save(&self, user: User) -> Option<User>;
    async fn find_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, ServiceError>;
}
