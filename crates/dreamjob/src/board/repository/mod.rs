//! Keyed CRUD stores, one per record type.
//!
//! Candidates, vacancies, cities and attachments live in [`memory`] stores; accounts live in
//! the SQL-backed [`sql::SqlUserRepository`].

pub mod memory;
pub mod sql;

use async_trait::async_trait;

use super::domain::{Candidate, City, StoredFile, User, Vacancy};

pub use memory::{
    MemoryCandidateRepository, MemoryCityRepository, MemoryFileRepository, MemoryStore,
    MemoryVacancyRepository,
};
pub use sql::SqlUserRepository;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
}

pub trait CandidateRepository: Send + Sync {
    fn save(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    fn update(&self, candidate: Candidate) -> Result<bool, RepositoryError>;
    fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Candidate>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Candidate>, RepositoryError>;
}

pub trait VacancyRepository: Send + Sync {
    fn save(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError>;
    fn update(&self, vacancy: Vacancy) -> Result<bool, RepositoryError>;
    fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Vacancy>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Vacancy>, RepositoryError>;
}

pub trait CityRepository: Send + Sync {
    fn find_by_id(&self, id: i32) -> Result<Option<City>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<City>, RepositoryError>;
}

pub trait FileRepository: Send + Sync {
    fn save(&self, file: StoredFile) -> Result<StoredFile, RepositoryError>;
    fn find_by_id(&self, id: i32) -> Result<Option<StoredFile>, RepositoryError>;
    fn delete_by_id(&self, id: i32) -> Result<bool, RepositoryError>;
}

/// Account storage. Saving swallows database failures (duplicate e-mail included) into `None`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: User) -> Option<User>;
    async fn find_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError>;
}
