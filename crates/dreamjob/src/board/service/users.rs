use std::sync::Arc;

use async_trait::async_trait;

use super::{ServiceError, UserService};
use crate::board::domain::User;
use crate::board::repository::UserRepository;

pub struct SimpleUserService<R> {
    repository: Arc<R>,
}

impl<R: UserRepository> SimpleUserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: UserRepository> UserService for SimpleUserService<R> {
    async fn save(&self, user: User) -> Option<User> {
        self.repository.save(user).await
    }

    async fn find_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, ServiceError> {
        Ok(self
            .repository
            .find_by_email_and_password(email, password)
            .await?)
    }
}
