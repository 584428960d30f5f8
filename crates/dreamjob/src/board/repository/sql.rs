use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use tracing::{debug, error};

use super::{RepositoryError, UserRepository};
use crate::board::domain::User;
use crate::config::DatabaseConfig;

const CREATE_USERS: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        email    TEXT    NOT NULL UNIQUE,
        name     TEXT    NOT NULL,
        password TEXT    NOT NULL
    )";

/// Accounts stored in the `users` table.
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    pool: SqlitePool,
    // An in-memory database is dropped with its last connection; this one is never
    // handed out, so pool churn cannot lose the schema.
    keep_alive: Option<Arc<Mutex<SqliteConnection>>>,
}

impl SqlUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            keep_alive: None,
        }
    }

    /// Open a pool sized for `config` and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let mut options = SqlitePoolOptions::new().max_connections(config.pool_size());
        if config.is_in_memory() {
            options = options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options.connect(&config.url).await?;

        let keep_alive = if config.is_in_memory() {
            let connection = pool.connect_options().connect().await?;
            Some(Arc::new(Mutex::new(connection)))
        } else {
            None
        };

        let repository = Self { pool, keep_alive };
        repository.migrate().await?;
        Ok(repository)
    }

    /// Whether a dedicated connection pins an in-memory database.
    pub fn is_pinned(&self) -> bool {
        self.keep_alive.is_some()
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        debug!("users schema ready");
        Ok(())
    }

    /// Remove every account and restart the id sequence.
    pub async fn truncate(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'users'")
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn save(&self, mut user: User) -> Option<User> {
        let inserted = sqlx::query("INSERT INTO users (email, name, password) VALUES (?, ?, ?)")
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(result) => match i32::try_from(result.last_insert_rowid()) {
                Ok(id) => {
                    user.id = id;
                    Some(user)
                }
                Err(err) => {
                    error!(email = %user.email, error = %err, "generated user id out of range");
                    None
                }
            },
            Err(err) => {
                error!(email = %user.email, error = %err, "failed to save user");
                None
            }
        }
    }

    async fn find_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password FROM users WHERE email = ? AND password = ?",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IN_MEMORY_DATABASE;
    use sqlx::Connection;

    async fn repository() -> SqlUserRepository {
        let config = DatabaseConfig {
            url: IN_MEMORY_DATABASE.to_string(),
            max_connections: 4,
        };
        SqlUserRepository::connect(&config)
            .await
            .expect("in-memory database opens")
    }

    #[tokio::test]
    async fn save_then_find_returns_same_user() {
        let repository = repository().await;
        let saved = repository
            .save(User::new("c112@gmail.com", "a", "ac"))
            .await
            .expect("user saved");

        let found = repository
            .find_by_email_and_password(&saved.email, &saved.password)
            .await
            .expect("query runs");

        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn save_several_assigns_generated_ids() {
        let repository = repository().await;
        let mut saved = Vec::new();
        for (email, name) in [
            ("111@gmail.com", "a"),
            ("222@gmail.com", "b"),
            ("333@gmail.com", "c"),
        ] {
            saved.push(
                repository
                    .save(User::new(email, name, "pw"))
                    .await
                    .expect("user saved"),
            );
        }

        let ids: Vec<i32> = saved.iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for user in &saved {
            let found = repository
                .find_by_email_and_password(&user.email, "pw")
                .await
                .expect("query runs");
            assert_eq!(found.as_ref(), Some(user));
        }
    }

    #[tokio::test]
    async fn same_email_is_rejected_with_empty_result() {
        let repository = repository().await;
        repository
            .save(User::new("111@gmail.com", "a", "a"))
            .await
            .expect("first save succeeds");

        let duplicate = repository.save(User::new("111@gmail.com", "b", "b")).await;

        assert!(duplicate.is_none());
        let original = repository
            .find_by_email_and_password("111@gmail.com", "a")
            .await
            .expect("query runs")
            .expect("original kept");
        assert_eq!(original.name, "a");
    }

    #[tokio::test]
    async fn wrong_password_finds_nothing() {
        let repository = repository().await;
        repository
            .save(User::new("user@mail.ru", "user", "secret"))
            .await
            .expect("user saved");

        let found = repository
            .find_by_email_and_password("user@mail.ru", "guess")
            .await
            .expect("query runs");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn truncate_restarts_identity() {
        let repository = repository().await;
        repository
            .save(User::new("first@mail.ru", "first", "pw"))
            .await
            .expect("user saved");
        repository
            .save(User::new("second@mail.ru", "second", "pw"))
            .await
            .expect("user saved");

        repository.truncate().await.expect("truncate runs");

        let again = repository
            .save(User::new("first@mail.ru", "first", "pw"))
            .await
            .expect("email free again");
        assert_eq!(again.id, 1);
    }

    #[tokio::test]
    async fn in_memory_users_survive_a_recycled_connection() {
        let repository = repository().await;
        assert!(repository.is_pinned());
        let saved = repository
            .save(User::new("a@b.c", "a", "pw"))
            .await
            .expect("user saved");

        let pooled = repository.pool().acquire().await.expect("connection available");
        pooled.detach().close().await.expect("connection closes");

        let found = repository
            .find_by_email_and_password("a@b.c", "pw")
            .await
            .expect("users table still present");
        assert_eq!(found, Some(saved));
        assert!(repository
            .save(User::new("d@e.f", "d", "pw"))
            .await
            .is_some());
    }
}
