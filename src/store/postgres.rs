use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;

use super::{AccountStore, NewUser, Registered, StoreError, User};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Classifies a failed user insert: duplicate email, a row the database
/// refused, or an infrastructure failure.
fn user_insert_error(err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        return StoreError::Conflict;
    }
    match err {
        sqlx::Error::Database(db_err) => StoreError::Rejected(db_err.message().to_string()),
        other => StoreError::Db(other),
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, age, password_hash, birthday,
                   gender_id, address, category, wages, contact, profile, resume_id
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_with_resume(&self, user: NewUser) -> Result<Registered, StoreError> {
        let mut tx = self.pool.begin().await?;

        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, email, age, password_hash, birthday,
                               gender_id, address, category, wages, contact, profile)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.password_hash)
        .bind(user.birthday)
        .bind(user.gender_id)
        .bind(&user.address)
        .bind(&user.category)
        .bind(user.wages)
        .bind(&user.contact)
        .bind(&user.profile)
        .fetch_one(&mut *tx)
        .await
        .map_err(user_insert_error)?;

        let resume_id: i64 =
            sqlx::query_scalar(r#"INSERT INTO resumes DEFAULT VALUES RETURNING id"#)
                .fetch_one(&mut *tx)
                .await
                .map_err(StoreError::Resume)?;

        sqlx::query(r#"UPDATE users SET resume_id = $1 WHERE id = $2"#)
            .bind(resume_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Link)?;

        tx.commit().await?;

        debug!(user_id, resume_id, "user and resume committed");
        Ok(Registered { user_id, resume_id })
    }
}
