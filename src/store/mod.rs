//! Persistence gateway for users and their resume records.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i16,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string
    #[serde(with = "time::serde::rfc3339")]
    pub birthday: OffsetDateTime,
    pub gender_id: i64,
    pub address: String,
    pub category: String,
    pub wages: i64,
    pub contact: String,
    pub profile: String,
    pub resume_id: Option<i64>,
}

/// Everything needed to insert a user row. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i16,
    pub password_hash: String,
    pub birthday: OffsetDateTime,
    pub gender_id: i64,
    pub address: String,
    pub category: String,
    pub wages: i64,
    pub contact: String,
    pub profile: String,
}

/// Ids produced by a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registered {
    pub user_id: i64,
    pub resume_id: i64,
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// `users.email` unique constraint.
    #[error("email already registered")]
    Conflict,

    /// The user row was refused by the database (bad reference, check constraint).
    #[error("{0}")]
    Rejected(String),

    #[error("create resume: {0}")]
    Resume(#[source] sqlx::Error),

    #[error("link resume: {0}")]
    Link(#[source] sqlx::Error),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Inserts the user, an empty resume, and points the user at the resume.
    /// Either all three writes land or none do.
    async fn create_with_resume(&self, user: NewUser) -> Result<Registered, StoreError>;
}
