use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AccountStore, NewUser, Registered, StoreError, User};

/// A resume row as created at registration: every section reference unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeRow {
    pub id: i64,
    pub personal_id: Option<i64>,
    pub study_id: Option<i64>,
    pub experience_id: Option<i64>,
    pub skill_id: Option<i64>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    resumes: Vec<ResumeRow>,
}

/// In-process store with the same constraints as the Postgres schema:
/// unique emails, known gender ids, and all-or-nothing registration.
pub struct MemoryStore {
    genders: HashSet<i64>,
    tables: Mutex<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Gender ids match the rows seeded by the initial migration.
    pub fn new() -> Self {
        Self::with_genders([1, 2, 3])
    }

    pub fn with_genders(genders: impl IntoIterator<Item = i64>) -> Self {
        Self {
            genders: genders.into_iter().collect(),
            tables: Mutex::new(Tables::default()),
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn resumes(&self) -> Vec<ResumeRow> {
        self.lock().resumes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // Rows are pushed only after every check passes, so poisoned tables are still consistent.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_with_resume(&self, user: NewUser) -> Result<Registered, StoreError> {
        let mut tables = self.lock();

        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }
        if !self.genders.contains(&user.gender_id) {
            return Err(StoreError::Rejected(format!(
                "unknown gender_id {}",
                user.gender_id
            )));
        }

        let user_id = tables.users.len() as i64 + 1;
        let resume_id = tables.resumes.len() as i64 + 1;

        tables.resumes.push(ResumeRow {
            id: resume_id,
            ..ResumeRow::default()
        });
        tables.users.push(User {
            id: user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            age: user.age,
            password_hash: user.password_hash,
            birthday: user.birthday,
            gender_id: user.gender_id,
            address: user.address,
            category: user.category,
            wages: user.wages,
            contact: user.contact,
            profile: user.profile,
            resume_id: Some(resume_id),
        });

        Ok(Registered { user_id, resume_id })
    }
}
