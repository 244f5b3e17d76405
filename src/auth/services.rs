use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use crate::{
    auth::{
        dto::{SignInRequest, SignInResponse, SignUpRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::{AppError, AppResult},
    store::{AccountStore, NewUser, Registered},
};

/// Shape check only; the address is stored exactly as submitted.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Columns are BIGINT; values past `i64::MAX` cannot be stored.
fn to_column(field: &str, value: u64) -> AppResult<i64> {
    i64::try_from(value).map_err(|_| AppError::BadRequest(format!("{field} is out of range")))
}

pub async fn register(store: &dyn AccountStore, payload: SignUpRequest) -> AppResult<Registered> {
    let email = payload.email;
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    let gender_id = to_column("gender_id", payload.gender_id)?;
    let wages = to_column("wages", payload.wages)?;

    // Early exit only; the unique constraint decides under concurrent sign-ups.
    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email is already registered".into()));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal("Failed to hash password")
    })?;

    let registered = store
        .create_with_resume(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: email.clone(),
            age: i16::from(payload.age),
            password_hash,
            birthday: payload.birthday,
            gender_id,
            address: payload.address,
            category: payload.category,
            wages,
            contact: payload.contact,
            profile: payload.profile,
        })
        .await
        .map_err(|e| {
            warn!(email = %email, error = %e, "create user failed");
            AppError::from(e)
        })?;

    info!(
        user_id = registered.user_id,
        resume_id = registered.resume_id,
        email = %email,
        "user registered"
    );
    Ok(registered)
}

pub async fn authenticate(
    store: &dyn AccountStore,
    keys: &JwtKeys,
    payload: SignInRequest,
) -> AppResult<SignInResponse> {
    let Some(user) = store.find_by_email(&payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(AppError::Unauthorized);
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = user.id, "verify_password failed");
        AppError::Internal("Failed to verify password")
    })?;
    if !ok {
        warn!(email = %payload.email, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    let token = keys.sign(&user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AppError::Internal("error signing token")
    })?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(SignInResponse {
        token_type: "Bearer",
        token,
        id: user.id,
        resume_id: user.resume_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::JwtConfig, store::MemoryStore};
    use time::macros::datetime;

    fn signup(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            first_name: "Somchai".into(),
            last_name: "Jaidee".into(),
            email: email.into(),
            age: 30,
            password: password.into(),
            birthday: datetime!(1994-05-01 0:00 UTC),
            gender_id: 1,
            address: "Bangkok".into(),
            category: "IT".into(),
            wages: 25000,
            contact: "0812345678".into(),
            profile: String::new(),
        }
    }

    fn signin(email: &str, password: &str) -> SignInRequest {
        SignInRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    fn keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "unit-test-secret".into(),
            issuer: "AuthService".into(),
            ttl_hours: 24,
        })
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("Alice@X.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("not an email"));
    }

    #[tokio::test]
    async fn register_stores_email_as_submitted_and_hash_not_plaintext() {
        let store = MemoryStore::new();
        let ids = register(&store, signup("Alice@X.com", "p1")).await.expect("register");
        let users = store.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "Alice@X.com");
        assert_ne!(users[0].password_hash, "p1");
        assert_eq!(users[0].resume_id, Some(ids.resume_id));
    }

    #[tokio::test]
    async fn register_twice_conflicts() {
        let store = MemoryStore::new();
        register(&store, signup("a@x.com", "p1")).await.unwrap();
        let err = register(&store, signup("a@x.com", "p2")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn differently_cased_emails_are_distinct_accounts() {
        let store = MemoryStore::new();
        register(&store, signup("Alice@X.com", "p1")).await.unwrap();
        register(&store, signup("alice@x.com", "p2")).await.unwrap();
        assert_eq!(store.users().len(), 2);
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let store = MemoryStore::new();
        let err = register(&store, signup("nope", "p1")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(store.users().is_empty());
    }

    #[tokio::test]
    async fn wages_beyond_u32_are_accepted() {
        let store = MemoryStore::new();
        let mut req = signup("rich@x.com", "p1");
        req.wages = 5_000_000_000;
        register(&store, req).await.expect("register");
        assert_eq!(store.users()[0].wages, 5_000_000_000);
    }

    #[tokio::test]
    async fn wages_beyond_bigint_are_rejected() {
        let store = MemoryStore::new();
        let mut req = signup("richer@x.com", "p1");
        req.wages = u64::MAX;
        let err = register(&store, req).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("wages")));
        assert!(store.users().is_empty());
    }

    #[tokio::test]
    async fn authenticate_issues_token_for_submitted_email() {
        let store = MemoryStore::new();
        let ids = register(&store, signup("Alice@X.com", "p1")).await.unwrap();
        let keys = keys();
        let res = authenticate(&store, &keys, signin("Alice@X.com", "p1"))
            .await
            .expect("login");
        assert_eq!(res.token_type, "Bearer");
        assert_eq!(res.id, ids.user_id);
        assert_eq!(res.resume_id, Some(ids.resume_id));
        assert_eq!(keys.verify(&res.token).unwrap().sub, "Alice@X.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = MemoryStore::new();
        register(&store, signup("a@x.com", "p1")).await.unwrap();
        let keys = keys();

        let wrong = authenticate(&store, &keys, signin("a@x.com", "wrong")).await.unwrap_err();
        let unknown = authenticate(&store, &keys, signin("b@x.com", "p1")).await.unwrap_err();
        assert!(matches!(wrong, AppError::Unauthorized));
        assert!(matches!(unknown, AppError::Unauthorized));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }
}
