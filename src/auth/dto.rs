use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request body for `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u8,
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub birthday: OffsetDateTime,
    pub gender_id: u64,
    pub address: String,
    pub category: String,
    pub wages: u64,
    pub contact: String,
    #[serde(default)]
    pub profile: String,
}

/// Request body for `POST /signin`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: &'static str,
    pub resume_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token_type: &'static str,
    pub token: String,
    pub id: i64,
    pub resume_id: Option<i64>,
}

/// Public part of the user returned by `GET /me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i16,
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
