//! User registration and sign-in for the resume board.
//!
//! `POST /signup` creates a user together with an empty resume record,
//! `POST /signin` exchanges email and password for a signed bearer token.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod json;
pub mod state;
pub mod store;

pub use app::{build_app, serve};
pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;
