//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::{AuthUser, OptionalAuthUser};
pub use json::ValidJson;
