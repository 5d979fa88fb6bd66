//! # collabhub-api
//!
//! HTTP API layer for CollabHub built on Axum.
//!
//! Provides the collaborator endpoints, bearer-token extractors, request
//! logging and CORS middleware, DTOs, and the single mapping from
//! `AppError` to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
