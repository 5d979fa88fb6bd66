//! # collabhub-entity
//!
//! Domain entity models for CollabHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod grant;
pub mod invitation;
pub mod user;
