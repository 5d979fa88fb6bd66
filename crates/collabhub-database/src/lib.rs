//! # collabhub-database
//!
//! The persistence contract the collaborator core is written against
//! ([`store::CollaboratorStore`]), its PostgreSQL implementation, and an
//! in-memory implementation behind the `memory` feature.

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use repositories::PgStore;
pub use store::{CollaboratorStore, GrantQuery};
