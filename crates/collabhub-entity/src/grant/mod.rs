//! Access grant entities (`user_folders` / `user_files` rows).

pub mod access;
pub mod model;

pub use access::AccessType;
pub use model::{Collaborator, Grant, NewGrant, ResourceKind};
