//! Route handlers.

pub mod collaborator;
pub mod health;
