//! Invitation capability token payload.

pub mod payload;

pub use payload::InvitationPayload;
