//! Symmetric capability tokens.

pub mod codec;
pub mod invitation;

pub use codec::TokenCodec;
pub use invitation::{INVALID_TOKEN_MESSAGE, InvitationCodec};
