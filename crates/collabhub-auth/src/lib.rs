//! # collabhub-auth
//!
//! Authentication and capability tokens for CollabHub.
//!
//! ## Modules
//!
//! - `jwt`: bearer token creation and validation
//! - `token`: symmetric sealing of JSON payloads and invitation tokens

pub mod jwt;
pub mod token;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use token::{InvitationCodec, TokenCodec};
