//! Bearer token handling for roster.
//!
//! Tokens are HS256 JWTs signed with a single shared secret. They carry the
//! subject's id, email and admin flag and are stateless: there is no
//! revocation list, and a token without an `exp` claim never expires.
//!
//! The secret is handed to [`TokenCodec::new`] once at startup; nothing in
//! this crate reads it from the environment.

pub mod claims;
pub mod codec;
pub mod error;

pub use claims::TokenClaims;
pub use codec::TokenCodec;
pub use error::TokenError;
