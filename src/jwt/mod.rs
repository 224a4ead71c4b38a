//! Token claim decoding.
//!
//! Pure verification utility: checks an asymmetric signature, rejects
//! unexpected signing algorithms, and enforces expiry at decode time.

pub mod claims;
pub mod decoder;

pub use claims::TokenClaims;
pub use decoder::{TokenError, decode_claims};
