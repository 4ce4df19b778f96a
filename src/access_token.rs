//! Client-side reading of access tokens issued by the portal backend.
//!
//! Decoding here never checks the signature: the client has no key
//! material and uses the claims only to decide which parts of the portal
//! to offer. Every request is still authorised by the backend, which is
//! the only party that verifies tokens.

mod decoder;
mod data;

pub use decoder::{AccessTokenDecoder, AccessTokenDecoderError};
pub use data::{AccessTokenClaims, AccessTokenData};
