//! Narrow JWT payload extraction for the brokers.
//!
//! [`extract_payload`] reads the claims out of a compact JWT **without
//! verifying its signature**. Verification is a separate concern behind the
//! [`TokenVerifier`] trait; wiring it is the caller's responsibility, so a
//! deployment that needs it can never lose it to a silent default.

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use thiserror::Error;

use crate::token::model::TokenPayload;

pub mod model;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing token part")]
    MissingPart,
    #[error("Could not decode payload: `{0}`")]
    Decode(String),
    #[error("Could not verify token: `{0}`")]
    Verification(String),
}

/// Signature verification seam for stored and presented tokens.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<(), TokenError>;
}

/// Extracts the payload claims of a compact JWT. Accepts signed
/// (three-part) and unsigned (two-part) serializations; the signature, when
/// present, is ignored.
pub fn extract_payload(token: &str) -> Result<TokenPayload, TokenError> {
    let token = token.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let mut parts = token.splitn(3, '.');

    let (Some(_header), Some(payload)) = (parts.next(), parts.next()) else {
        return Err(TokenError::MissingPart);
    };

    let decoded = Base64UrlSafeNoPadding::decode_to_vec(payload, None)
        .map_err(|e| TokenError::Decode(e.to_string()))?;

    serde_json::from_slice(&decoded).map_err(|e| TokenError::Decode(e.to_string()))
}
