//! Signed Tokens
//!
//! Stateless bearer tokens of the form `base64url(json payload).base64url(hmac)`.
//! The payload is readable by anyone holding the token; only integrity is
//! protected. Expiry and other claim semantics belong to the caller.

use std::fmt;

use hmac::{Hmac, Mac};
use serde::{Serialize, de::DeserializeOwned};
use sha2::Sha256;
use thiserror::Error;

use crate::crypto::{from_base64_url, to_base64_url};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Signing key rejected")]
    InvalidKey,

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Token payload could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Token payload could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

/// HMAC-SHA256 signer for JSON payloads.
#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
}

impl TokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        <HmacSha256 as Mac>::new_from_slice(&self.secret).map_err(|_| TokenError::InvalidKey)
    }

    /// Serialize and sign `payload`.
    pub fn sign<T: Serialize>(&self, payload: &T) -> Result<String, TokenError> {
        let json = serde_json::to_vec(payload).map_err(TokenError::Encode)?;
        let body = to_base64_url(&json);

        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}.{}", body, to_base64_url(&signature)))
    }

    /// Check the signature and decode the payload.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let (body, signature_b64) = token.trim().split_once('.').ok_or(TokenError::Malformed)?;
        if body.is_empty() || signature_b64.contains('.') {
            return Err(TokenError::Malformed);
        }

        let signature = from_base64_url(signature_b64).map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let json = from_base64_url(body).map_err(|_| TokenError::Malformed)?;
        serde_json::from_slice(&json).map_err(TokenError::Decode)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
