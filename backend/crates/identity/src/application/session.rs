//! Session Tokens
//!
//! Issues and verifies the signed claim snapshot handed to clients.

use chrono::Utc;
use platform::token::TokenSigner;

use crate::application::config::IdentityConfig;
use crate::domain::entity::{session_claims::SessionClaims, user::User};
use crate::error::{IdentityError, IdentityResult};

/// Token plus the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

/// Stateless session token service
#[derive(Debug, Clone)]
pub struct SessionTokenService {
    signer: TokenSigner,
    ttl_ms: i64,
}

impl SessionTokenService {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            signer: TokenSigner::new(config.token_secret),
            ttl_ms: config.token_ttl_ms(),
        }
    }

    /// Snapshot the user into claims and sign them
    pub fn issue(&self, user: &User) -> IdentityResult<IssuedSession> {
        self.issue_at(user, Utc::now().timestamp_millis())
    }

    pub fn issue_at(&self, user: &User, now_ms: i64) -> IdentityResult<IssuedSession> {
        let claims = SessionClaims::for_user(user, now_ms, self.ttl_ms);
        let token = self.signer.sign(&claims)?;
        Ok(IssuedSession { token, claims })
    }

    /// Verify signature and expiry
    pub fn verify(&self, token: &str) -> IdentityResult<SessionClaims> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    pub fn verify_at(&self, token: &str, now_ms: i64) -> IdentityResult<SessionClaims> {
        let claims: SessionClaims = self.signer.verify(token)?;
        if claims.is_expired(now_ms) {
            return Err(IdentityError::TokenExpired);
        }
        Ok(claims)
    }
}
