//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and session token service
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, bearer extractors, router
//!
//! ## Features
//! - Local registration and login with username-or-email + password
//! - Federated (identity provider) upsert with deferred profile setup
//! - Stateless HMAC-signed session tokens carrying a user snapshot
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Token signatures verified in constant time
//! - Login failures are indistinguishable (unknown user vs. wrong password)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use application::session::{IssuedSession, SessionTokenService};
pub use domain::entity::{
    session_claims::SessionClaims,
    user::{FederatedProfile, User},
};
pub use domain::value_object::credential::AuthProvider;
pub use error::{IdentityError, IdentityResult};
pub use infra::{memory::InMemoryIdentityRepository, postgres::PgIdentityRepository};
pub use presentation::extractor::{CurrentUser, MaybeUser};
pub use presentation::router::{identity_router, identity_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
