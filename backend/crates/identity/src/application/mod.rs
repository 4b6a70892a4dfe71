//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate_local;
pub mod config;
pub mod register_local;
pub mod resolve_federated;
pub mod session;
pub mod update_profile;

// Re-exports
pub use authenticate_local::{AuthenticateLocalInput, AuthenticateLocalUseCase};
pub use config::IdentityConfig;
pub use register_local::{RegisterLocalInput, RegisterLocalUseCase};
pub use resolve_federated::ResolveFederatedUseCase;
pub use session::{IssuedSession, SessionTokenService};
pub use update_profile::UpdateProfileUseCase;
