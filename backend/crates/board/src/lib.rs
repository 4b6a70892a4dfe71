//! Board Backend Module
//!
//! Posts, threaded comments and likes of the travel-log community.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, authorization guard, thread service, repository traits
//! - `application/` - One use case per operation
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Paginated feed with search, category/author filters and latest/popular sort
//! - Post and comment CRUD restricted to the author
//! - Threaded replies; deleting a comment removes its whole subtree
//! - Idempotent like/unlike on posts and comments
//!
//! ## Behaviour worth knowing
//! - Author name and avatar are snapshotted at creation and never refreshed
//! - Deleting a post leaves its comments in place

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

mod tests;

// Re-exports for convenience
pub use application::config::BoardConfig;
pub use domain::entity::{comment::Comment, post::Post};
pub use domain::guard::Actor;
pub use error::{BoardError, BoardResult};
pub use infra::{memory::InMemoryBoardRepository, postgres::PgBoardRepository};
pub use presentation::router::{board_router, board_router_generic};
