//! Domain Layer
//!
//! Contains entities, value objects, the authorization guard, domain
//! services and repository traits.

pub mod entity;
pub mod guard;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{comment::Comment, post::Post};
pub use guard::Actor;
pub use repository::{CommentRepository, PostRepository};
