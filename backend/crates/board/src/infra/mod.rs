//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBoardRepository;
pub use postgres::PgBoardRepository;
