//! Domain Services

pub mod comment_thread;
