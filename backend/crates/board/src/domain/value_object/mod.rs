//! Value Object Module

pub mod author;
pub mod feed_query;
pub mod like_set;
pub mod text;
