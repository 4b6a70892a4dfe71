//! Application Configuration
//!
//! Configuration for the Board application layer.

/// Board application configuration
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Posts per feed page; server-owned, never taken from the client
    pub page_size: u32,
    /// Maximum comment length in characters
    pub max_comment_length: usize,
    /// Maximum post title length in characters
    pub max_title_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: 6,
            max_comment_length: 1000,
            max_title_length: 200,
        }
    }
}
