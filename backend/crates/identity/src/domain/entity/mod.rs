//! Entity Module

pub mod session_claims;
pub mod user;
