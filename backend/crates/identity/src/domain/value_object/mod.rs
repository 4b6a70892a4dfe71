//! Value Object Module

pub mod credential;
pub mod display_name;
pub mod email;
pub mod user_name;
pub mod user_password;
