//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Base64 helpers and random secrets
//! - Password hashing (Argon2id)
//! - HMAC-signed bearer tokens

pub mod crypto;
pub mod password;
pub mod token;
