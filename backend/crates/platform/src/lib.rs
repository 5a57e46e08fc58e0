//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations that carry no domain
//! vocabulary:
//! - Password hashing (Argon2id) and verification
//! - Zeroization of clear text secrets

pub mod password;
