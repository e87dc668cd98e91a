//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Environment-driven configuration helpers
//! - Session cookie policy (issuance and removal from one attribute set)
//! - Secret generation for development setups

pub mod config;
pub mod cookie;
pub mod crypto;
