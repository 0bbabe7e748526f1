//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process repositories for development and tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **security**: Argon2 password hashing and HMAC-signed bearer tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
