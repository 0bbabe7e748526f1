//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between row structs and domain types;
//! row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//! this module. Connections come from a shared `bb8` pool via
//! `diesel-async`.
//!
//! ```ignore
//! use bloodbank::outbound::persistence::{DbPool, DieselInventoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bloodbank")).await?;
//! let inventory = DieselInventoryRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_blood_request_repository;
mod diesel_donation_repository;
mod diesel_inventory_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_blood_request_repository::DieselBloodRequestRepository;
pub use diesel_donation_repository::DieselDonationRepository;
pub use diesel_inventory_repository::DieselInventoryRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
