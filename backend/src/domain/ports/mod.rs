//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, password hashing, token signing) are
//! implemented by outbound adapters. Driving ports are implemented by the
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod blood_request_repository;
mod donation_recorder;
mod donation_repository;
mod inventory_ledger;
mod inventory_repository;
mod password_hasher;
mod request_workflow;
mod token_issuer;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use blood_request_repository::MockBloodRequestRepository;
pub use blood_request_repository::{
    BloodRequestRepository, BloodRequestRepositoryError, FixtureBloodRequestRepository,
};
#[cfg(test)]
pub use donation_recorder::MockDonationRecorder;
pub use donation_recorder::DonationRecorder;
#[cfg(test)]
pub use donation_repository::MockDonationRepository;
pub use donation_repository::{
    DonationRepository, DonationRepositoryError, FixtureDonationRepository,
};
#[cfg(test)]
pub use inventory_ledger::MockInventoryLedger;
pub use inventory_ledger::InventoryLedger;
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
pub use inventory_repository::{
    FixtureInventoryRepository, InventoryRepository, InventoryRepositoryError,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use request_workflow::MockRequestWorkflow;
pub use request_workflow::RequestWorkflow;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenIssuer, TokenIssuerError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
