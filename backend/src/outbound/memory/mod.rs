//! In-process repository adapters.
//!
//! These back the server when no database URL is configured and drive the
//! end-to-end HTTP tests. State lives for the lifetime of the process.

mod blood_requests;
mod donations;
mod inventory;
mod users;

pub use blood_requests::MemoryBloodRequestRepository;
pub use donations::MemoryDonationRepository;
pub use inventory::MemoryInventoryRepository;
pub use users::MemoryUserRepository;
