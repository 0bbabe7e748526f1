//! Driving port for recording donations and reading them back.

use async_trait::async_trait;

use crate::domain::{Donation, DonationDraft, DonationReceipt, DonationWithDonor, Error, UserId};

/// Driving port for donation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRecorder: Send + Sync {
    /// Store a `completed` donation and credit the inventory with its units.
    ///
    /// The two writes are not transactional. When the credit fails after the
    /// donation is stored, the donation remains and an error is returned.
    async fn record_donation(&self, draft: DonationDraft) -> Result<DonationReceipt, Error>;

    /// The donor's own donations, newest first.
    async fn history_for_donor(&self, donor: UserId) -> Result<Vec<Donation>, Error>;

    /// Every donation with donor name, email, and blood type attached.
    async fn list_all(&self) -> Result<Vec<DonationWithDonor>, Error>;
}
