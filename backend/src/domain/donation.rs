//! Donation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{BloodType, InventoryRecord, Units, UserId, UserSummary};

/// Screening outcome of a donation. Recorded donations start `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    #[default]
    Completed,
    Rejected,
}

impl DonationStatus {
    /// Lower-case name used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Parse the stored representation.
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A recorded blood donation. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub donor: UserId,
    pub blood_type: BloodType,
    pub donation_date: DateTime<Utc>,
    #[schema(value_type = u32, minimum = 1)]
    pub quantity: Units,
    pub status: DonationStatus,
}

/// Fields supplied by a donor when recording a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationDraft {
    pub donor: UserId,
    pub blood_type: BloodType,
    pub donation_date: Option<DateTime<Utc>>,
    pub quantity: Units,
}

/// Outcome of recording a donation: the stored record and the credited stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DonationReceipt {
    pub donation: Donation,
    pub inventory: InventoryRecord,
}

/// Donation joined with the donor's contact details for admin listings.
///
/// `donor` is `None` when the referenced account no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationWithDonor {
    pub id: Uuid,
    pub donor: Option<UserSummary>,
    pub blood_type: BloodType,
    pub donation_date: DateTime<Utc>,
    #[schema(value_type = u32, minimum = 1)]
    pub quantity: Units,
    pub status: DonationStatus,
}

impl DonationWithDonor {
    /// Attach donor details to a donation.
    pub fn new(donation: Donation, donor: Option<UserSummary>) -> Self {
        Self {
            id: donation.id,
            donor,
            blood_type: donation.blood_type,
            donation_date: donation.donation_date,
            quantity: donation.quantity,
            status: donation.status,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DonationStatus::Pending)]
    #[case(DonationStatus::Completed)]
    #[case(DonationStatus::Rejected)]
    fn stored_status_round_trips(#[case] status: DonationStatus) {
        assert_eq!(DonationStatus::from_stored(status.as_str()), Some(status));
    }

    #[rstest]
    fn default_status_is_completed() {
        assert_eq!(DonationStatus::default(), DonationStatus::Completed);
    }

    #[rstest]
    fn donation_serialises_in_camel_case() {
        let donation = Donation {
            id: Uuid::nil(),
            donor: UserId::from_uuid(Uuid::nil()),
            blood_type: BloodType::APositive,
            donation_date: DateTime::<Utc>::UNIX_EPOCH,
            quantity: Units::ONE,
            status: DonationStatus::Completed,
        };
        let value = serde_json::to_value(&donation).expect("serialise donation");
        assert_eq!(value["bloodType"], "A+");
        assert_eq!(value["donationDate"], "1970-01-01T00:00:00Z");
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["status"], "completed");
    }
}
