//! Row structs for the Diesel repositories and their domain conversions.
//!
//! Stored enums are plain strings; decoding a row re-validates them so a
//! hand-edited database cannot smuggle invalid values into the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{blood_inventory, blood_requests, donations, users};
use crate::domain::{
    BloodRequest, BloodType, Donation, DonationStatus, EmailAddress, InventoryRecord, Location,
    PasswordHash, RequestStatus, Units, Urgency, User, UserAccount, UserId, UserName,
};

/// A stored row that no longer satisfies the domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {column} in stored row: {message}")]
pub(crate) struct RowDecodeError {
    column: &'static str,
    message: String,
}

impl RowDecodeError {
    fn new(column: &'static str, message: impl ToString) -> Self {
        Self {
            column,
            message: message.to_string(),
        }
    }
}

fn blood_type(raw: &str) -> Result<BloodType, RowDecodeError> {
    raw.parse()
        .map_err(|err| RowDecodeError::new("blood_type", err))
}

fn units(raw: i32) -> Result<Units, RowDecodeError> {
    Units::new(i64::from(raw)).map_err(|err| RowDecodeError::new("quantity", err))
}

/// Convert units to the `INTEGER` column type.
pub(crate) fn units_column(units: Units) -> i32 {
    // Units::MAX equals i32::MAX.
    i32::try_from(units.get()).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub blood_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, RowDecodeError> {
        Ok(self.into_account()?.user)
    }

    pub(crate) fn into_account(self) -> Result<UserAccount, RowDecodeError> {
        let user = User {
            id: UserId::from_uuid(self.id),
            name: UserName::new(&self.name).map_err(|err| RowDecodeError::new("name", err))?,
            email: EmailAddress::new(&self.email)
                .map_err(|err| RowDecodeError::new("email", err))?,
            role: self
                .role
                .parse()
                .map_err(|err| RowDecodeError::new("role", err))?,
            blood_type: self.blood_type.as_deref().map(blood_type).transpose()?,
            created_at: self.created_at,
        };
        Ok(UserAccount {
            user,
            password_hash: PasswordHash::new(self.password_hash),
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub blood_type: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        let user = &account.user;
        Self {
            id: *user.id.as_uuid(),
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            password_hash: account.password_hash.as_ref(),
            role: user.role.as_str(),
            blood_type: user.blood_type.map(BloodType::code),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = blood_inventory)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InventoryRow {
    pub blood_type: String,
    pub quantity: i32,
}

impl InventoryRow {
    pub(crate) fn empty(blood_type: BloodType) -> Self {
        Self {
            blood_type: blood_type.code().to_owned(),
            quantity: 0,
        }
    }

    pub(crate) fn into_record(self) -> Result<InventoryRecord, RowDecodeError> {
        Ok(InventoryRecord {
            blood_type: blood_type(&self.blood_type)?,
            quantity: u32::try_from(self.quantity)
                .map_err(|err| RowDecodeError::new("quantity", err))?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonationRow {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub blood_type: String,
    pub donation_date: DateTime<Utc>,
    pub quantity: i32,
    pub status: String,
}

impl DonationRow {
    pub(crate) fn into_donation(self) -> Result<Donation, RowDecodeError> {
        Ok(Donation {
            id: self.id,
            donor: UserId::from_uuid(self.donor_id),
            blood_type: blood_type(&self.blood_type)?,
            donation_date: self.donation_date,
            quantity: units(self.quantity)?,
            status: DonationStatus::from_stored(&self.status)
                .ok_or_else(|| RowDecodeError::new("status", &self.status))?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = donations)]
pub(crate) struct NewDonationRow<'a> {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub blood_type: &'a str,
    pub donation_date: DateTime<Utc>,
    pub quantity: i32,
    pub status: &'a str,
}

impl<'a> From<&'a Donation> for NewDonationRow<'a> {
    fn from(donation: &'a Donation) -> Self {
        Self {
            id: donation.id,
            donor_id: *donation.donor.as_uuid(),
            blood_type: donation.blood_type.code(),
            donation_date: donation.donation_date,
            quantity: units_column(donation.quantity),
            status: donation.status.as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blood_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BloodRequestRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub blood_type: String,
    pub location: String,
    pub urgency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BloodRequestRow {
    pub(crate) fn into_request(self) -> Result<BloodRequest, RowDecodeError> {
        Ok(BloodRequest {
            id: self.id,
            recipient: UserId::from_uuid(self.recipient_id),
            blood_type: blood_type(&self.blood_type)?,
            location: Location::new(&self.location)
                .map_err(|err| RowDecodeError::new("location", err))?,
            urgency: self
                .urgency
                .parse::<Urgency>()
                .map_err(|err| RowDecodeError::new("urgency", err))?,
            status: self
                .status
                .parse::<RequestStatus>()
                .map_err(|err| RowDecodeError::new("status", err))?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = blood_requests)]
pub(crate) struct NewBloodRequestRow<'a> {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub blood_type: &'a str,
    pub location: &'a str,
    pub urgency: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a BloodRequest> for NewBloodRequestRow<'a> {
    fn from(request: &'a BloodRequest) -> Self {
        Self {
            id: request.id,
            recipient_id: *request.recipient.as_uuid(),
            blood_type: request.blood_type.code(),
            location: request.location.as_ref(),
            urgency: request.urgency.as_str(),
            status: request.status.as_str(),
            created_at: request.created_at,
        }
    }
}
