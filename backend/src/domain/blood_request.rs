//! Blood requests raised by recipients and reviewed by admins.
//!
//! Status changes are deliberately unconstrained: an admin may move a request
//! from any status to any other, including back to `Pending`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{BloodType, UserId, UserSummary};

/// Validation errors raised while building a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BloodRequestValidationError {
    #[error("Please add a location")]
    EmptyLocation,
    #[error("urgency must be one of low, normal, high, critical")]
    UnknownUrgency,
    #[error("status must be one of Pending, Approved, Rejected, Fulfilled")]
    UnknownStatus,
}

/// Where the blood is needed. Trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Validate and construct a [`Location`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BloodRequestValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BloodRequestValidationError::EmptyLocation);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.0
    }
}

impl TryFrom<String> for Location {
    type Error = BloodRequestValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Recipient-declared priority. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Urgency {
    /// Lower-case name used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Urgency {
    type Err = BloodRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(BloodRequestValidationError::UnknownUrgency),
        }
    }
}

/// Review status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Fulfilled,
}

impl RequestStatus {
    /// Capitalised name used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Fulfilled => "Fulfilled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = BloodRequestValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "Fulfilled" => Ok(Self::Fulfilled),
            _ => Err(BloodRequestValidationError::UnknownStatus),
        }
    }
}

/// A recipient's request for blood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub recipient: UserId,
    pub blood_type: BloodType,
    #[schema(value_type = String, example = "City Hospital")]
    pub location: Location,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by a recipient when raising a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloodRequestDraft {
    pub recipient: UserId,
    pub blood_type: BloodType,
    pub location: Location,
    pub urgency: Urgency,
}

/// Request joined with the requester's name and email.
///
/// `recipient` is `None` when the referenced account no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestWithRequester {
    pub id: Uuid,
    pub recipient: Option<UserSummary>,
    pub blood_type: BloodType,
    #[schema(value_type = String)]
    pub location: Location,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl RequestWithRequester {
    /// Attach requester details to a request.
    pub fn new(request: BloodRequest, recipient: Option<UserSummary>) -> Self {
        Self {
            id: request.id,
            recipient,
            blood_type: request.blood_type,
            location: request.location,
            urgency: request.urgency,
            status: request.status,
            created_at: request.created_at,
        }
    }
}
