//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field-level failures become `invalid_request` errors whose details name
//! the offending field, so clients can highlight it.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{BloodType, Error, Units};

/// Detail codes for field validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidBloodType,
    InvalidUnits,
    InvalidValue,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidBloodType => "invalid_blood_type",
            Self::InvalidUnits => "invalid_units",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// Build an `invalid_request` error naming `field`.
pub(crate) fn field_error(
    field: FieldName,
    message: impl Into<String>,
    code: FieldErrorCode,
    value: Option<&str>,
) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "value": value, "code": code.as_str() }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        FieldErrorCode::MissingField,
        None,
    )
}

/// Unwrap a required field, reporting it as missing when absent.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        field_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            FieldErrorCode::InvalidUuid,
            Some(value),
        )
    })
}

pub(crate) fn parse_blood_type(value: &str, field: FieldName) -> Result<BloodType, Error> {
    value.parse().map_err(|_| {
        field_error(
            field,
            format!(
                "{} must be one of A+, A-, B+, B-, AB+, AB-, O+, O-",
                field.as_str()
            ),
            FieldErrorCode::InvalidBloodType,
            Some(value),
        )
    })
}

pub(crate) fn parse_units(value: i64, field: FieldName) -> Result<Units, Error> {
    Units::new(value).map_err(|err| {
        field_error(
            field,
            format!("{} {err}", field.as_str()),
            FieldErrorCode::InvalidUnits,
            Some(&value.to_string()),
        )
    })
}

/// Parse a keyword such as an urgency or status, listing accepted values on
/// failure.
pub(crate) fn parse_keyword<T: FromStr>(
    value: &str,
    field: FieldName,
    accepted: &str,
) -> Result<T, Error> {
    value.parse().map_err(|_| {
        field_error(
            field,
            format!("{} must be one of {accepted}", field.as_str()),
            FieldErrorCode::InvalidValue,
            Some(value),
        )
    })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| {
                    field_error(
                        field,
                        format!("{} must be an RFC 3339 timestamp", field.as_str()),
                        FieldErrorCode::InvalidTimestamp,
                        Some(raw),
                    )
                })
        })
        .transpose()
}
