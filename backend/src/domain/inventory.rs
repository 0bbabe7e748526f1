//! Blood stock records and the unit quantities that move them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::BloodType;

/// Validation errors for unit quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnitsValidationError {
    #[error("units must be at least 1, got {0}")]
    NotPositive(i64),
    #[error("units must be at most {max}, got {got}")]
    TooLarge { got: i64, max: u32 },
}

/// A strictly positive number of blood units.
///
/// # Examples
/// ```
/// use bloodbank::domain::Units;
///
/// assert_eq!(Units::new(3).unwrap().get(), 3);
/// assert!(Units::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Units(u32);

impl Units {
    /// Upper bound for a single movement; keeps stock inside a Postgres `INTEGER`.
    pub const MAX: u32 = i32::MAX.unsigned_abs();

    /// One unit, the default donation size.
    pub const ONE: Self = Self(1);

    /// Validate a raw quantity.
    pub fn new(raw: i64) -> Result<Self, UnitsValidationError> {
        if raw < 1 {
            return Err(UnitsValidationError::NotPositive(raw));
        }
        u32::try_from(raw)
            .ok()
            .filter(|value| *value <= Self::MAX)
            .map(Self)
            .ok_or(UnitsValidationError::TooLarge {
                got: raw,
                max: Self::MAX,
            })
    }

    /// The raw count.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for Units {
    type Error = UnitsValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Units> for u32 {
    fn from(value: Units) -> Self {
        value.0
    }
}

/// Stock held for one blood type.
///
/// ## Invariants
/// - `quantity` never drops below zero; decrements that would overdraw are
///   refused rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub blood_type: BloodType,
    pub quantity: u32,
}

impl InventoryRecord {
    /// An empty record for `blood_type`.
    pub const fn empty(blood_type: BloodType) -> Self {
        Self {
            blood_type,
            quantity: 0,
        }
    }
}

/// Direction of a manual stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    Increase,
    Decrease,
}

/// Returned when an adjustment names neither `increase` nor `decrease`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stock action: {0}")]
pub struct UnknownStockAction(pub String);

impl FromStr for StockAction {
    type Err = UnknownStockAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            _ => Err(UnknownStockAction(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn rejects_non_positive_units(#[case] raw: i64) {
        assert_eq!(Units::new(raw), Err(UnitsValidationError::NotPositive(raw)));
    }

    #[rstest]
    fn rejects_units_beyond_storage_range() {
        let raw = i64::from(Units::MAX) + 1;
        assert!(matches!(
            Units::new(raw),
            Err(UnitsValidationError::TooLarge { .. })
        ));
    }

    #[rstest]
    fn units_deserialise_from_json_numbers() {
        let units: Units = serde_json::from_str("5").expect("valid units");
        assert_eq!(units.get(), 5);
        assert!(serde_json::from_str::<Units>("0").is_err());
    }

    #[rstest]
    fn record_serialises_in_camel_case() {
        let record = InventoryRecord {
            blood_type: BloodType::ONegative,
            quantity: 3,
        };
        let value = serde_json::to_value(record).expect("serialise record");
        assert_eq!(value, serde_json::json!({ "bloodType": "O-", "quantity": 3 }));
    }

    #[rstest]
    fn stock_action_uses_lowercase_names() {
        let action: StockAction = serde_json::from_str("\"decrease\"").expect("valid action");
        assert_eq!("Increase".parse::<StockAction>(), Ok(StockAction::Increase));
        assert!("drain".parse::<StockAction>().is_err());
        assert_eq!(action, StockAction::Decrease);
    }
}
