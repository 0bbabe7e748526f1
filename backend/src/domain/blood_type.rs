//! ABO/Rh blood types and the donor compatibility table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the eight ABO/Rh blood groups.
///
/// Variants are declared in the lexical order of their codes, so the derived
/// `Ord` sorts the same way a string sort of `"A+"`, `"A-"`, `"AB+"`, ...
/// would.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum BloodType {
    /// `A+`
    #[serde(rename = "A+")]
    APositive,
    /// `A-`
    #[serde(rename = "A-")]
    ANegative,
    /// `AB+`
    #[serde(rename = "AB+")]
    AbPositive,
    /// `AB-`
    #[serde(rename = "AB-")]
    AbNegative,
    /// `B+`
    #[serde(rename = "B+")]
    BPositive,
    /// `B-`
    #[serde(rename = "B-")]
    BNegative,
    /// `O+`
    #[serde(rename = "O+")]
    OPositive,
    /// `O-`
    #[serde(rename = "O-")]
    ONegative,
}

use BloodType::{
    ANegative, APositive, AbNegative, AbPositive, BNegative, BPositive, ONegative, OPositive,
};

/// Error returned when a string is not one of the eight blood type codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood type: {0}")]
pub struct UnknownBloodType(pub String);

impl BloodType {
    /// Every blood type, sorted.
    pub const ALL: [Self; 8] = [
        APositive, ANegative, AbPositive, AbNegative, BPositive, BNegative, OPositive, ONegative,
    ];

    /// Canonical code such as `"AB-"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            APositive => "A+",
            ANegative => "A-",
            AbPositive => "AB+",
            AbNegative => "AB-",
            BPositive => "B+",
            BNegative => "B-",
            OPositive => "O+",
            ONegative => "O-",
        }
    }

    /// Donor types whose blood a recipient of `self` may receive.
    ///
    /// Listed in the order the compatibility chart presents them.
    #[must_use]
    pub const fn compatible_donors(self) -> &'static [Self] {
        match self {
            APositive => &[APositive, ANegative, OPositive, ONegative],
            ANegative => &[ANegative, ONegative],
            BPositive => &[BPositive, BNegative, OPositive, ONegative],
            BNegative => &[BNegative, ONegative],
            AbPositive => &[
                APositive, ANegative, BPositive, BNegative, AbPositive, AbNegative, OPositive,
                ONegative,
            ],
            AbNegative => &[ANegative, BNegative, AbNegative, ONegative],
            OPositive => &[OPositive, ONegative],
            ONegative => &[ONegative],
        }
    }
}

/// Look up compatible donor types for a raw blood type code.
///
/// Codes must match exactly; lowercase or padded input is unknown. Unknown
/// codes yield an empty slice rather than an error.
///
/// # Examples
/// ```
/// use bloodbank::domain::{compatible_donors, BloodType};
///
/// assert_eq!(compatible_donors("O-"), &[BloodType::ONegative]);
/// assert!(compatible_donors("C+").is_empty());
/// assert!(compatible_donors("o-").is_empty());
/// ```
#[must_use]
pub fn compatible_donors(requested: &str) -> &'static [BloodType] {
    BloodType::ALL
        .into_iter()
        .find(|blood_type| blood_type.code() == requested)
        .map_or(&[], BloodType::compatible_donors)
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    /// Parse a code, ignoring surrounding whitespace and letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|blood_type| blood_type.code() == normalised)
            .ok_or_else(|| UnknownBloodType(s.to_owned()))
    }
}
