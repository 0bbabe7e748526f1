//! Role-based access policy.
//!
//! Every guarded route names the [`Operation`] it performs. [`authorize`]
//! rejects a missing identity before the role is consulted, so callers see
//! `401` for absent or invalid tokens and `403` only for authenticated users
//! whose role lacks the operation.

use super::{Error, Identity, Role};

/// Operations guarded by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RecordDonation,
    GetOwnDonationHistory,
    ReadInventory,
    CheckCompatibility,
    CreateRequest,
    GetOwnRequestHistory,
    ListPending,
    SetStatus,
    ListUsers,
    ListDonations,
}

/// Returns whether `role` may perform `operation`.
///
/// # Examples
/// ```
/// use bloodbank::domain::{permits, Operation, Role};
///
/// assert!(permits(Role::Donor, Operation::RecordDonation));
/// assert!(!permits(Role::Recipient, Operation::RecordDonation));
/// ```
pub const fn permits(role: Role, operation: Operation) -> bool {
    use Operation as Op;
    match operation {
        Op::ReadInventory | Op::CheckCompatibility => true,
        Op::RecordDonation | Op::GetOwnDonationHistory => matches!(role, Role::Donor),
        Op::CreateRequest | Op::GetOwnRequestHistory => matches!(role, Role::Recipient),
        Op::ListPending | Op::SetStatus | Op::ListUsers | Op::ListDonations => {
            matches!(role, Role::Admin)
        }
    }
}

/// Check an optional caller identity against the policy.
pub fn authorize(identity: Option<&Identity>, operation: Operation) -> Result<Identity, Error> {
    let identity =
        identity.ok_or_else(|| Error::unauthorized("Not authorized to access this route"))?;
    if permits(identity.role, operation) {
        Ok(*identity)
    } else {
        Err(Error::forbidden(format!(
            "User role {} is not authorized to access this route",
            identity.role
        )))
    }
}
