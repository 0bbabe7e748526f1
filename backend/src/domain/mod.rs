//! Domain primitives, services, and ports.
//!
//! Purpose: hold the blood-bank rules independently of HTTP and storage.
//! Inbound adapters call the driving ports in [`ports`]; outbound adapters
//! implement the driven ports.
//!
//! Public surface:
//! - `BloodType` and `compatible_donors`: the compatibility table.
//! - `InventoryLedgerService`: stock accounting over an inventory repository.
//! - `DonationRecorderService`: donation recording and listings.
//! - `RequestWorkflowService`: request creation and status review.
//! - `AccountsService`: registration, login, and token checks.
//! - `authorize`: the role-based access policy.
//! - `Error` / `ErrorCode`: transport-agnostic failures.

pub mod access;
pub mod accounts_service;
pub mod auth;
pub mod blood_request;
pub mod blood_type;
pub mod donation;
pub mod donation_service;
pub mod error;
pub mod inventory;
pub mod inventory_service;
pub mod ports;
pub mod request_workflow_service;
pub mod trace_id;
pub mod user;

pub use self::access::{Operation, authorize, permits};
pub use self::accounts_service::AccountsService;
pub use self::auth::{
    AccessToken, AuthSession, CredentialsValidationError, Identity, LoginCredentials,
    PASSWORD_MIN, PasswordHash, Registration, RegistrationParts,
};
pub use self::blood_request::{
    BloodRequest, BloodRequestDraft, BloodRequestValidationError, Location, RequestStatus,
    RequestWithRequester, Urgency,
};
pub use self::blood_type::{BloodType, UnknownBloodType, compatible_donors};
pub use self::donation::{
    Donation, DonationDraft, DonationReceipt, DonationStatus, DonationWithDonor,
};
pub use self::donation_service::DonationRecorderService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inventory::{
    InventoryRecord, StockAction, Units, UnitsValidationError, UnknownStockAction,
};
pub use self::inventory_service::InventoryLedgerService;
pub use self::request_workflow_service::RequestWorkflowService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, Role, USER_NAME_MAX, User, UserAccount, UserId, UserName, UserSummary,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bloodbank::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
