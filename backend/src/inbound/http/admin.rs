//! Admin handlers: request review, user and donation listings.
//!
//! ```text
//! GET /api/admin/requests
//! PUT /api/admin/request/status {"requestId":"...","status":"Approved"}
//! GET /api/admin/users
//! GET /api/admin/donations
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DonationWithDonor, Operation, RequestStatus, RequestWithRequester, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_keyword, parse_uuid, require};

const REQUEST_ID: FieldName = FieldName::new("requestId");
const STATUS: FieldName = FieldName::new("status");

/// Status change body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub request_id: Option<String>,
    #[schema(example = "Approved")]
    pub status: Option<String>,
}

/// Pending requests, newest first, with requester name and email.
#[utoipa::path(
    get,
    path = "/api/admin/requests",
    responses(
        (status = 200, description = "Pending requests", body = Envelope<Vec<RequestWithRequester>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listPendingRequests"
)]
#[get("/admin/requests")]
pub async fn pending_requests(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Envelope<Vec<RequestWithRequester>>>> {
    caller.authorize(Operation::ListPending)?;
    let pending = state.requests.list_pending().await?;
    Ok(web::Json(Envelope::list(pending)))
}

/// Move a request to any status.
#[utoipa::path(
    put,
    path = "/api/admin/request/status",
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = Envelope<RequestWithRequester>),
        (status = 400, description = "Invalid status change", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "setRequestStatus"
)]
#[put("/admin/request/status")]
pub async fn set_request_status(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<Envelope<RequestWithRequester>>> {
    caller.authorize(Operation::SetStatus)?;
    let body = payload.into_inner();
    let request_id = parse_uuid(require(body.request_id.as_deref(), REQUEST_ID)?, REQUEST_ID)?;
    let status = parse_keyword::<RequestStatus>(
        require(body.status.as_deref(), STATUS)?,
        STATUS,
        "Pending, Approved, Rejected, Fulfilled",
    )?;

    let updated = state.requests.set_status(request_id, status).await?;
    Ok(web::Json(Envelope::data(updated)))
}

/// Every registered user, without password hashes.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Users", body = Envelope<Vec<User>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn users(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Envelope<Vec<User>>>> {
    caller.authorize(Operation::ListUsers)?;
    let users = state.accounts.list_users().await?;
    Ok(web::Json(Envelope::list(users)))
}

/// Every donation with donor details attached.
#[utoipa::path(
    get,
    path = "/api/admin/donations",
    responses(
        (status = 200, description = "Donations", body = Envelope<Vec<DonationWithDonor>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listDonations"
)]
#[get("/admin/donations")]
pub async fn donations(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Envelope<Vec<DonationWithDonor>>>> {
    caller.authorize(Operation::ListDonations)?;
    let donations = state.donations.list_all().await?;
    Ok(web::Json(Envelope::list(donations)))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
