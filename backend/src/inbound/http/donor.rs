//! Donor handlers.
//!
//! ```text
//! POST /api/donor/donate {"bloodType":"A+","quantity":2}
//! GET /api/donor/history
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Donation, DonationDraft, DonationReceipt, Operation, Units};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_blood_type, parse_optional_rfc3339_timestamp, parse_units, require,
};

const BLOOD_TYPE: FieldName = FieldName::new("bloodType");
const DONATION_DATE: FieldName = FieldName::new("donationDate");
const QUANTITY: FieldName = FieldName::new("quantity");

/// Donation body. `donationDate` defaults to now and `quantity` to one unit.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonateRequest {
    #[schema(example = "A+")]
    pub blood_type: Option<String>,
    #[schema(example = "2026-05-01T09:30:00Z")]
    pub donation_date: Option<String>,
    #[schema(example = 1, minimum = 1)]
    pub quantity: Option<i64>,
}

/// Record a donation and credit the inventory with its units.
#[utoipa::path(
    post,
    path = "/api/donor/donate",
    request_body = DonateRequest,
    responses(
        (status = 201, description = "Donation recorded", body = Envelope<DonationReceipt>),
        (status = 400, description = "Invalid donation", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not a donor", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["donor"],
    operation_id = "recordDonation"
)]
#[post("/donor/donate")]
pub async fn donate(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<DonateRequest>,
) -> ApiResult<HttpResponse> {
    let identity = caller.authorize(Operation::RecordDonation)?;
    let body = payload.into_inner();

    let raw_type = require(body.blood_type.as_deref(), BLOOD_TYPE)?;
    let donation_date =
        parse_optional_rfc3339_timestamp(body.donation_date.as_deref(), DONATION_DATE)?;
    let quantity = match body.quantity {
        Some(raw) => parse_units(raw, QUANTITY)?,
        None => Units::ONE,
    };
    let draft = DonationDraft {
        donor: identity.user_id,
        blood_type: parse_blood_type(raw_type, BLOOD_TYPE)?,
        donation_date,
        quantity,
    };

    let receipt = state.donations.record_donation(draft).await?;
    Ok(HttpResponse::Created().json(Envelope::data(receipt)))
}

/// The caller's own donations, newest first.
#[utoipa::path(
    get,
    path = "/api/donor/history",
    responses(
        (status = 200, description = "Donation history", body = Envelope<Vec<Donation>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not a donor", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["donor"],
    operation_id = "donationHistory"
)]
#[get("/donor/history")]
pub async fn history(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Envelope<Vec<Donation>>>> {
    let identity = caller.authorize(Operation::GetOwnDonationHistory)?;
    let donations = state.donations.history_for_donor(identity.user_id).await?;
    Ok(web::Json(Envelope::list(donations)))
}
