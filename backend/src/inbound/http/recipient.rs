//! Recipient handlers.
//!
//! ```text
//! POST /api/recipient/request {"bloodType":"AB-","location":"City Hospital","urgency":"high"}
//! GET /api/recipient/requests
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    BloodRequest, BloodRequestDraft, Error, Location, Operation, Urgency, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrorCode, FieldName, field_error, parse_blood_type, parse_keyword, require,
};

const BLOOD_TYPE: FieldName = FieldName::new("bloodType");
const LOCATION: FieldName = FieldName::new("location");
const URGENCY: FieldName = FieldName::new("urgency");

/// Blood request body. `urgency` defaults to `normal`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[schema(example = "AB-")]
    pub blood_type: Option<String>,
    #[schema(example = "City Hospital")]
    pub location: Option<String>,
    #[schema(example = "normal")]
    pub urgency: Option<String>,
}

fn draft_from_body(recipient: UserId, body: CreateRequestBody) -> Result<BloodRequestDraft, Error> {
    let raw_type = require(body.blood_type.as_deref(), BLOOD_TYPE)?;
    let blood_type = parse_blood_type(raw_type, BLOOD_TYPE)?;
    let raw_location = require(body.location.as_deref(), LOCATION)?;
    let location = Location::new(raw_location)
        .map_err(|err| field_error(LOCATION, err.to_string(), FieldErrorCode::InvalidValue, None))?;
    let urgency = match body.urgency.as_deref() {
        Some(raw) => parse_keyword::<Urgency>(raw, URGENCY, "low, normal, high, critical")?,
        None => Urgency::default(),
    };
    Ok(BloodRequestDraft {
        recipient,
        blood_type,
        location,
        urgency,
    })
}

/// Raise a blood request. New requests start `Pending`.
#[utoipa::path(
    post,
    path = "/api/recipient/request",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = Envelope<BloodRequest>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not a recipient", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipient"],
    operation_id = "createBloodRequest"
)]
#[post("/recipient/request")]
pub async fn create_request(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let identity = caller.authorize(Operation::CreateRequest)?;
    let draft = draft_from_body(identity.user_id, payload.into_inner())?;
    let created = state.requests.create_request(draft).await?;
    Ok(HttpResponse::Created().json(Envelope::data(created)))
}

/// The caller's own requests, newest first.
#[utoipa::path(
    get,
    path = "/api/recipient/requests",
    responses(
        (status = 200, description = "Own requests", body = Envelope<Vec<BloodRequest>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Caller is not a recipient", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipient"],
    operation_id = "listOwnRequests"
)]
#[get("/recipient/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Envelope<Vec<BloodRequest>>>> {
    let identity = caller.authorize(Operation::GetOwnRequestHistory)?;
    let requests = state.requests.list_for_recipient(identity.user_id).await?;
    Ok(web::Json(Envelope::list(requests)))
}
