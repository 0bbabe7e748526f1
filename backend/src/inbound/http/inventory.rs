//! Raw inventory routes.
//!
//! These routes answer without a token and return bare records rather than
//! the `{ success, data }` envelope.
//!
//! ```text
//! GET /api/blood-inventory
//! PATCH /api/blood-inventory/O- {"action":"decrease","units":2}
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BloodType, Error, InventoryRecord, StockAction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_keyword, parse_units, require};

const ACTION: FieldName = FieldName::new("action");
const UNITS: FieldName = FieldName::new("units");

/// Manual stock adjustment body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    #[schema(example = "decrease")]
    pub action: Option<String>,
    #[schema(example = 2, minimum = 1)]
    pub units: Option<i64>,
}

/// Every inventory record, sorted by blood type.
#[utoipa::path(
    get,
    path = "/api/blood-inventory",
    responses(
        (status = 200, description = "Inventory records", body = Vec<InventoryRecord>),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["inventory"],
    operation_id = "listInventory",
    security([])
)]
#[get("/blood-inventory")]
pub async fn list_inventory(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<InventoryRecord>>> {
    Ok(web::Json(state.inventory.get_all().await?))
}

/// Increase or decrease the stock of one blood type.
#[utoipa::path(
    patch,
    path = "/api/blood-inventory/{bloodType}",
    params(("bloodType" = String, Path, description = "Blood type code", example = "O-")),
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Updated record", body = InventoryRecord),
        (status = 400, description = "Invalid adjustment or insufficient stock", body = ErrorSchema),
        (status = 404, description = "Blood type not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["inventory"],
    operation_id = "adjustInventory",
    security([])
)]
#[patch("/blood-inventory/{blood_type}")]
pub async fn adjust_inventory(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AdjustStockRequest>,
) -> ApiResult<web::Json<InventoryRecord>> {
    let blood_type = path
        .parse::<BloodType>()
        .map_err(|_| Error::not_found("Blood type not found"))?;
    let body = payload.into_inner();
    let action = parse_keyword::<StockAction>(
        require(body.action.as_deref(), ACTION)?,
        ACTION,
        "increase, decrease",
    )?;
    let units = parse_units(require(body.units, UNITS)?, UNITS)?;

    let record = state.inventory.adjust(blood_type, action, units).await?;
    Ok(web::Json(record))
}
