//! Blood availability and compatibility lookups for signed-in users.
//!
//! ```text
//! GET /api/blood/availability
//! GET /api/blood/compatible/AB-
//! ```

use actix_web::{get, web};

use crate::domain::{BloodType, InventoryRecord, Operation, compatible_donors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Stock for every blood type, sorted by type code.
#[utoipa::path(
    get,
    path = "/api/blood/availability",
    responses(
        (status = 200, description = "Current stock", body = Envelope<Vec<InventoryRecord>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["blood"],
    operation_id = "bloodAvailability"
)]
#[get("/blood/availability")]
pub async fn availability(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Envelope<Vec<InventoryRecord>>>> {
    caller.authorize(Operation::ReadInventory)?;
    let records = state.inventory.get_all().await?;
    Ok(web::Json(Envelope::list(records)))
}

/// Donor types a recipient of `bloodType` may receive. Unknown codes yield
/// an empty list.
#[utoipa::path(
    get,
    path = "/api/blood/compatible/{bloodType}",
    params(("bloodType" = String, Path, description = "Recipient blood type code", example = "AB-")),
    responses(
        (status = 200, description = "Compatible donor types", body = Envelope<Vec<BloodType>>),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["blood"],
    operation_id = "compatibleDonors"
)]
#[get("/blood/compatible/{blood_type}")]
pub async fn compatible(
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<BloodType>>>> {
    caller.authorize(Operation::CheckCompatibility)?;
    let donors = compatible_donors(&path.into_inner()).to_vec();
    Ok(web::Json(Envelope::data(donors)))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockInventoryLedger;
    use crate::domain::{Role, UserId};
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{accounts_accepting, http_state, identity_for};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    const TOKEN: &str = "user-token";

    async fn get(state: HttpState, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state.into_data())
                .service(web::scope("/api").service(availability).service(compatible)),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri(uri);
        if let Some(token) = token {
            request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
        }
        let res = actix_test::call_service(&app, request.to_request()).await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    fn signed_in(role: Role) -> HttpState {
        http_state().with_accounts(accounts_accepting(TOKEN, identity_for(role, UserId::random())))
    }

    #[rstest]
    #[case(Role::Donor)]
    #[case(Role::Recipient)]
    #[case(Role::Admin)]
    #[actix_web::test]
    async fn any_role_reads_availability(#[case] role: Role) {
        let mut ledger = MockInventoryLedger::new();
        ledger.expect_get_all().times(1).return_once(|| {
            Ok(BloodType::ALL
                .iter()
                .map(|t| InventoryRecord::empty(*t))
                .collect())
        });

        let (status, body) = get(
            signed_in(role).with_inventory(ledger),
            "/api/blood/availability",
            Some(TOKEN),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], json!(8));
        assert_eq!(body["data"][0]["bloodType"], json!("A+"));
    }

    #[actix_web::test]
    async fn availability_requires_a_token() {
        let (status, body) = get(signed_in(Role::Donor), "/api/blood/availability", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], json!(false));
    }

    #[actix_web::test]
    async fn rejected_tokens_are_unauthorized() {
        let (status, _) = get(
            signed_in(Role::Donor),
            "/api/blood/availability",
            Some("forged"),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("/api/blood/compatible/AB-", json!(["A-", "B-", "AB-", "O-"]))]
    #[case("/api/blood/compatible/o-", json!([]))]
    #[case("/api/blood/compatible/ab+", json!([]))]
    #[case("/api/blood/compatible/C+", json!([]))]
    #[actix_web::test]
    async fn compatible_lists_donor_types(#[case] uri: &str, #[case] expected: Value) {
        let (status, body) = get(signed_in(Role::Recipient), uri, Some(TOKEN)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "data": expected }));
    }
}
