//! End-to-end flows through the HTTP surface over the in-memory adapters.

#[path = "support/app.rs"]
mod support;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use bloodbank::domain::ports::InventoryLedger;
use bloodbank::middleware::TRACE_ID_HEADER;
use serde_json::{Value, json};

struct Reply {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn call(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
    token: Option<&str>,
) -> Reply {
    let request = match token {
        Some(token) => request.insert_header((AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    };
    let res = actix_test::call_service(app, request.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    Reply {
        status,
        trace_id,
        body: actix_test::read_body_json(res).await,
    }
}

async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    body: Value,
) -> String {
    let reply = call(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(body),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "register: {}", reply.body);
    reply.body["token"]
        .as_str()
        .expect("token in register response")
        .to_owned()
}

fn quantity_of(inventory: &Value, code: &str) -> Option<u64> {
    inventory
        .as_array()?
        .iter()
        .find(|record| record["bloodType"] == json!(code))
        .and_then(|record| record["quantity"].as_u64())
}

#[actix_web::test]
async fn donor_registers_logs_in_and_donates() {
    let state = support::memory_state();
    state.inventory.seed().await.expect("seed inventory");
    let app = actix_test::init_service(support::app(state)).await;

    register(
        &app,
        json!({
            "name": "Ada Donor",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "donor",
            "bloodType": "A+"
        }),
    )
    .await;

    let login = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ADA@example.com", "password": "secret1" })),
        None,
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["role"], json!("donor"));
    assert!(login.body["user"].get("passwordHash").is_none());
    let token = login.body["token"].as_str().expect("token").to_owned();

    let donated = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/donor/donate")
            .set_json(json!({ "bloodType": "A+", "quantity": 2 })),
        Some(&token),
    )
    .await;
    assert_eq!(donated.status, StatusCode::CREATED);
    assert_eq!(donated.body["data"]["donation"]["status"], json!("completed"));
    assert_eq!(
        donated.body["data"]["inventory"],
        json!({ "bloodType": "A+", "quantity": 2 })
    );

    let availability = call(
        &app,
        actix_test::TestRequest::get().uri("/api/blood/availability"),
        Some(&token),
    )
    .await;
    assert_eq!(availability.body["count"], json!(8));
    assert_eq!(quantity_of(&availability.body["data"], "A+"), Some(2));

    let history = call(
        &app,
        actix_test::TestRequest::get().uri("/api/donor/history"),
        Some(&token),
    )
    .await;
    assert_eq!(history.body["count"], json!(1));
    assert_eq!(history.body["data"][0]["quantity"], json!(2));
}

#[actix_web::test]
async fn wrong_password_and_duplicate_email_are_rejected() {
    let app = actix_test::init_service(support::app(support::memory_state())).await;
    let account = json!({
        "name": "Ada Donor",
        "email": "ada@example.com",
        "password": "secret1",
        "role": "donor"
    });
    register(&app, account.clone()).await;

    let duplicate = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(account),
        None,
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let login = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "secret2" })),
        None,
    )
    .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert_eq!(login.body["message"], json!("Invalid credentials"));
    assert!(login.trace_id.is_some());
    assert_eq!(login.body["traceId"].as_str(), login.trace_id.as_deref());
}

#[actix_web::test]
async fn recipient_request_is_reviewed_by_an_admin() {
    let app = actix_test::init_service(support::app(support::memory_state())).await;
    let recipient = register(
        &app,
        json!({
            "name": "Rita Recipient",
            "email": "rita@example.com",
            "password": "secret1",
            "role": "recipient",
            "bloodType": "AB-"
        }),
    )
    .await;
    let admin = register(
        &app,
        json!({
            "name": "Ann Admin",
            "email": "ann@example.com",
            "password": "secret1",
            "role": "admin"
        }),
    )
    .await;

    let created = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/recipient/request")
            .set_json(json!({ "bloodType": "AB-", "location": "City Hospital" })),
        Some(&recipient),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["status"], json!("Pending"));
    assert_eq!(created.body["data"]["urgency"], json!("normal"));
    let request_id = created.body["data"]["id"].as_str().expect("id").to_owned();

    let pending = call(
        &app,
        actix_test::TestRequest::get().uri("/api/admin/requests"),
        Some(&admin),
    )
    .await;
    assert_eq!(pending.body["count"], json!(1));
    assert_eq!(pending.body["data"][0]["recipient"]["name"], json!("Rita Recipient"));

    for status in ["Approved", "Pending"] {
        let updated = call(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/admin/request/status")
                .set_json(json!({ "requestId": request_id, "status": status })),
            Some(&admin),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["data"]["status"], json!(status));
    }

    let own = call(
        &app,
        actix_test::TestRequest::get().uri("/api/recipient/requests"),
        Some(&recipient),
    )
    .await;
    assert_eq!(own.body["data"][0]["status"], json!("Pending"));

    let missing = call(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/admin/request/status")
            .set_json(json!({
                "requestId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "status": "Approved"
            })),
        Some(&admin),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn access_policy_distinguishes_401_from_403() {
    let app = actix_test::init_service(support::app(support::memory_state())).await;
    let donor = register(
        &app,
        json!({
            "name": "Dan Donor",
            "email": "dan@example.com",
            "password": "secret1",
            "role": "donor",
            "bloodType": "O-"
        }),
    )
    .await;

    let anonymous = call(
        &app,
        actix_test::TestRequest::get().uri("/api/blood/availability"),
        None,
    )
    .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = call(
        &app,
        actix_test::TestRequest::get().uri("/api/blood/availability"),
        Some("forged.token"),
    )
    .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    for uri in ["/api/admin/users", "/api/admin/donations", "/api/recipient/requests"] {
        let reply = call(&app, actix_test::TestRequest::get().uri(uri), Some(&donor)).await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN, "{uri}");
    }

    let compatible = call(
        &app,
        actix_test::TestRequest::get().uri("/api/blood/compatible/AB+"),
        Some(&donor),
    )
    .await;
    assert_eq!(compatible.body["data"].as_array().map(Vec::len), Some(8));
}

#[actix_web::test]
async fn raw_inventory_never_goes_negative() {
    let state = support::memory_state();
    state.inventory.seed().await.expect("seed inventory");
    let app = actix_test::init_service(support::app(state)).await;

    let increased = call(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/blood-inventory/O-")
            .set_json(json!({ "action": "increase", "units": 3 })),
        None,
    )
    .await;
    assert_eq!(increased.status, StatusCode::OK);
    assert_eq!(increased.body, json!({ "bloodType": "O-", "quantity": 3 }));

    let refused = call(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/blood-inventory/o-")
            .set_json(json!({ "action": "decrease", "units": 5 })),
        None,
    )
    .await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);
    assert_eq!(refused.body["code"], json!("insufficient_stock"));

    let listing = call(
        &app,
        actix_test::TestRequest::get().uri("/api/blood-inventory"),
        None,
    )
    .await;
    assert_eq!(quantity_of(&listing.body, "O-"), Some(3));
    let codes: Vec<&str> = listing
        .body
        .as_array()
        .expect("raw array")
        .iter()
        .filter_map(|record| record["bloodType"].as_str())
        .collect();
    assert_eq!(codes, ["A+", "A-", "AB+", "AB-", "B+", "B-", "O+", "O-"]);
}
