//! Tests for the admin handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test};
use chrono::{DateTime, Utc};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockAccountService, MockDonationRecorder, MockRequestWorkflow};
use crate::domain::{
    BloodType, DonationStatus, EmailAddress, Error, Identity, Location, Role, Units, Urgency, UserId,
    UserName, UserSummary,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{accounts_accepting, http_state, identity_for};

const TOKEN: &str = "admin-token";

fn admin() -> Identity {
    identity_for(Role::Admin, UserId::random())
}

fn rita() -> UserSummary {
    UserSummary {
        id: UserId::random(),
        name: UserName::new("Rita").expect("name"),
        email: EmailAddress::new("rita@example.com").expect("email"),
        blood_type: None,
    }
}

fn pending_request(id: Uuid, status: RequestStatus) -> RequestWithRequester {
    RequestWithRequester {
        id,
        recipient: Some(rita()),
        blood_type: BloodType::AbNegative,
        location: Location::new("City Hospital").expect("location"),
        urgency: Urgency::Normal,
        status,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new().app_data(state.into_data()).service(
            web::scope("/api")
                .service(pending_requests)
                .service(set_request_status)
                .service(users)
                .service(donations),
        ),
    )
    .await;
    let req = request
        .insert_header((AUTHORIZATION, format!("Bearer {TOKEN}")))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

fn as_role(role: Role) -> HttpState {
    http_state().with_accounts(accounts_accepting(TOKEN, identity_for(role, UserId::random())))
}

#[rstest]
#[case("/api/admin/requests")]
#[case("/api/admin/users")]
#[case("/api/admin/donations")]
#[actix_web::test]
async fn non_admins_are_forbidden(#[case] uri: &str) {
    for role in [Role::Donor, Role::Recipient] {
        let (status, body) = send(as_role(role), actix_test::TestRequest::get().uri(uri)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], json!("forbidden"));
    }
}

#[actix_web::test]
async fn pending_requests_are_listed_with_requester() {
    let mut requests = MockRequestWorkflow::new();
    requests
        .expect_list_pending()
        .times(1)
        .return_once(|| Ok(vec![pending_request(Uuid::new_v4(), RequestStatus::Pending)]));
    let state = http_state()
        .with_accounts(accounts_accepting(TOKEN, admin()))
        .with_requests(requests);

    let (status, body) = send(state, actix_test::TestRequest::get().uri("/api/admin/requests")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["recipient"]["name"], json!("Rita"));
    assert!(body["data"][0]["recipient"].get("bloodType").is_none());
}

#[actix_web::test]
async fn set_status_passes_the_parsed_status() {
    let id = Uuid::new_v4();
    let mut requests = MockRequestWorkflow::new();
    requests
        .expect_set_status()
        .withf(move |request_id, status| *request_id == id && *status == RequestStatus::Approved)
        .times(1)
        .return_once(move |_, status| Ok(pending_request(id, status)));
    let state = http_state()
        .with_accounts(accounts_accepting(TOKEN, admin()))
        .with_requests(requests);

    let (status, body) = send(
        state,
        actix_test::TestRequest::put()
            .uri("/api/admin/request/status")
            .set_json(json!({ "requestId": id.to_string(), "status": "Approved" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("Approved"));
}

#[actix_web::test]
async fn set_status_on_unknown_request_is_not_found() {
    let id = Uuid::new_v4();
    let mut requests = MockRequestWorkflow::new();
    requests.expect_set_status().times(1).return_once(move |_, _| {
        Err(Error::not_found(format!("Request not found with id of {id}")))
    });
    let state = http_state()
        .with_accounts(accounts_accepting(TOKEN, admin()))
        .with_requests(requests);

    let (status, body) = send(
        state,
        actix_test::TestRequest::put()
            .uri("/api/admin/request/status")
            .set_json(json!({ "requestId": id.to_string(), "status": "Rejected" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!(format!("Request not found with id of {id}")));
}

#[rstest]
#[case(json!({ "requestId": "nope", "status": "Approved" }), "requestId")]
#[case(json!({ "status": "Approved" }), "requestId")]
#[case(json!({ "requestId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "status": "Done" }), "status")]
#[actix_web::test]
async fn set_status_rejects_invalid_bodies(#[case] payload: Value, #[case] field: &str) {
    let state = http_state().with_accounts(accounts_accepting(TOKEN, admin()));

    let (status, body) = send(
        state,
        actix_test::TestRequest::put()
            .uri("/api/admin/request/status")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!(field));
}

#[actix_web::test]
async fn users_are_listed_without_password_hashes() {
    let mut accounts: MockAccountService = accounts_accepting(TOKEN, admin());
    accounts.expect_list_users().times(1).return_once(|| {
        Ok(vec![User {
            id: UserId::random(),
            name: UserName::new("Ada").expect("name"),
            email: EmailAddress::new("ada@example.com").expect("email"),
            role: Role::Donor,
            blood_type: Some(BloodType::APositive),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }])
    });

    let (status, body) = send(
        http_state().with_accounts(accounts),
        actix_test::TestRequest::get().uri("/api/admin/users"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert!(body["data"][0].get("passwordHash").is_none());
    assert!(body["data"][0].get("password").is_none());
}

#[actix_web::test]
async fn donations_include_donor_details() {
    let mut recorder = MockDonationRecorder::new();
    recorder.expect_list_all().times(1).return_once(|| {
        Ok(vec![DonationWithDonor {
            id: Uuid::new_v4(),
            donor: Some(UserSummary {
                blood_type: Some(BloodType::APositive),
                ..rita()
            }),
            blood_type: BloodType::APositive,
            donation_date: DateTime::<Utc>::UNIX_EPOCH,
            quantity: Units::ONE,
            status: DonationStatus::Completed,
        }])
    });
    let state = http_state()
        .with_accounts(accounts_accepting(TOKEN, admin()))
        .with_donations(recorder);

    let (status, body) = send(state, actix_test::TestRequest::get().uri("/api/admin/donations")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["donor"]["bloodType"], json!("A+"));
}
