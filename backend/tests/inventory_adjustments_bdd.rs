//! Behavioural tests for the raw inventory adjustment routes.

#[path = "support/app.rs"]
mod support;

use std::cell::RefCell;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::web;
use bloodbank::domain::ports::InventoryLedger;
use bloodbank::inbound::http::state::HttpState;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

struct InventoryWorld {
    runner: actix_rt::SystemRunner,
    state: web::Data<HttpState>,
    last: RefCell<Option<(StatusCode, Value)>>,
}

impl InventoryWorld {
    fn send(&self, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let state = self.state.clone();
        self.runner.block_on(async move {
            let app = actix_test::init_service(support::app(state)).await;
            let res = actix_test::call_service(&app, request.to_request()).await;
            let status = res.status();
            (status, actix_test::read_body_json(res).await)
        })
    }

    fn adjust(&self, path: &str, action: &str, units: i64) {
        let reply = self.send(
            actix_test::TestRequest::patch()
                .uri(path)
                .set_json(json!({ "action": action, "units": units })),
        );
        self.last.replace(Some(reply));
    }

    fn last_reply(&self) -> (StatusCode, Value) {
        self.last.borrow().clone().expect("a request was sent")
    }

    fn quantity(&self, code: &str) -> Option<u64> {
        let (_, body) = self.send(actix_test::TestRequest::get().uri("/api/blood-inventory"));
        body.as_array()?
            .iter()
            .find(|record| record["bloodType"] == json!(code))
            .and_then(|record| record["quantity"].as_u64())
    }
}

#[fixture]
fn world() -> InventoryWorld {
    InventoryWorld {
        runner: actix_rt::System::new(),
        state: support::memory_state(),
        last: RefCell::new(None),
    }
}

#[given("a seeded blood bank")]
fn a_seeded_blood_bank(world: &InventoryWorld) {
    let state = world.state.clone();
    world
        .runner
        .block_on(async move { state.inventory.seed().await })
        .expect("seed inventory");
}

#[when("O- stock is increased by 3 units")]
fn o_negative_is_increased(world: &InventoryWorld) {
    world.adjust("/api/blood-inventory/O-", "increase", 3);
    assert_eq!(world.last_reply().0, StatusCode::OK);
}

#[when("O- stock is decreased by 5 units")]
fn o_negative_is_overdrawn(world: &InventoryWorld) {
    world.adjust("/api/blood-inventory/O-", "decrease", 5);
}

#[when("O- stock is decreased by 2 units")]
fn o_negative_is_decreased(world: &InventoryWorld) {
    world.adjust("/api/blood-inventory/O-", "decrease", 2);
}

#[when("an unknown blood type is adjusted")]
fn an_unknown_type_is_adjusted(world: &InventoryWorld) {
    world.adjust("/api/blood-inventory/C+", "increase", 1);
}

#[then("the adjustment is refused as insufficient stock")]
fn refused_as_insufficient(world: &InventoryWorld) {
    let (status, body) = world.last_reply();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("insufficient_stock"));
}

#[then("the adjustment is refused as not found")]
fn refused_as_not_found(world: &InventoryWorld) {
    let (status, body) = world.last_reply();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Blood type not found"));
}

#[then("the adjustment succeeds")]
fn adjustment_succeeds(world: &InventoryWorld) {
    assert_eq!(world.last_reply().0, StatusCode::OK);
}

#[then("O- stock remains at 3 units")]
fn o_negative_holds_three(world: &InventoryWorld) {
    assert_eq!(world.quantity("O-"), Some(3));
}

#[then("O- stock remains at 1 unit")]
fn o_negative_holds_one(world: &InventoryWorld) {
    assert_eq!(world.quantity("O-"), Some(1));
}

#[scenario(
    path = "tests/features/inventory_adjustments.feature",
    name = "A decrease larger than the stock is refused"
)]
fn decrease_beyond_stock_is_refused(world: InventoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inventory_adjustments.feature",
    name = "A decrease within the stock is applied"
)]
fn decrease_within_stock_is_applied(world: InventoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/inventory_adjustments.feature",
    name = "Unknown blood types are not found"
)]
fn unknown_types_are_not_found(world: InventoryWorld) {
    drop(world);
}
