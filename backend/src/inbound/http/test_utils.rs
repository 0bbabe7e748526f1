//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    AccountService, DonationRecorder, InventoryLedger, MockAccountService, MockDonationRecorder,
    MockInventoryLedger, MockRequestWorkflow, RequestWorkflow,
};
use crate::domain::{Identity, Role, UserId};
use crate::inbound::http::state::HttpState;

/// State whose ports are expectation-free mocks; any call fails the test.
pub fn http_state() -> HttpState {
    HttpState::new(
        Arc::new(MockAccountService::new()),
        Arc::new(MockInventoryLedger::new()),
        Arc::new(MockDonationRecorder::new()),
        Arc::new(MockRequestWorkflow::new()),
    )
}

pub fn identity_for(role: Role, user_id: UserId) -> Identity {
    Identity { user_id, role }
}

/// Account mock that accepts `token` as `identity` and rejects anything
/// else.
pub fn accounts_accepting(token: &'static str, identity: Identity) -> MockAccountService {
    let mut accounts = MockAccountService::new();
    accounts.expect_authenticate().returning(move |presented| {
        if presented == token {
            Ok(identity)
        } else {
            Err(crate::domain::Error::unauthorized(
                "Not authorized to access this route",
            ))
        }
    });
    accounts
}

impl HttpState {
    pub fn with_accounts(mut self, accounts: impl AccountService + 'static) -> Self {
        self.accounts = Arc::new(accounts);
        self
    }

    pub fn with_inventory(mut self, inventory: impl InventoryLedger + 'static) -> Self {
        self.inventory = Arc::new(inventory);
        self
    }

    pub fn with_donations(mut self, donations: impl DonationRecorder + 'static) -> Self {
        self.donations = Arc::new(donations);
        self
    }

    pub fn with_requests(mut self, requests: impl RequestWorkflow + 'static) -> Self {
        self.requests = Arc::new(requests);
        self
    }

    pub fn into_data(self) -> web::Data<Self> {
        web::Data::new(self)
    }
}
