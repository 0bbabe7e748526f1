//! In-process application over the in-memory adapters with real password
//! hashing and token signing.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use bloodbank::Trace;
use bloodbank::domain::ports::InventoryLedger;
use bloodbank::domain::{
    AccountsService, DonationRecorderService, InventoryLedgerService, RequestWorkflowService,
};
use bloodbank::inbound::http::configure;
use bloodbank::inbound::http::state::HttpState;
use bloodbank::outbound::memory::{
    MemoryBloodRequestRepository, MemoryDonationRepository, MemoryInventoryRepository,
    MemoryUserRepository,
};
use bloodbank::outbound::security::{Argon2PasswordHasher, HmacTokenIssuer, TokenSigningKey};
use mockable::{Clock, DefaultClock};

pub(crate) fn memory_state() -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(MemoryUserRepository::new());
    let tokens = Arc::new(HmacTokenIssuer::new(
        TokenSigningKey::new("integration-secret"),
        chrono::Duration::hours(720),
        clock.clone(),
    ));
    let ledger: Arc<dyn InventoryLedger> = Arc::new(InventoryLedgerService::new(Arc::new(
        MemoryInventoryRepository::new(),
    )));

    web::Data::new(HttpState::new(
        Arc::new(AccountsService::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            tokens,
            clock.clone(),
        )),
        ledger.clone(),
        Arc::new(DonationRecorderService::new(
            Arc::new(MemoryDonationRepository::new()),
            users.clone(),
            ledger,
            clock.clone(),
        )),
        Arc::new(RequestWorkflowService::new(
            Arc::new(MemoryBloodRequestRepository::new()),
            users,
            clock,
        )),
    ))
}

pub(crate) fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).configure(configure)
}
