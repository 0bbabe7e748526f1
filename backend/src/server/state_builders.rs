//! Builders wiring repositories, security adapters, and services into the
//! HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use bloodbank::domain::ports::{
    BloodRequestRepository, DonationRepository, InventoryLedger, InventoryRepository,
    UserRepository,
};
use bloodbank::domain::{
    AccountsService, DonationRecorderService, InventoryLedgerService, RequestWorkflowService,
};
use bloodbank::inbound::http::state::HttpState;
use bloodbank::outbound::memory::{
    MemoryBloodRequestRepository, MemoryDonationRepository, MemoryInventoryRepository,
    MemoryUserRepository,
};
use bloodbank::outbound::persistence::{
    DieselBloodRequestRepository, DieselDonationRepository, DieselInventoryRepository,
    DieselUserRepository,
};
use bloodbank::outbound::security::{Argon2PasswordHasher, HmacTokenIssuer};

use super::ServerConfig;

/// One adapter per driven storage port.
struct Repositories<U, I, D, R> {
    users: Arc<U>,
    inventory: Arc<I>,
    donations: Arc<D>,
    requests: Arc<R>,
}

fn wire<U, I, D, R>(
    repos: Repositories<U, I, D, R>,
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    I: InventoryRepository + 'static,
    D: DonationRepository + 'static,
    R: BloodRequestRepository + 'static,
{
    let tokens = Arc::new(HmacTokenIssuer::new(
        config.signing_key.clone(),
        config.token_ttl,
        clock.clone(),
    ));
    let accounts = Arc::new(AccountsService::new(
        repos.users.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
        clock.clone(),
    ));
    let ledger: Arc<dyn InventoryLedger> = Arc::new(InventoryLedgerService::new(repos.inventory));
    let donations = Arc::new(DonationRecorderService::new(
        repos.donations,
        repos.users.clone(),
        ledger.clone(),
        clock.clone(),
    ));
    let requests = Arc::new(RequestWorkflowService::new(
        repos.requests,
        repos.users,
        clock,
    ));

    HttpState::new(accounts, ledger, donations, requests)
}

/// Build the HTTP state over Diesel adapters when a pool is configured and
/// over the in-memory adapters otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => wire(
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                inventory: Arc::new(DieselInventoryRepository::new(pool.clone())),
                donations: Arc::new(DieselDonationRepository::new(pool.clone())),
                requests: Arc::new(DieselBloodRequestRepository::new(pool.clone())),
            },
            config,
            clock,
        ),
        None => wire(
            Repositories {
                users: Arc::new(MemoryUserRepository::new()),
                inventory: Arc::new(MemoryInventoryRepository::new()),
                donations: Arc::new(MemoryDonationRepository::new()),
                requests: Arc::new(MemoryBloodRequestRepository::new()),
            },
            config,
            clock,
        ),
    }
}
