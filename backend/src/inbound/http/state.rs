//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data<HttpState>` and depend only on
//! the driving ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, DonationRecorder, InventoryLedger, RequestWorkflow};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub inventory: Arc<dyn InventoryLedger>,
    pub donations: Arc<dyn DonationRecorder>,
    pub requests: Arc<dyn RequestWorkflow>,
}

impl HttpState {
    pub fn new(
        accounts: Arc<dyn AccountService>,
        inventory: Arc<dyn InventoryLedger>,
        donations: Arc<dyn DonationRecorder>,
        requests: Arc<dyn RequestWorkflow>,
    ) -> Self {
        Self {
            accounts,
            inventory,
            donations,
            requests,
        }
    }
}
