//! Inventory ledger service.
//!
//! Implements the [`InventoryLedger`] driving port on top of an
//! [`InventoryRepository`]. Atomicity of each movement is the repository's
//! contract; this layer only maps outcomes onto domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{InventoryLedger, InventoryRepository, InventoryRepositoryError};
use crate::domain::{BloodType, Error, InventoryRecord, StockAction, Units};

fn map_repository_error(error: InventoryRepositoryError) -> Error {
    match error {
        InventoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("inventory repository unavailable: {message}"))
        }
        InventoryRepositoryError::Query { message } => {
            Error::internal(format!("inventory repository error: {message}"))
        }
        InventoryRepositoryError::InsufficientStock { available } => {
            Error::insufficient_stock("Insufficient stock")
                .with_details(json!({ "available": available }))
        }
    }
}

/// Inventory service implementing the ledger driving port.
#[derive(Clone)]
pub struct InventoryLedgerService<R> {
    inventory_repo: Arc<R>,
}

impl<R> InventoryLedgerService<R> {
    /// Create a new ledger over the inventory repository.
    pub fn new(inventory_repo: Arc<R>) -> Self {
        Self { inventory_repo }
    }
}

#[async_trait]
impl<R> InventoryLedger for InventoryLedgerService<R>
where
    R: InventoryRepository,
{
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, Error> {
        let mut records = self
            .inventory_repo
            .list_all()
            .await
            .map_err(map_repository_error)?;
        records.sort_by_key(|record| record.blood_type);
        Ok(records)
    }

    async fn increase(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, Error> {
        let record = self
            .inventory_repo
            .increment(blood_type, units)
            .await
            .map_err(map_repository_error)?;
        debug!(%blood_type, %units, quantity = record.quantity, "stock increased");
        Ok(record)
    }

    async fn decrease(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, Error> {
        let record = self
            .inventory_repo
            .decrement(blood_type, units)
            .await
            .map_err(map_repository_error)?;
        debug!(%blood_type, %units, quantity = record.quantity, "stock decreased");
        Ok(record)
    }

    async fn credit(&self, blood_type: BloodType, units: Units) -> Result<InventoryRecord, Error> {
        self.increase(blood_type, units).await
    }

    async fn adjust(
        &self,
        blood_type: BloodType,
        action: StockAction,
        units: Units,
    ) -> Result<InventoryRecord, Error> {
        let existing = self
            .inventory_repo
            .find(blood_type)
            .await
            .map_err(map_repository_error)?;
        if existing.is_none() {
            return Err(Error::not_found("Blood type not found"));
        }

        match action {
            StockAction::Increase => self.increase(blood_type, units).await,
            StockAction::Decrease => self.decrease(blood_type, units).await,
        }
    }

    async fn seed(&self) -> Result<(), Error> {
        self.inventory_repo
            .ensure_records(&BloodType::ALL)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "inventory_service_tests.rs"]
mod tests;
