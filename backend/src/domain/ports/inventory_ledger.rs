//! Driving port for blood stock accounting.

use async_trait::async_trait;

use crate::domain::{BloodType, Error, InventoryRecord, StockAction, Units};

/// Driving port for reading and moving blood stock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// All stock records sorted by blood type.
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, Error>;

    /// Add units, creating the record when absent.
    async fn increase(&self, blood_type: BloodType, units: Units)
    -> Result<InventoryRecord, Error>;

    /// Remove units. Fails with `insufficient_stock` and leaves the record
    /// unchanged when fewer units are held.
    async fn decrease(&self, blood_type: BloodType, units: Units)
    -> Result<InventoryRecord, Error>;

    /// Credit stock for a recorded donation. Same effect as [`Self::increase`].
    async fn credit(&self, blood_type: BloodType, units: Units) -> Result<InventoryRecord, Error>;

    /// Manual adjustment of an existing record. Fails with `not_found` when
    /// the blood type has no record yet.
    async fn adjust(
        &self,
        blood_type: BloodType,
        action: StockAction,
        units: Units,
    ) -> Result<InventoryRecord, Error>;

    /// Make sure every blood type has a record, leaving existing counts alone.
    async fn seed(&self) -> Result<(), Error>;
}
