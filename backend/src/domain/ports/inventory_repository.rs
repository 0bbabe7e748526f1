//! Port for per-blood-type stock counters.
//!
//! Adapters must apply [`InventoryRepository::increment`] and
//! [`InventoryRepository::decrement`] as single atomic read-modify-write
//! operations on the record keyed by blood type, so two concurrent debits can
//! never both pass the sufficiency check against a stale read.

use async_trait::async_trait;

use crate::domain::{BloodType, InventoryRecord, Units};

use super::define_port_error;

define_port_error! {
    /// Errors raised by inventory repository adapters.
    pub enum InventoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "inventory repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "inventory repository query failed: {message}",
        /// A decrement asked for more units than the record holds.
        InsufficientStock { available: u32 } =>
            "insufficient stock: {available} units available",
    }
}

/// Port for reading and atomically adjusting stock counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Every stored record, sorted by blood type.
    async fn list_all(&self) -> Result<Vec<InventoryRecord>, InventoryRepositoryError>;

    /// The record for `blood_type`, if one exists.
    async fn find(
        &self,
        blood_type: BloodType,
    ) -> Result<Option<InventoryRecord>, InventoryRepositoryError>;

    /// Add `units`, creating the record at zero first when absent.
    async fn increment(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError>;

    /// Remove `units`, failing with `InsufficientStock` and leaving the record
    /// untouched when fewer are available. A missing record holds zero.
    async fn decrement(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError>;

    /// Create zero-quantity records for any of `blood_types` that are missing.
    async fn ensure_records(
        &self,
        blood_types: &[BloodType],
    ) -> Result<(), InventoryRepositoryError>;
}

/// Fixture implementation for tests that do not exercise stock levels.
///
/// Reports an empty inventory and echoes movements as if applied to an empty
/// record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInventoryRepository;

#[async_trait]
impl InventoryRepository for FixtureInventoryRepository {
    async fn list_all(&self) -> Result<Vec<InventoryRecord>, InventoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(
        &self,
        _blood_type: BloodType,
    ) -> Result<Option<InventoryRecord>, InventoryRepositoryError> {
        Ok(None)
    }

    async fn increment(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError> {
        Ok(InventoryRecord {
            blood_type,
            quantity: units.get(),
        })
    }

    async fn decrement(
        &self,
        _blood_type: BloodType,
        _units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError> {
        Err(InventoryRepositoryError::insufficient_stock(0_u32))
    }

    async fn ensure_records(
        &self,
        _blood_types: &[BloodType],
    ) -> Result<(), InventoryRepositoryError> {
        Ok(())
    }
}
