//! Stock counters held in a sharded concurrent map.
//!
//! Each blood type owns one map entry. Movements take the entry's write guard
//! for the whole read-check-write, so debits on the same type serialise while
//! other types proceed in parallel.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::ports::{InventoryRepository, InventoryRepositoryError};
use crate::domain::{BloodType, InventoryRecord, Units};

/// [`InventoryRepository`] backed by a [`DashMap`].
#[derive(Debug, Default)]
pub struct MemoryInventoryRepository {
    stock: DashMap<BloodType, u32>,
}

impl MemoryInventoryRepository {
    /// Create an empty inventory with no records.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepository for MemoryInventoryRepository {
    async fn list_all(&self) -> Result<Vec<InventoryRecord>, InventoryRepositoryError> {
        let mut records: Vec<InventoryRecord> = self
            .stock
            .iter()
            .map(|entry| InventoryRecord {
                blood_type: *entry.key(),
                quantity: *entry.value(),
            })
            .collect();
        records.sort_by_key(|record| record.blood_type);
        Ok(records)
    }

    async fn find(
        &self,
        blood_type: BloodType,
    ) -> Result<Option<InventoryRecord>, InventoryRepositoryError> {
        Ok(self.stock.get(&blood_type).map(|quantity| InventoryRecord {
            blood_type,
            quantity: *quantity,
        }))
    }

    async fn increment(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError> {
        let mut quantity = self.stock.entry(blood_type).or_insert(0);
        let next = quantity
            .checked_add(units.get())
            .filter(|total| *total <= Units::MAX)
            .ok_or_else(|| InventoryRepositoryError::query("stock counter overflow"))?;
        *quantity = next;
        Ok(InventoryRecord {
            blood_type,
            quantity: next,
        })
    }

    async fn decrement(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError> {
        let Some(mut quantity) = self.stock.get_mut(&blood_type) else {
            return Err(InventoryRepositoryError::insufficient_stock(0_u32));
        };
        let available = *quantity;
        let Some(remaining) = available.checked_sub(units.get()) else {
            return Err(InventoryRepositoryError::insufficient_stock(available));
        };
        *quantity = remaining;
        Ok(InventoryRecord {
            blood_type,
            quantity: remaining,
        })
    }

    async fn ensure_records(
        &self,
        blood_types: &[BloodType],
    ) -> Result<(), InventoryRepositoryError> {
        for blood_type in blood_types {
            self.stock.entry(*blood_type).or_insert(0);
        }
        Ok(())
    }
}
