//! PostgreSQL-backed `InventoryRepository`.
//!
//! Stock movements are single conditional statements, so the database row
//! lock serialises concurrent movements on the same blood type and a debit
//! can never drive `quantity` below zero.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InventoryRepository, InventoryRepositoryError};
use crate::domain::{BloodType, InventoryRecord, Units};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InventoryRow, RowDecodeError, units_column};
use super::pool::{DbPool, PoolError};
use super::schema::blood_inventory;

/// Diesel-backed stock counters.
#[derive(Clone)]
pub struct DieselInventoryRepository {
    pool: DbPool,
}

impl DieselInventoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InventoryRepositoryError {
    map_basic_pool_error(error, InventoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InventoryRepositoryError {
    map_basic_diesel_error(
        error,
        InventoryRepositoryError::query,
        InventoryRepositoryError::connection,
    )
}

fn map_decode_error(error: RowDecodeError) -> InventoryRepositoryError {
    InventoryRepositoryError::query(error.to_string())
}

#[async_trait]
impl InventoryRepository for DieselInventoryRepository {
    async fn list_all(&self) -> Result<Vec<InventoryRecord>, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<InventoryRow> = blood_inventory::table
            .select(InventoryRow::as_select())
            .order(blood_inventory::blood_type.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // SQL collation may not match the domain ordering.
        let mut records = rows
            .into_iter()
            .map(InventoryRow::into_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_decode_error)?;
        records.sort_by_key(|record| record.blood_type);
        Ok(records)
    }

    async fn find(
        &self,
        blood_type: BloodType,
    ) -> Result<Option<InventoryRecord>, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        blood_inventory::table
            .find(blood_type.code())
            .select(InventoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(InventoryRow::into_record)
            .transpose()
            .map_err(map_decode_error)
    }

    async fn increment(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let delta = units_column(units);
        let row = InventoryRow {
            blood_type: blood_type.code().to_owned(),
            quantity: delta,
        };

        diesel::insert_into(blood_inventory::table)
            .values(&row)
            .on_conflict(blood_inventory::blood_type)
            .do_update()
            .set(
                blood_inventory::quantity
                    .eq(blood_inventory::quantity + excluded(blood_inventory::quantity)),
            )
            .returning(InventoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_record()
            .map_err(map_decode_error)
    }

    async fn decrement(
        &self,
        blood_type: BloodType,
        units: Units,
    ) -> Result<InventoryRecord, InventoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let delta = units_column(units);

        let updated: Option<InventoryRow> = diesel::update(
            blood_inventory::table
                .filter(blood_inventory::blood_type.eq(blood_type.code()))
                .filter(blood_inventory::quantity.ge(delta)),
        )
        .set(blood_inventory::quantity.eq(blood_inventory::quantity - delta))
        .returning(InventoryRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = updated {
            return row.into_record().map_err(map_decode_error);
        }

        // Nothing matched: report what the row holds now.
        let available: Option<i32> = blood_inventory::table
            .find(blood_type.code())
            .select(blood_inventory::quantity)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let available = available
            .and_then(|quantity| u32::try_from(quantity).ok())
            .unwrap_or(0);
        Err(InventoryRepositoryError::insufficient_stock(available))
    }

    async fn ensure_records(
        &self,
        blood_types: &[BloodType],
    ) -> Result<(), InventoryRepositoryError> {
        let rows: Vec<InventoryRow> = blood_types
            .iter()
            .copied()
            .map(InventoryRow::empty)
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(blood_inventory::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
