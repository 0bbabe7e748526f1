//! PostgreSQL-backed `BloodRequestRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BloodRequestRepository, BloodRequestRepositoryError};
use crate::domain::{BloodRequest, RequestStatus, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BloodRequestRow, NewBloodRequestRow, RowDecodeError};
use super::pool::{DbPool, PoolError};
use super::schema::blood_requests;

/// Diesel-backed blood request store.
#[derive(Clone)]
pub struct DieselBloodRequestRepository {
    pool: DbPool,
}

impl DieselBloodRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BloodRequestRepositoryError {
    map_basic_pool_error(error, BloodRequestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BloodRequestRepositoryError {
    map_basic_diesel_error(
        error,
        BloodRequestRepositoryError::query,
        BloodRequestRepositoryError::connection,
    )
}

fn map_decode_error(error: RowDecodeError) -> BloodRequestRepositoryError {
    BloodRequestRepositoryError::query(error.to_string())
}

fn decode(rows: Vec<BloodRequestRow>) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
    rows.into_iter()
        .map(|row| row.into_request().map_err(map_decode_error))
        .collect()
}

#[async_trait]
impl BloodRequestRepository for DieselBloodRequestRepository {
    async fn insert(&self, request: &BloodRequest) -> Result<(), BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(blood_requests::table)
            .values(&NewBloodRequestRow::from(request))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: RequestStatus,
    ) -> Result<Option<BloodRequest>, BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(blood_requests::table.find(id))
            .set(blood_requests::status.eq(status.as_str()))
            .returning(BloodRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(BloodRequestRow::into_request)
            .transpose()
            .map_err(map_decode_error)
    }

    async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BloodRequestRow> = blood_requests::table
            .filter(blood_requests::status.eq(status.as_str()))
            .order(blood_requests::created_at.desc())
            .select(BloodRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode(rows)
    }

    async fn list_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<BloodRequest>, BloodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BloodRequestRow> = blood_requests::table
            .filter(blood_requests::recipient_id.eq(recipient.as_uuid()))
            .order(blood_requests::created_at.desc())
            .select(BloodRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode(rows)
    }
}
