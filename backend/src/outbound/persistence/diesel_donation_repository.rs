//! PostgreSQL-backed `DonationRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonationRepository, DonationRepositoryError};
use crate::domain::{Donation, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DonationRow, NewDonationRow};
use super::pool::{DbPool, PoolError};
use super::schema::donations;

/// Diesel-backed donation log.
#[derive(Clone)]
pub struct DieselDonationRepository {
    pool: DbPool,
}

impl DieselDonationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DonationRepositoryError {
    map_basic_pool_error(error, DonationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DonationRepositoryError {
    map_basic_diesel_error(
        error,
        DonationRepositoryError::query,
        DonationRepositoryError::connection,
    )
}

fn decode(rows: Vec<DonationRow>) -> Result<Vec<Donation>, DonationRepositoryError> {
    rows.into_iter()
        .map(|row| {
            row.into_donation()
                .map_err(|err| DonationRepositoryError::query(err.to_string()))
        })
        .collect()
}

#[async_trait]
impl DonationRepository for DieselDonationRepository {
    async fn insert(&self, donation: &Donation) -> Result<(), DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(donations::table)
            .values(&NewDonationRow::from(donation))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for_donor(
        &self,
        donor: &UserId,
    ) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DonationRow> = donations::table
            .filter(donations::donor_id.eq(donor.as_uuid()))
            .order(donations::donation_date.desc())
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode(rows)
    }

    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DonationRow> = donations::table
            .order((donations::created_at.asc(), donations::id.asc()))
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode(rows)
    }
}
