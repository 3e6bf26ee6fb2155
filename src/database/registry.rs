use std::collections::HashMap;
use std::future::Future;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use super::sqlx::CREATE_LCVS_TABLE;
use crate::domain::VehicleId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A vehicle as stored in the registry. Positions are supplied per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LcvRecord {
    pub id: VehicleId,
    pub capacity: f64,
}

/// Source of vehicle records, looked up by id.
pub trait VehicleRegistry {
    /// `Ok(None)` means the id is not registered.
    fn find_vehicle(
        &self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<LcvRecord>, RegistryError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SqliteVehicleRegistry {
    pool: SqlitePool,
}

impl SqliteVehicleRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_vehicles(&self) -> Result<Vec<LcvRecord>, RegistryError> {
        let rows: Vec<(i64, f64)> = sqlx::query_as("SELECT id, capacity FROM lcvs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, capacity)| LcvRecord { id, capacity })
            .collect())
    }

    pub async fn upsert_vehicle(&self, record: LcvRecord) -> Result<(), RegistryError> {
        sqlx::query("INSERT OR REPLACE INTO lcvs (id, capacity) VALUES (?, ?)")
            .bind(record.id)
            .bind(record.capacity)
            .execute(&self.pool)
            .await?;
        debug!("Stored LCV {} with capacity {}", record.id, record.capacity);
        Ok(())
    }

    /// Drop the table and repopulate it with `fleet` in one transaction.
    pub async fn reset_fleet(&self, fleet: &[LcvRecord]) -> Result<(), RegistryError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS lcvs")
            .execute(&mut *tx)
            .await?;
        sqlx::query(CREATE_LCVS_TABLE).execute(&mut *tx).await?;
        for record in fleet {
            sqlx::query("INSERT INTO lcvs (id, capacity) VALUES (?, ?)")
                .bind(record.id)
                .bind(record.capacity)
                .execute(&mut *tx)
                .await?;
            debug!("Adding LCV: {}, Capacity: {}", record.id, record.capacity);
        }
        tx.commit().await?;
        info!("Registry reset with {} LCVs", fleet.len());
        Ok(())
    }
}

impl VehicleRegistry for SqliteVehicleRegistry {
    async fn find_vehicle(&self, id: VehicleId) -> Result<Option<LcvRecord>, RegistryError> {
        let row: Option<(i64, f64)> =
            sqlx::query_as("SELECT id, capacity FROM lcvs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id, capacity)| LcvRecord { id, capacity }))
    }
}

/// Registry held in memory, for tests and CSV-driven runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    records: HashMap<VehicleId, LcvRecord>,
}

impl InMemoryRegistry {
    pub fn new(records: impl IntoIterator<Item = LcvRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id, r)).collect(),
        }
    }
}

impl VehicleRegistry for InMemoryRegistry {
    async fn find_vehicle(&self, id: VehicleId) -> Result<Option<LcvRecord>, RegistryError> {
        Ok(self.records.get(&id).copied())
    }
}
