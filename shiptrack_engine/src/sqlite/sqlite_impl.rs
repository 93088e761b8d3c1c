//! `SqliteDatabase` is the concrete shipment store shipped with the engine.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{db_url, new_pool, shipments};
use crate::{
    db_types::{NewShipment, OrderId, ShipmentRecord, ShipmentUpdate},
    traits::{ShipmentManagement, ShipmentStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl ShipmentManagement for SqliteDatabase {
    async fn insert_shipment(&self, shipment: NewShipment) -> Result<ShipmentRecord, ShipmentStoreError> {
        let mut conn = self.pool.acquire().await?;
        shipments::insert_shipment(shipment, &mut conn).await
    }

    async fn fetch_shipment(&self, order_id: &OrderId) -> Result<Option<ShipmentRecord>, ShipmentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let shipment = shipments::fetch_shipment_by_order_id(order_id, &mut conn).await?;
        Ok(shipment)
    }

    async fn fetch_reconciliation_candidates(&self, limit: i64) -> Result<Vec<ShipmentRecord>, ShipmentStoreError> {
        let mut conn = self.pool.acquire().await?;
        let candidates = shipments::fetch_reconciliation_candidates(limit, &mut conn).await?;
        Ok(candidates)
    }

    async fn apply_carrier_update(
        &self,
        order_id: &OrderId,
        expected_version: i64,
        update: ShipmentUpdate,
    ) -> Result<ShipmentRecord, ShipmentStoreError> {
        let mut conn = self.pool.acquire().await?;
        shipments::apply_carrier_update(order_id, expected_version, update, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the `STK_DATABASE_URL` environment variable.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        debug!("🗃️ Database connection pool closed");
    }
}
