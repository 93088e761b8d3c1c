use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewShipment, OrderId, ShipmentRecord, ShipmentUpdate},
    traits::ShipmentStoreError,
};

/// Inserts a new shipment with status `CREATED`. Fails with [`ShipmentStoreError::AlreadyExists`] if the order
/// already has a shipment.
pub async fn insert_shipment(
    shipment: NewShipment,
    conn: &mut SqliteConnection,
) -> Result<ShipmentRecord, ShipmentStoreError> {
    if fetch_shipment_by_order_id(&shipment.order_id, &mut *conn).await?.is_some() {
        return Err(ShipmentStoreError::AlreadyExists(shipment.order_id));
    }
    let record: ShipmentRecord = sqlx::query_as(
        r#"
            INSERT INTO shipments (order_id, integration_code, dispatched_at)
            VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(shipment.order_id)
    .bind(shipment.integration_code)
    .bind(shipment.dispatched_at)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Shipment for order {} inserted with id {}", record.order_id, record.id);
    Ok(record)
}

pub async fn fetch_shipment_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<ShipmentRecord>, sqlx::Error> {
    let shipment = sqlx::query_as("SELECT * FROM shipments WHERE order_id = $1")
        .bind(order_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(shipment)
}

/// Shipments that still need the carrier's attention: they have an integration code, and either no tracking number
/// yet or a non-terminal status. Shipments without a tracking number come first, then the oldest dispatches.
pub async fn fetch_reconciliation_candidates(
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<ShipmentRecord>, sqlx::Error> {
    let candidates = sqlx::query_as(
        r#"
            SELECT * FROM shipments
            WHERE integration_code IS NOT NULL AND trim(integration_code) <> ''
              AND (
                tracking_number IS NULL OR trim(tracking_number) = ''
                OR canonical_status NOT IN ('DELIVERED', 'RETURNED')
              )
            ORDER BY
              CASE WHEN tracking_number IS NULL OR trim(tracking_number) = '' THEN 0 ELSE 1 END,
              dispatched_at ASC,
              id ASC
            LIMIT $1;
        "#,
    )
    .bind(limit)
    .fetch_all(conn)
    .await?;
    trace!("🗃️ Fetched {} reconciliation candidates", candidates.len());
    Ok(candidates)
}

/// Applies a carrier-derived update in a single statement, provided the stored version still equals
/// `expected_version`.
///
/// The tracking number (and its URL) is only written if none is stored yet. `fulfilled` can be set but never cleared.
/// Vendor text and movement time are only overwritten by non-null values.
pub async fn apply_carrier_update(
    order_id: &OrderId,
    expected_version: i64,
    update: ShipmentUpdate,
    conn: &mut SqliteConnection,
) -> Result<ShipmentRecord, ShipmentStoreError> {
    let updated: Option<ShipmentRecord> = sqlx::query_as(
        r#"
            UPDATE shipments SET
                canonical_status = $1,
                tracking_number = CASE
                    WHEN tracking_number IS NULL OR trim(tracking_number) = '' THEN COALESCE($2, tracking_number)
                    ELSE tracking_number
                END,
                tracking_url = CASE
                    WHEN (tracking_number IS NULL OR trim(tracking_number) = '') AND $2 IS NOT NULL THEN $3
                    ELSE tracking_url
                END,
                vendor_status_text = COALESCE($4, vendor_status_text),
                last_movement_at = COALESCE($5, last_movement_at),
                fulfilled = (fulfilled OR $6),
                version = version + 1,
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $7 AND version = $8
            RETURNING *;
        "#,
    )
    .bind(update.canonical_status)
    .bind(update.tracking_number.filter(|t| !t.trim().is_empty()))
    .bind(update.tracking_url)
    .bind(update.vendor_status_text)
    .bind(update.last_movement_at)
    .bind(update.fulfilled)
    .bind(order_id.as_str())
    .bind(expected_version)
    .fetch_optional(&mut *conn)
    .await?;
    match updated {
        Some(record) => {
            debug!("🗃️ Shipment for order {order_id} updated to version {}", record.version);
            Ok(record)
        },
        None => match fetch_shipment_by_order_id(order_id, conn).await? {
            Some(_) => Err(ShipmentStoreError::VersionConflict(order_id.clone())),
            None => Err(ShipmentStoreError::ShipmentNotFound(order_id.clone())),
        },
    }
}
