use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   CanonicalStatus     ---------------------------------------------------------
/// Our own view of where a shipment is, independent of the carrier's wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalStatus {
    /// Registered with the carrier, but not yet handed over.
    Created,
    PickedUp,
    InTransit,
    InDistribution,
    OutForDelivery,
    Delivered,
    /// A delivery attempt failed. The carrier will usually try again.
    NotDelivered,
    Returned,
}

impl CanonicalStatus {
    /// Terminal shipments are no longer polled once they have a tracking number.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Returned)
    }

    /// Transitions into these statuses are worth telling someone about.
    pub fn is_notifiable(&self) -> bool {
        matches!(self, Self::Delivered | Self::OutForDelivery | Self::NotDelivered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::InDistribution => "IN_DISTRIBUTION",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::NotDelivered => "NOT_DELIVERED",
            Self::Returned => "RETURNED",
        }
    }
}

impl Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid shipment status: {0}")]
pub struct ConversionError(String);

impl FromStr for CanonicalStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "PICKED_UP" => Ok(Self::PickedUp),
            "IN_TRANSIT" => Ok(Self::InTransit),
            "IN_DISTRIBUTION" => Ok(Self::InDistribution),
            "OUT_FOR_DELIVERY" => Ok(Self::OutForDelivery),
            "DELIVERED" => Ok(Self::Delivered),
            "NOT_DELIVERED" => Ok(Self::NotDelivered),
            "RETURNED" => Ok(Self::Returned),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------        OrderId        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------    ShipmentRecord     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: i64,
    pub order_id: OrderId,
    /// The carrier's key for the shipment, obtained at registration. Required to query the carrier.
    pub integration_code: Option<String>,
    /// The public tracking number. Empty until the carrier has ingested the shipment; never cleared afterwards.
    pub tracking_number: Option<String>,
    pub canonical_status: CanonicalStatus,
    /// The carrier's last status wording, verbatim.
    pub vendor_status_text: Option<String>,
    pub last_movement_at: Option<DateTime<Utc>>,
    pub dispatched_at: DateTime<Utc>,
    pub tracking_url: Option<String>,
    pub fulfilled: bool,
    /// Incremented on every write. Updates must name the version they were derived from.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShipmentRecord {
    pub fn integration_code(&self) -> Option<&str> {
        self.integration_code.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn has_tracking_number(&self) -> bool {
        self.tracking_number().is_some()
    }

    /// Whether a reconciliation pass should look at this shipment at all.
    pub fn is_reconciliation_candidate(&self) -> bool {
        self.integration_code().is_some() && (!self.has_tracking_number() || !self.canonical_status.is_terminal())
    }
}

//--------------------------------------      NewShipment      ---------------------------------------------------------
/// A shipment as handed over by the registration flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShipment {
    pub order_id: OrderId,
    pub integration_code: String,
    pub dispatched_at: DateTime<Utc>,
}

impl NewShipment {
    pub fn new<S: Into<String>>(order_id: OrderId, integration_code: S, dispatched_at: DateTime<Utc>) -> Self {
        Self { order_id, integration_code: integration_code.into(), dispatched_at }
    }
}

//--------------------------------------    ShipmentUpdate     ---------------------------------------------------------
/// The fields a reconciliation pass may write. `None` leaves the stored value alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentUpdate {
    pub canonical_status: CanonicalStatus,
    /// Only applied if the stored tracking number is still empty.
    pub tracking_number: Option<String>,
    /// Only applied together with `tracking_number`.
    pub tracking_url: Option<String>,
    pub vendor_status_text: Option<String>,
    pub last_movement_at: Option<DateTime<Utc>>,
    /// Sets the fulfilled flag. `false` never clears it.
    pub fulfilled: bool,
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;

    fn record(integration_code: Option<&str>, tracking: Option<&str>, status: CanonicalStatus) -> ShipmentRecord {
        ShipmentRecord {
            id: 1,
            order_id: OrderId::from("1001"),
            integration_code: integration_code.map(String::from),
            tracking_number: tracking.map(String::from),
            canonical_status: status,
            vendor_status_text: None,
            last_movement_at: None,
            dispatched_at: Utc::now(),
            tracking_url: None,
            fulfilled: false,
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_round_trip_and_flags() {
        assert_eq!("OUT_FOR_DELIVERY".parse::<CanonicalStatus>().unwrap(), CanonicalStatus::OutForDelivery);
        assert!("on_hold".parse::<CanonicalStatus>().is_err());
        assert!(CanonicalStatus::Returned.is_terminal());
        assert!(!CanonicalStatus::NotDelivered.is_terminal());
        assert!(CanonicalStatus::NotDelivered.is_notifiable());
        assert!(!CanonicalStatus::InDistribution.is_notifiable());
        let json = serde_json::to_string(&CanonicalStatus::InDistribution).unwrap();
        assert_eq!(json, "\"IN_DISTRIBUTION\"");
    }

    #[test]
    fn candidates() {
        use CanonicalStatus::*;
        assert!(!record(None, None, Created).is_reconciliation_candidate());
        assert!(!record(Some("  "), None, Created).is_reconciliation_candidate());
        assert!(record(Some("INT"), None, Created).is_reconciliation_candidate());
        assert!(record(Some("INT"), Some(""), Delivered).is_reconciliation_candidate());
        assert!(record(Some("INT"), Some("TN"), InTransit).is_reconciliation_candidate());
        assert!(!record(Some("INT"), Some("TN"), Delivered).is_reconciliation_candidate());
        assert!(!record(Some("INT"), Some("TN"), Returned).is_reconciliation_candidate());
    }
}
