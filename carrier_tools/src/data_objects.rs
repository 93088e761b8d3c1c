use serde::{Deserialize, Serialize};
use shiptrack_common::Movement;

/// Everything a shipment status query told us. Fields the carrier did not supply are `None` / empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentReport {
    pub tracking_number: Option<String>,
    pub status_text: Option<String>,
    /// Most recent first.
    pub movements: Vec<Movement>,
    /// The unmodified response body, kept for audit logs.
    pub raw_body: String,
}

impl ShipmentReport {
    pub fn latest_movement(&self) -> Option<&Movement> {
        self.movements.first()
    }

    /// The vendor's own words for the current state: the explicit status element if present, otherwise the
    /// description of the latest movement.
    pub fn vendor_status(&self) -> Option<&str> {
        self.status_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.latest_movement().map(|m| m.description.as_str()).filter(|s| !s.is_empty()))
    }

    /// False when the response carried nothing usable (the carrier typically hasn't ingested the shipment yet).
    pub fn has_data(&self) -> bool {
        self.tracking_number.is_some() || self.vendor_status().is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub phone: Option<String>,
}

impl ReceiverDetails {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() &&
            self.address.is_none() &&
            self.city.is_none() &&
            self.district.is_none() &&
            self.phone.is_none()
    }
}
