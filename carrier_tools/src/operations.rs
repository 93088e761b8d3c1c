use std::fmt::Display;

/// The carrier operations this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierOperation {
    /// Status, tracking number and movement history for a registered shipment.
    QueryShipment,
    /// Receiver name and address details for a registered shipment.
    QueryReceiver,
}

impl CarrierOperation {
    /// The element name of the operation inside the SOAP body.
    pub fn name(&self) -> &'static str {
        match self {
            Self::QueryShipment => "QueryShipment",
            Self::QueryReceiver => "QueryReceiverInfo",
        }
    }

    /// The value of the `SOAPAction` header, e.g. `http://tempuri.org/QueryShipment`.
    pub fn soap_action(&self, namespace: &str) -> String {
        format!("{}/{}", namespace.trim_end_matches('/'), self.name())
    }
}

impl Display for CarrierOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::CarrierOperation;

    #[test]
    fn soap_actions() {
        let op = CarrierOperation::QueryShipment;
        assert_eq!(op.soap_action("http://tempuri.org/"), "http://tempuri.org/QueryShipment");
        assert_eq!(op.soap_action("http://tempuri.org"), "http://tempuri.org/QueryShipment");
        assert_eq!(CarrierOperation::QueryReceiver.to_string(), "QueryReceiverInfo");
    }
}
