use chrono::{DateTime, Duration, Timelike, Utc};

use crate::db_types::CanonicalStatus;

/// Shipments reaching the distribution centre before this hour (UTC) are usually delivered the same day.
pub const SAME_DAY_CUTOFF_HOUR: u32 = 15;

/// A rough guess at when a shipment will arrive, for display purposes only. Nothing in the engine acts on it.
///
/// `reference` is the most recent meaningful point in the shipment's history, typically its last movement, or the
/// dispatch time if no movement has been seen yet. Returns `None` when no delivery is expected (returned shipments).
pub fn estimate_delivery(
    status: CanonicalStatus,
    reference: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    use CanonicalStatus::*;
    match status {
        Created | PickedUp => Some(now + Duration::days(3)),
        InTransit if now - reference >= Duration::days(2) => Some(now + Duration::days(1)),
        InTransit => Some(now + Duration::days(2)),
        InDistribution if now.hour() < SAME_DAY_CUTOFF_HOUR => Some(now),
        InDistribution => Some(now + Duration::days(1)),
        OutForDelivery => Some(now + Duration::hours(4)),
        Delivered => Some(now),
        NotDelivered => Some(now + Duration::days(1)),
        Returned => None,
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap()
    }

    #[test]
    fn in_transit_speeds_up_when_stale() {
        let now = at(10, 9);
        assert_eq!(estimate_delivery(CanonicalStatus::InTransit, at(9, 9), now), Some(at(12, 9)));
        assert_eq!(estimate_delivery(CanonicalStatus::InTransit, at(8, 9), now), Some(at(11, 9)));
    }

    #[test]
    fn distribution_cutoff() {
        let s = CanonicalStatus::InDistribution;
        assert_eq!(estimate_delivery(s, at(10, 8), at(10, 14)), Some(at(10, 14)));
        assert_eq!(estimate_delivery(s, at(10, 8), at(10, 15)), Some(at(11, 15)));
    }

    #[test]
    fn other_statuses() {
        let now = at(10, 12);
        assert_eq!(estimate_delivery(CanonicalStatus::PickedUp, now, now), Some(at(13, 12)));
        assert_eq!(estimate_delivery(CanonicalStatus::Created, now, now), Some(at(13, 12)));
        assert_eq!(estimate_delivery(CanonicalStatus::OutForDelivery, now, now), Some(at(10, 16)));
        assert_eq!(estimate_delivery(CanonicalStatus::Delivered, at(9, 12), now), Some(now));
        assert_eq!(estimate_delivery(CanonicalStatus::NotDelivered, now, now), Some(at(11, 12)));
        assert_eq!(estimate_delivery(CanonicalStatus::Returned, now, now), None);
    }
}
