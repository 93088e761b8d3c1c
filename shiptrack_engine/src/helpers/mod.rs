mod delivery_estimate;
mod status;
mod tracking_url;

pub use delivery_estimate::{estimate_delivery, SAME_DAY_CUTOFF_HOUR};
pub use status::{normalize, try_normalize};
pub use tracking_url::TrackingUrlTemplate;
