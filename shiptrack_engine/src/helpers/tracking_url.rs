use std::fmt::Display;

use serde::{Deserialize, Serialize};

const PLACEHOLDER: &str = "{tracking_number}";

/// Builds the public tracking page URL for a tracking number.
///
/// The template may contain a `{tracking_number}` placeholder. If it does not, the tracking number is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingUrlTemplate(String);

impl Default for TrackingUrlTemplate {
    fn default() -> Self {
        Self("https://kargotakip.example.com/track?code={tracking_number}".to_string())
    }
}

impl Display for TrackingUrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TrackingUrlTemplate {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl TrackingUrlTemplate {
    pub fn render(&self, tracking_number: &str) -> String {
        let tracking_number = tracking_number.trim();
        if self.0.contains(PLACEHOLDER) {
            self.0.replace(PLACEHOLDER, tracking_number)
        } else {
            format!("{}{tracking_number}", self.0)
        }
    }
}
