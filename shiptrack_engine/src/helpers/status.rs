//! Maps the carrier's free-text status wording onto [`CanonicalStatus`].
//!
//! Rules are checked in order and the first one with a matching keyword wins. Keywords are matched as
//! case-insensitive substrings, so the order matters: "Out for delivery" contains "delivery" and is caught by the
//! courier rule before the "delivered" rule is ever considered, while "Delivered" contains neither "courier" nor
//! "delivery" and falls through to rule five.
use log::{trace, warn};

use crate::db_types::CanonicalStatus;

struct Rule {
    keywords: &'static [&'static str],
    status: CanonicalStatus,
}

// Keywords are stored pre-folded (lowercase, ASCII-only) so that they compare against `fold`ed input.
const RULES: [Rule; 7] = [
    Rule { keywords: &["received", "accepted", "kabul edildi", "teslim alindi"], status: CanonicalStatus::PickedUp },
    Rule {
        keywords: &["transfer", "in transit", "on the way", "yolda", "aktarma"],
        status: CanonicalStatus::InTransit,
    },
    Rule { keywords: &["distribution", "hub", "dagitim merkezi", "subede"], status: CanonicalStatus::InDistribution },
    Rule { keywords: &["courier", "delivery", "kurye", "dagitimda"], status: CanonicalStatus::OutForDelivery },
    Rule { keywords: &["delivered", "teslim edildi"], status: CanonicalStatus::Delivered },
    Rule {
        keywords: &["undeliverable", "teslim edilemedi"],
        status: CanonicalStatus::NotDelivered,
    },
    Rule { keywords: &["returned to sender", "return to sender", "iade"], status: CanonicalStatus::Returned },
];

/// Lowercases the text and folds the Turkish letters the carrier uses onto their ASCII base letters.
fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| *c != '\u{0307}')
        .map(|c| match c {
            'ı' => 'i',
            'ğ' => 'g',
            'ş' => 's',
            'ç' => 'c',
            'ö' => 'o',
            'ü' => 'u',
            c => c,
        })
        .collect()
}

/// Returns the canonical status for the first matching rule, or `None` if no rule matches.
pub fn try_normalize(vendor_text: &str) -> Option<CanonicalStatus> {
    let folded = fold(vendor_text);
    RULES.iter().find(|rule| rule.keywords.iter().any(|k| folded.contains(k))).map(|rule| rule.status)
}

/// Maps vendor status text to a canonical status. Unrecognised text maps to `IN_TRANSIT`.
pub fn normalize(vendor_text: &str) -> CanonicalStatus {
    match try_normalize(vendor_text) {
        Some(status) => {
            trace!("🔍️ '{vendor_text}' normalized to {status}");
            status
        },
        None => {
            warn!("🔍️ Unrecognised carrier status '{vendor_text}'. Assuming {}", CanonicalStatus::InTransit);
            CanonicalStatus::InTransit
        },
    }
}
