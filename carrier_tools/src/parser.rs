//! Tolerant extraction of tracking data from carrier responses.
//!
//! Two tag dialects are in the wild for the same information: the English one used by the current service and a
//! localized one still served by older deployments. Each extractor tries the dialects in [`DIALECTS`] order. None of
//! the functions in this module fail: malformed or unrecognised input simply yields nothing.
use log::*;
use roxmltree::{Document, Node};
use shiptrack_common::Movement;

use crate::{ReceiverDetails, ShipmentReport};

/// One tag vocabulary. Each field lists the accepted element names, compared case-insensitively on the local name.
#[derive(Debug, Clone, Copy)]
pub struct Dialect {
    pub name: &'static str,
    pub movement: &'static [&'static str],
    pub date: &'static [&'static str],
    pub time: &'static [&'static str],
    pub location: &'static [&'static str],
    pub description: &'static [&'static str],
    pub tracking_number: &'static [&'static str],
    pub status: &'static [&'static str],
    pub receiver_name: &'static [&'static str],
    pub receiver_address: &'static [&'static str],
    pub city: &'static [&'static str],
    pub district: &'static [&'static str],
    pub phone: &'static [&'static str],
}

pub const ENGLISH: Dialect = Dialect {
    name: "english",
    movement: &["Movement", "TrackingEvent"],
    date: &["Date", "EventDate"],
    time: &["Time", "EventTime"],
    location: &["Location", "Unit"],
    description: &["Description", "EventDescription"],
    tracking_number: &["TrackingNumber", "TrackingNo"],
    status: &["StatusText", "ShipmentStatus"],
    receiver_name: &["ReceiverName"],
    receiver_address: &["ReceiverAddress", "Address"],
    city: &["City"],
    district: &["District", "Town"],
    phone: &["ReceiverPhone", "Phone"],
};

pub const LOCALIZED: Dialect = Dialect {
    name: "localized",
    movement: &["Hareket", "KargoHareket"],
    date: &["IslemTarihi", "Tarih"],
    time: &["IslemSaati", "Saat"],
    location: &["Birim", "Yer"],
    description: &["Aciklama", "IslemAciklama"],
    tracking_number: &["KargoTakipNo", "TakipNo"],
    status: &["DurumAciklama", "KargoDurumu"],
    receiver_name: &["AliciAdi"],
    receiver_address: &["AliciAdres", "Adres"],
    city: &["Il", "Sehir"],
    district: &["Ilce"],
    phone: &["AliciTelefon", "Telefon"],
};

/// Extraction order. The first dialect that yields a result wins.
pub const DIALECTS: [&Dialect; 2] = [&ENGLISH, &LOCALIZED];

/// Extracts the movement history, most recent first. Returns an empty list if neither dialect matches.
pub fn extract(raw_body: &str) -> Vec<Movement> {
    match parse(raw_body) {
        Some(doc) => extract_movements(&doc),
        None => vec![],
    }
}

/// Extracts the movement history along with the shipment-level fields. Each field falls back through the dialects
/// independently, so a response mixing dialects is read as completely as possible.
pub fn extract_report(raw_body: &str) -> ShipmentReport {
    let mut report = ShipmentReport { raw_body: raw_body.to_string(), ..Default::default() };
    let doc = match parse(raw_body) {
        Some(doc) => doc,
        None => return report,
    };
    report.movements = extract_movements(&doc);
    report.tracking_number = first_match(&doc, |d| d.tracking_number);
    report.status_text = first_match(&doc, |d| d.status);
    report
}

/// Extracts receiver details. Every field is optional and resolved on its own.
pub fn extract_receiver(raw_body: &str) -> ReceiverDetails {
    let doc = match parse(raw_body) {
        Some(doc) => doc,
        None => return ReceiverDetails::default(),
    };
    ReceiverDetails {
        name: first_match(&doc, |d| d.receiver_name),
        address: first_match(&doc, |d| d.receiver_address),
        city: first_match(&doc, |d| d.city),
        district: first_match(&doc, |d| d.district),
        phone: first_match(&doc, |d| d.phone),
    }
}

fn parse(raw_body: &str) -> Option<Document<'_>> {
    let trimmed = raw_body.trim_start_matches('\u{feff}').trim_start();
    match Document::parse(trimmed) {
        Ok(doc) => Some(doc),
        Err(e) => {
            debug!("🔍️ Carrier response is not well-formed XML. {e}");
            None
        },
    }
}

fn extract_movements(doc: &Document) -> Vec<Movement> {
    for dialect in DIALECTS {
        let movements = doc
            .descendants()
            .filter(|n| is_one_of(n, dialect.movement))
            .map(|n| Movement {
                date: child_text(&n, dialect.date).unwrap_or_default(),
                time: child_text(&n, dialect.time).unwrap_or_default(),
                location: child_text(&n, dialect.location).unwrap_or_default(),
                description: child_text(&n, dialect.description).unwrap_or_default(),
            })
            .filter(|m| !m.is_empty())
            .collect::<Vec<Movement>>();
        if !movements.is_empty() {
            trace!("🔍️ {} movements matched the {} dialect", movements.len(), dialect.name);
            return most_recent_first(movements);
        }
    }
    trace!("🔍️ No movements found in either dialect");
    vec![]
}

/// Sorts newest first when every movement has a readable timestamp. Otherwise the carrier's order is kept.
fn most_recent_first(mut movements: Vec<Movement>) -> Vec<Movement> {
    if movements.iter().all(|m| m.timestamp().is_some()) {
        movements.sort_by_key(|m| std::cmp::Reverse(m.timestamp()));
    }
    movements
}

/// First non-empty value for a document-level field, looking outside movement containers only.
fn first_match<F>(doc: &Document, field: F) -> Option<String>
where F: Fn(&Dialect) -> &'static [&'static str] {
    DIALECTS.into_iter().find_map(|dialect| {
        doc.descendants()
            .filter(|n| is_one_of(n, field(dialect)))
            .filter(|n| !inside_movement(n))
            .find_map(|n| text_of(&n))
    })
}

fn child_text(node: &Node, names: &[&str]) -> Option<String> {
    node.descendants().skip(1).filter(|n| is_one_of(n, names)).find_map(|n| text_of(&n))
}

fn inside_movement(node: &Node) -> bool {
    node.ancestors().skip(1).any(|a| DIALECTS.iter().any(|d| is_one_of(&a, d.movement)))
}

fn is_one_of(node: &Node, names: &[&str]) -> bool {
    node.is_element() && names.iter().any(|name| node.tag_name().name().eq_ignore_ascii_case(name))
}

fn text_of(node: &Node) -> Option<String> {
    let text = node.descendants().filter(|n| n.is_text()).filter_map(|n| n.text()).collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
