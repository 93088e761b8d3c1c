//! SOAP 1.1 envelopes for outgoing requests, and fault detection for incoming responses.
use log::*;
use roxmltree::Document;
use shiptrack_common::helpers::normalize_whitespace;

use crate::{CarrierConfig, CarrierOperation};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Builds the request envelope for `op`.
///
/// The operation element sits directly under `soap:Body`. The carrier expects the credentials as the first children
/// of that element, followed by the query parameters in the order given.
pub fn build_envelope(op: CarrierOperation, config: &CarrierConfig, params: &[(&str, &str)]) -> String {
    let mut body = String::with_capacity(512);
    body.push_str(&element("username", &config.username));
    body.push_str(&element("password", config.password.reveal()));
    body.push_str(&element("customerCode", &config.customer_code));
    for (name, value) in params {
        body.push_str(&element(name, value));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><soap:Envelope \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
         xmlns:soap=\"{SOAP_ENV_NS}\"><soap:Body><{op} xmlns=\"{ns}\">{body}</{op}></soap:Body></soap:Envelope>",
        op = op.name(),
        ns = escape(&config.namespace),
    )
}

fn element(name: &str, value: &str) -> String {
    format!("<{name}>{}</{name}>", escape(value))
}

fn escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c => result.push(c),
        }
    }
    result
}

/// If `body` is a SOAP fault, returns the fault string.
///
/// SOAP 1.1 puts the message in `faultstring`, SOAP 1.2 in `Reason/Text`. Both are accepted. A body that looks like a
/// fault but cannot be parsed still counts as one.
pub fn extract_fault(body: &str) -> Option<String> {
    let doc = match Document::parse(body.trim_start_matches('\u{feff}').trim_start()) {
        Ok(doc) => doc,
        Err(e) => {
            if body.contains(":Fault>") || body.contains("<Fault>") {
                debug!("🚚️ Response contains a fault marker but is not well-formed XML. {e}");
                return Some("Unreadable SOAP fault".to_string());
            }
            return None;
        },
    };
    let fault = doc.descendants().find(|n| n.is_element() && n.tag_name().name() == "Fault")?;
    let message = fault
        .descendants()
        .filter(|n| n.is_element())
        .find(|n| matches!(n.tag_name().name(), "faultstring" | "Text"))
        .map(|n| n.descendants().filter_map(|t| t.is_text().then(|| t.text()).flatten()).collect::<String>())
        .map(|s| normalize_whitespace(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "SOAP fault without a fault string".to_string());
    Some(message)
}
