use chrono::{DateTime, Local};
use once_cell::sync::Lazy;

use invoice_core::{CellValue, PageText, Profile, Record};

use crate::ident::document_identifier;
use crate::rule::{ExtractionRule, parse_integer, parse_money, parse_number};
use crate::units::{Chargeable, classify_chargeable};

/// Currency written when neither the subtotal line nor the body carries
/// a recognizable code.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Freight rule table, built once at startup.
///
/// Pieces/weight/volume is a layered chain: the combined row pattern is
/// the most reliable (all three numbers come from the same table row),
/// the weight+volume pair is next, and the three single-field rules are
/// last resorts applied only to still-unset values.
struct FreightRules {
    invoice_date: ExtractionRule,
    subtotal: ExtractionRule,
    currency_anywhere: ExtractionRule,
    shipper: ExtractionRule,
    row_full: ExtractionRule,
    row_weight_volume: ExtractionRule,
    pieces: ExtractionRule,
    weight: ExtractionRule,
    volume: ExtractionRule,
    chargeable: ExtractionRule,
    air_freight: ExtractionRule,
    sea_freight: ExtractionRule,
}

static RULES: Lazy<FreightRules> = Lazy::new(|| FreightRules {
    // "INVOICE DATE: 05-JAN-2024", "DATE: 01/05/2024", "Date: Jan 5, 2024"
    invoice_date: ExtractionRule::new(
        "invoice_date",
        &[
            r"(?i)\b(?:INVOICE\s+)?DATE\s*:?\s+(\d{1,2}[-/ ][A-Za-z]{3,9}[-/ ,]+\d{2,4}|[A-Za-z]{3,9}\s+\d{1,2},?\s+\d{2,4}|\d{1,2}[-/]\d{1,2}[-/]\d{2,4})",
        ],
    ),
    // Optional currency code group ahead of the amount; the hyphen in
    // "Sub-Total" is optional too.
    subtotal: ExtractionRule::new(
        "subtotal",
        &[r"(?i)SUB\s*-?\s*TOTAL\s*:?\s*(?:([A-Za-z]{3})\s+)?\$?\s*([\d,]+\.\d{2})"],
    ),
    currency_anywhere: ExtractionRule::new(
        "currency_anywhere",
        &[r"\b(USD|CAD|EUR|GBP|JPY|CNY|AUD|NZD|CHF|HKD|SGD|MXN)\b"],
    ),
    // Body after the label, up to a blank-line gap or the next all-caps
    // labeled header ("CONSIGNEE:", "PORT OF LOADING:", ...).
    shipper: ExtractionRule::new(
        "shipper",
        &[r"(?s)SHIPPER\s*:\s*(.+?)(?:\n\s*\n|\n[A-Z][A-Z0-9 /&.-]+:|\z)"],
    ),
    row_full: ExtractionRule::new(
        "row_full",
        &[
            r"(?i)(\d+)\s*(?:PCS|PIECES|PKGS?|CTNS?)[,;\s]+([\d,]+(?:\.\d+)?)\s*KGS?\b[,;\s]+([\d,]+(?:\.\d+)?)\s*(?:M3|CBM)\b",
        ],
    ),
    row_weight_volume: ExtractionRule::new(
        "row_weight_volume",
        &[r"(?i)([\d,]+(?:\.\d+)?)\s*KGS?\b[,;\s]+([\d,]+(?:\.\d+)?)\s*(?:M3|CBM)\b"],
    ),
    pieces: ExtractionRule::new("pieces", &[r"(?i)(\d+)\s*(?:PCS|PIECES|PACKAGES)\b"]),
    // Line-anchored so the WEIGHT token inside "CHARGEABLE WEIGHT:"
    // never feeds the gross-weight field.
    weight: ExtractionRule::new(
        "weight",
        &[r"(?im)^\s*(?:GROSS\s+)?WEIGHT\s*:?\s*([\d,]+(?:\.\d+)?)\s*KGS?\b"],
    ),
    volume: ExtractionRule::new(
        "volume",
        &[r"(?i)VOLUME\s*:?\s*([\d,]+(?:\.\d+)?)\s*(?:M3|CBM)\b"],
    ),
    chargeable: ExtractionRule::new(
        "chargeable",
        &[
            r"(?i)CHARGEABLE(?:\s+(?:WEIGHT|WT))?\s*:?\s*([\d,]+(?:\.\d+)?)\s*(KGS?|LBS?|M3|CBM)\b",
        ],
    ),
    air_freight: ExtractionRule::new(
        "air_freight",
        &[r"(?i)AIR\s*FREIGHT[^\n\d]*([\d,]+\.\d{2})"],
    ),
    sea_freight: ExtractionRule::new(
        "sea_freight",
        &[r"(?i)(?:SEA|OCEAN)\s*FREIGHT[^\n\d]*([\d,]+\.\d{2})"],
    ),
});

/// Extract a freight record from the concatenated document text.
pub fn extract(pages: &PageText, filename: &str, captured_at: DateTime<Local>) -> Record {
    let rules = &*RULES;
    let text = pages.joined();

    let invoice_date = rules
        .invoice_date
        .text(&text)
        .map(|d| d.to_uppercase());

    // Subtotal and currency share one pattern; the currency group is
    // optional and feeds the fallback chain below.
    let subtotal_caps = rules.subtotal.captures(&text);
    let subtotal = subtotal_caps
        .as_ref()
        .and_then(|c| c.get(2))
        .and_then(|m| parse_money(m.as_str()));
    let currency = subtotal_caps
        .as_ref()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_uppercase())
        .or_else(|| rules.currency_anywhere.text(&text))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let shipper = rules.shipper.capture(&text).map(collapse_whitespace);

    let (pieces, weight_kg, volume_m3) = cargo_row(&text);

    let (chargeable_kg, chargeable_cbm) = match rules.chargeable.captures(&text) {
        Some(caps) => {
            let value = parse_number(&caps[1]);
            let unit = &caps[2];
            match value.map(|v| classify_chargeable(v, unit)) {
                Some(Chargeable::WeightKg(kg)) => (Some(kg), None),
                Some(Chargeable::VolumeCbm(cbm)) => (None, Some(cbm)),
                None => (None, None),
            }
        }
        None => (None, None),
    };

    let (freight_mode, freight_rate) = if let Some(rate) = rules.air_freight.money(&text) {
        (Some("Air".to_string()), Some(rate))
    } else if let Some(rate) = rules.sea_freight.money(&text) {
        (Some("Sea".to_string()), Some(rate))
    } else {
        (None, None)
    };

    Record::new(
        Profile::Freight,
        vec![
            Some(CellValue::Timestamp(captured_at)),
            Some(CellValue::Text(document_identifier(filename))),
            invoice_date.map(CellValue::Text),
            Some(CellValue::Text(currency)),
            shipper.map(CellValue::Text),
            weight_kg.map(CellValue::Number),
            volume_m3.map(CellValue::Number),
            chargeable_kg.map(CellValue::Number),
            chargeable_cbm.map(CellValue::Number),
            pieces.map(CellValue::Integer),
            subtotal.map(CellValue::Number),
            freight_mode.map(CellValue::Text),
            freight_rate.map(CellValue::Number),
        ],
    )
}

/// Layered pieces / gross weight / volume resolution. Invoices vary in
/// whether the three numbers share a table row or are scattered, so each
/// fallback layer only fills values the previous layers left unset.
fn cargo_row(text: &str) -> (Option<i64>, Option<f64>, Option<f64>) {
    let rules = &*RULES;
    let mut pieces = None;
    let mut weight = None;
    let mut volume = None;

    if let Some(caps) = rules.row_full.captures(text) {
        pieces = parse_integer(&caps[1]);
        weight = parse_number(&caps[2]);
        volume = parse_number(&caps[3]);
    }
    if weight.is_none() || volume.is_none() {
        if let Some(caps) = rules.row_weight_volume.captures(text) {
            if weight.is_none() {
                weight = parse_number(&caps[1]);
            }
            if volume.is_none() {
                volume = parse_number(&caps[2]);
            }
        }
    }
    if pieces.is_none() {
        pieces = rules.pieces.integer(text);
    }
    if weight.is_none() {
        weight = rules.weight.capture(text).and_then(parse_number);
    }
    if volume.is_none() {
        volume = rules.volume.capture(text).and_then(parse_number);
    }

    (pieces, weight, volume)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
