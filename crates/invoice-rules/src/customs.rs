use chrono::{DateTime, Local};
use once_cell::sync::Lazy;

use invoice_core::{CellValue, PageText, Profile, Record};

use crate::rule::ExtractionRule;

/// Customs-broker rule table, built once at startup.
struct CustomsRules {
    reference: ExtractionRule,
    broker_fee: ExtractionRule,
    commercial_value: ExtractionRule,
    duties: ExtractionRule,
    gst_hst: ExtractionRule,
}

static RULES: Lazy<CustomsRules> = Lazy::new(|| CustomsRules {
    // All three labels gate on the "13…" transaction-number prefix;
    // a bare number elsewhere on the page must not match.
    reference: ExtractionRule::new(
        "reference",
        &[
            r"Reference:\s*(13[\d-]+)",
            r"Customs Transaction:\s*(13[\d-]+)",
            r"Cargo Control Number:\s*(13[\d-]+)",
        ],
    ),
    broker_fee: ExtractionRule::new(
        "broker_fee",
        &[r"Amount\s+Due\s*:?\s*CAD\s*([\d,]+\.\d{2})"],
    ),
    commercial_value: ExtractionRule::new(
        "commercial_value",
        &[r"Value for Fee \(CDN\):\s*([\d,]+\.\d{2})"],
    ),
    duties: ExtractionRule::new("duties", &[r"Duties\s*=\s*\$([\d,]+\.\d{2})"]),
    gst_hst: ExtractionRule::new("gst_hst", &[r"GST\s*=\s*\$([\d,]+\.\d{2})"]),
});

/// Extract a customs-broker record.
///
/// Reference and broker fee live on page 1 only. Commercial value,
/// duties, and GST may appear on any page; the scan walks pages in
/// order, keeps the first match per field, and stops early once every
/// field is set. Early exit never changes which match wins — earlier
/// pages always take precedence.
pub fn extract(pages: &PageText, filename: &str, captured_at: DateTime<Local>) -> Record {
    let rules = &*RULES;
    let page1 = pages.first_page();

    let reference = rules.reference.text(page1);
    let broker_fee = rules.broker_fee.money(page1);

    let mut commercial_value = None;
    let mut duties = None;
    let mut gst_hst = None;

    for text in pages.pages() {
        if commercial_value.is_none() {
            commercial_value = rules.commercial_value.money(text);
        }
        if duties.is_none() {
            duties = rules.duties.money(text);
        }
        if gst_hst.is_none() {
            gst_hst = rules.gst_hst.money(text);
        }
        if commercial_value.is_some() && duties.is_some() && gst_hst.is_some() {
            break;
        }
    }

    Record::new(
        Profile::Customs,
        vec![
            Some(CellValue::Timestamp(captured_at)),
            Some(CellValue::Text(filename.to_string())),
            reference.map(CellValue::Text),
            commercial_value.map(CellValue::Number),
            gst_hst.map(CellValue::Number),
            duties.map(CellValue::Number),
            broker_fee.map(CellValue::Number),
        ],
    )
}
