use chrono::{DateTime, Local};

use invoice_core::{PageText, Profile, Record};

pub mod customs;
pub mod freight;
pub mod ident;
pub mod rule;
pub mod units;

pub use ident::document_identifier;
pub use rule::{ExtractionRule, parse_integer, parse_money, parse_number};
pub use units::{Chargeable, LB_TO_KG, to_kilograms};
// Re-export domain types from core (canonical definitions live there)
pub use invoice_core::{CellValue, CUSTOMS_COLUMNS, FREIGHT_COLUMNS};

/// Run the profile's extractor set over acquired page text and assemble
/// one record.
///
/// Pipeline per profile:
/// - Customs: page-1 fields (reference, broker fee), then a page-order
///   scan for commercial value, duties, and GST with first-match-wins.
/// - Freight: all fields resolved against the concatenated document
///   text; the stored identifier is derived from the filename.
///
/// A field whose pattern chain never matches becomes an absent cell;
/// extraction itself cannot fail.
pub fn extract_record(
    profile: Profile,
    pages: &PageText,
    filename: &str,
    captured_at: DateTime<Local>,
) -> Record {
    match profile {
        Profile::Customs => customs::extract(pages, filename, captured_at),
        Profile::Freight => freight::extract(pages, filename, captured_at),
    }
}
