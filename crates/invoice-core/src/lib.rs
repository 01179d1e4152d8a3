pub mod backend;
pub mod record;

// Re-export for convenience
pub use backend::{BackendError, PageText, PdfBackend};
pub use record::{CellValue, Record};

/// Invoice layout variant. Selects the schema and the extractor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Customs-broker invoice (reference, commercial value, duties, GST, fee).
    Customs,
    /// Freight invoice (shipper, weights, volumes, subtotal, freight rate).
    Freight,
}

/// Output columns of the customs-broker schema, in export order.
pub const CUSTOMS_COLUMNS: &[&str] = &[
    "Timestamp",
    "Filename",
    "Reference",
    "Commercial_Value",
    "GST_HST",
    "Duties",
    "Broker_Fee",
];

/// Output columns of the freight schema, in export order.
pub const FREIGHT_COLUMNS: &[&str] = &[
    "Timestamp",
    "Filename",
    "Invoice_Date",
    "Currency",
    "Shipper",
    "Weight_KG",
    "Volume_M3",
    "Chargeable_KG",
    "Chargeable_CBM",
    "Pieces",
    "Subtotal",
    "Freight_Mode",
    "Freight_Rate",
];

impl Profile {
    /// The fixed column list for this profile. Every [`Record`] carries
    /// exactly these columns, in this order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Profile::Customs => CUSTOMS_COLUMNS,
            Profile::Freight => FREIGHT_COLUMNS,
        }
    }
}
