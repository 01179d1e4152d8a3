use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Unreadable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-page text of one document, in page order.
///
/// A page with no text layer (e.g. a scanned page) is an empty string,
/// never a missing entry, so page indices stay stable.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    pages: Vec<String>,
}

impl PageText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Text of the first page, or `""` for an empty document.
    pub fn first_page(&self) -> &str {
        self.pages.first().map(String::as_str).unwrap_or("")
    }

    /// All pages joined with a line break, so tokens never run together
    /// across a page boundary.
    pub fn joined(&self) -> String {
        self.pages.join("\n")
    }
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level text acquisition step; the field
/// extraction pipeline lives in `invoice-rules`. A backend must not fail
/// on pages that simply have no text layer — those come back as empty
/// strings. Only a container that cannot be opened at all is an error.
pub trait PdfBackend: Send + Sync {
    /// Extract per-page text from raw PDF bytes.
    fn extract_pages(&self, bytes: &[u8]) -> Result<PageText, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_empty_document_is_empty() {
        let pages = PageText::default();
        assert_eq!(pages.first_page(), "");
        assert_eq!(pages.joined(), "");
    }

    #[test]
    fn joined_inserts_page_breaks() {
        let pages = PageText::new(vec!["Duties = $1.00".into(), "GST = $2.00".into()]);
        assert_eq!(pages.joined(), "Duties = $1.00\nGST = $2.00");
        assert_eq!(pages.first_page(), "Duties = $1.00");
    }
}
