use invoice_core::{BackendError, PageText, PdfBackend};

/// [`PdfBackend`] implementation over the pure-Rust `pdf-extract` crate.
///
/// This crate is the only place the PDF dependency appears; everything
/// downstream works against the backend trait, so tests run on canned
/// page text instead of real PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn extract_pages(&self, bytes: &[u8]) -> Result<PageText, BackendError> {
        // pdf-extract yields one string per page; a page with no text
        // layer comes back empty rather than failing the document.
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| BackendError::Unreadable(e.to_string()))?;
        Ok(PageText::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_unreadable() {
        let backend = PdfExtractBackend::new();
        let err = backend.extract_pages(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, BackendError::Unreadable(_)));
    }
}
