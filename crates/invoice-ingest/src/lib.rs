use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::Local;
use thiserror::Error;

// Re-export domain types for convenience
pub use invoice_core::{BackendError, PdfBackend, Profile, Record};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("document unreadable: {0}")]
    Backend(#[from] BackendError),
    #[error("document processing panicked")]
    Panicked,
}

/// One uploaded input: a display name plus the raw PDF bytes. Ephemeral;
/// dropped once the batch run ends.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A per-document failure notice. Deliberately opaque: no partial or
/// low-confidence record accompanies it.
#[derive(Debug, Clone)]
pub struct FailedDocument {
    pub name: String,
    pub reason: String,
}

/// Outcome of one batch run: successful records in submission order,
/// plus one notice per failed document.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<Record>,
    pub failures: Vec<FailedDocument>,
}

/// Parse one document: acquire page text, run the profile's extractor
/// set, assemble the record. Fields that never match become absent
/// cells; only an unreadable container fails the document.
pub fn parse_document(
    backend: &dyn PdfBackend,
    profile: Profile,
    bytes: &[u8],
    name: &str,
) -> Result<Record, IngestError> {
    let pages = backend.extract_pages(bytes)?;
    Ok(invoice_rules::extract_record(
        profile,
        &pages,
        name,
        Local::now(),
    ))
}

/// Process a batch sequentially. One bad document never aborts the
/// batch: faults (including a panicking PDF parser) are converted into
/// failure notices and the remaining documents still run.
pub fn process_batch(
    backend: &dyn PdfBackend,
    profile: Profile,
    documents: &[SourceDocument],
) -> BatchOutcome {
    process_batch_with(backend, profile, documents, |_, _| {})
}

/// [`process_batch`] with a per-document progress callback, invoked with
/// the document's index before it is processed.
pub fn process_batch_with(
    backend: &dyn PdfBackend,
    profile: Profile,
    documents: &[SourceDocument],
    mut progress: impl FnMut(usize, &SourceDocument),
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, document) in documents.iter().enumerate() {
        progress(index, document);

        let result = catch_unwind(AssertUnwindSafe(|| {
            parse_document(backend, profile, &document.bytes, &document.name)
        }))
        .unwrap_or(Err(IngestError::Panicked));

        match result {
            Ok(record) => {
                tracing::debug!(file = %document.name, "record extracted");
                outcome.records.push(record);
            }
            Err(e) => {
                tracing::warn!(file = %document.name, error = %e, "nothing extracted");
                outcome.failures.push(FailedDocument {
                    name: document.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_core::{CellValue, PageText};

    /// Canned backend: one entry per expected document, either pages or
    /// an unreadable-container failure.
    struct MockBackend {
        responses: Vec<Result<Vec<&'static str>, &'static str>>,
    }

    impl PdfBackend for MockBackend {
        fn extract_pages(&self, bytes: &[u8]) -> Result<PageText, BackendError> {
            let index = bytes[0] as usize;
            match &self.responses[index] {
                Ok(pages) => Ok(PageText::new(
                    pages.iter().map(|p| p.to_string()).collect(),
                )),
                Err(msg) => Err(BackendError::Unreadable((*msg).to_string())),
            }
        }
    }

    fn doc(index: u8, name: &str) -> SourceDocument {
        SourceDocument::new(name, vec![index])
    }

    #[test]
    fn unreadable_document_does_not_abort_the_batch() {
        let backend = MockBackend {
            responses: vec![
                Ok(vec!["Reference: 13-001\nDuties = $1.00"]),
                Err("corrupt stream"),
                Ok(vec!["Reference: 13-003"]),
            ],
        };
        let documents = vec![doc(0, "a.pdf"), doc(1, "b.pdf"), doc(2, "c.pdf")];

        let outcome = process_batch(&backend, Profile::Customs, &documents);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(
            outcome.records[0].get("Reference"),
            Some(&CellValue::Text("13-001".into()))
        );
        assert_eq!(
            outcome.records[1].get("Reference"),
            Some(&CellValue::Text("13-003".into()))
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "b.pdf");
    }

    #[test]
    fn parsing_is_idempotent_apart_from_the_timestamp() {
        let backend = MockBackend {
            responses: vec![Ok(vec!["Reference: 13-77\nGST = $9.99"])],
        };

        let first = parse_document(&backend, Profile::Customs, &[0], "x.pdf").unwrap();
        let second = parse_document(&backend, Profile::Customs, &[0], "x.pdf").unwrap();

        for column in Profile::Customs.columns() {
            if *column == "Timestamp" {
                continue;
            }
            assert_eq!(first.get(column), second.get(column), "column {column}");
        }
    }

    #[test]
    fn panicking_backend_becomes_a_failure_notice() {
        struct PanickingBackend;
        impl PdfBackend for PanickingBackend {
            fn extract_pages(&self, _bytes: &[u8]) -> Result<PageText, BackendError> {
                panic!("parser bug");
            }
        }

        let documents = vec![SourceDocument::new("bad.pdf", vec![])];
        let outcome = process_batch(&PanickingBackend, Profile::Freight, &documents);

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "bad.pdf");
    }

    #[test]
    fn progress_callback_sees_every_document_in_order() {
        let backend = MockBackend {
            responses: vec![Ok(vec![""]), Err("bad")],
        };
        let documents = vec![doc(0, "a.pdf"), doc(1, "b.pdf")];

        let mut seen = Vec::new();
        process_batch_with(&backend, Profile::Freight, &documents, |i, d| {
            seen.push((i, d.name.clone()));
        });

        assert_eq!(seen, vec![(0, "a.pdf".into()), (1, "b.pdf".into())]);
    }
}
