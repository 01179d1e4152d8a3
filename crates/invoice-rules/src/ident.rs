use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

// Job codes on freight batches look like "INV-20114" / "inv_884a".
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(INV[-_]?[A-Z0-9]+)").unwrap());

// Bare digit run with an optional trailing revision letter, e.g. "20114a".
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+[A-Za-z]?)").unwrap());

/// Derive the stored document identifier from a filename.
///
/// Chain: `INV`-prefixed code, else the leftmost digit run with an
/// optional trailing letter, else the filename stem verbatim. Applied to
/// the filename string only — never to the document text.
pub fn document_identifier(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    if let Some(caps) = CODE_RE.captures(&stem) {
        return caps[1].to_string();
    }
    if let Some(caps) = DIGITS_RE.captures(&stem) {
        return caps[1].to_string();
    }
    stem
}
