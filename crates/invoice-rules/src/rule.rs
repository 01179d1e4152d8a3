use regex::{Captures, Regex};

/// A named field rule: an ordered pattern chain tried against the text,
/// first successful match wins and short-circuits the rest.
///
/// The declaration order of `patterns` is part of the contract — a
/// primary labeled pattern must shadow its looser fallbacks. Rules are
/// built once at startup into process-wide static tables (see
/// [`crate::customs`] and [`crate::freight`]).
pub struct ExtractionRule {
    name: &'static str,
    patterns: Vec<Regex>,
}

impl ExtractionRule {
    /// Compile a rule from literal patterns. Panics on an invalid
    /// pattern, which only a source-level typo can cause.
    pub fn new(name: &'static str, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("rule {name}: {e}")))
            .collect();
        Self { name, patterns }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Capture groups of the first matching pattern.
    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.patterns.iter().find_map(|re| re.captures(text))
    }

    /// First capture group of the first matching pattern, untrimmed.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.captures(text)
            .and_then(|c| c.get(1).map(|m| m.as_str()))
    }

    /// Capture as a trimmed owned string.
    pub fn text(&self, text: &str) -> Option<String> {
        self.capture(text).map(|s| s.trim().to_string())
    }

    /// Capture as a monetary amount (`digits[,ddd]*.dd`).
    pub fn money(&self, text: &str) -> Option<f64> {
        self.capture(text).and_then(parse_money)
    }

    /// Capture as an integer count.
    pub fn integer(&self, text: &str) -> Option<i64> {
        self.capture(text).and_then(parse_integer)
    }
}

impl std::fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionRule")
            .field("name", &self.name)
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

/// Parse a monetary capture: strip thousands-separator commas, require a
/// plain `digits.dd` form. The patterns already pin two fraction digits;
/// anything else comes back `None`, never an error.
pub fn parse_money(raw: &str) -> Option<f64> {
    parse_number(raw)
}

/// Parse a numeric capture (weights, volumes) that may carry thousands
/// separators and an optional fraction part.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse().ok()
}

/// Parse an integer capture (piece counts).
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_pattern_wins() {
        let rule = ExtractionRule::new(
            "reference",
            &[r"Primary:\s*(\d+)", r"Fallback:\s*(\d+)"],
        );
        let text = "Fallback: 222\nPrimary: 111";
        // Declared order decides, not position in the text
        assert_eq!(rule.capture(text), Some("111"));
    }

    #[test]
    fn fallback_fires_when_primary_is_absent() {
        let rule = ExtractionRule::new(
            "reference",
            &[r"Primary:\s*(\d+)", r"Fallback:\s*(\d+)"],
        );
        assert_eq!(rule.capture("Fallback: 222"), Some("222"));
        assert_eq!(rule.capture("nothing here"), None);
    }

    #[test]
    fn parse_money_strips_thousands_separators() {
        assert_eq!(parse_money("1,234.56"), Some(1234.56));
        assert_eq!(parse_money("12.00"), Some(12.0));
        assert_eq!(parse_money("not a number"), None);
    }

    #[test]
    fn parse_integer_rejects_fractions() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("1,200"), Some(1200));
        assert_eq!(parse_integer("4.2"), None);
    }
}
