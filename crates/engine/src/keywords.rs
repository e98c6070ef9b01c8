//! Whole-word keyword matching shared by the title classifier and the
//! keyword text analyzer
//!
//! Word boundaries are only asserted on keyword ends that are word
//! characters, so keywords like `c++` or `.net` still match.

use regex::{Regex, RegexBuilder};

use crate::ScoringError;

/// Case-insensitive alternation of whole-word keywords
#[derive(Debug, Clone)]
pub(crate) struct KeywordSet {
    pattern: Option<Regex>,
}

impl KeywordSet {
    /// Compile a keyword list; blank entries are skipped
    pub(crate) fn new(field: &str, keywords: &[String]) -> Result<Self, ScoringError> {
        let mut alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(|k| bounded(&k.to_lowercase()))
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so multi-word keywords win over their prefixes
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        alternatives.dedup();

        let source = format!("(?:{})", alternatives.join("|"));
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source| ScoringError::Pattern {
                field: field.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }

    pub(crate) fn count(&self, text: &str) -> usize {
        self.pattern
            .as_ref()
            .map_or(0, |p| p.find_iter(text).count())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn bounded(keyword: &str) -> String {
    let body = regex::escape(keyword).replace(' ', r"\s+");
    let start = if keyword.starts_with(is_word_char) { r"\b" } else { "" };
    let end = if keyword.ends_with(is_word_char) { r"\b" } else { "" };
    format!("{start}{body}{end}")
}
