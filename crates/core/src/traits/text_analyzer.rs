//! Text understanding collaborator
//!
//! Scoring never depends on text features; they are carried through for
//! display. Any service that classifies free-text lead messages plugs in
//! here, and scoring proceeds unchanged when none is configured.
//!
//! # Example
//!
//! ```ignore
//! use lead_scoring_core::traits::TextAnalyzer;
//!
//! let text = analyzer.analyze(&record.messages).unwrap_or_default();
//! ```

use crate::features::TextFeatures;

/// Classifies free-text lead messages
pub trait TextAnalyzer: Send + Sync {
    /// Analyze the lead's messages.
    ///
    /// Returns `None` when the service is unavailable; callers substitute
    /// default (all-null) text features.
    fn analyze(&self, messages: &[String]) -> Option<TextFeatures>;

    /// Analyzer name for logging
    fn name(&self) -> &str;
}
