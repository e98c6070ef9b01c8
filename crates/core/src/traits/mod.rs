//! Collaborator traits
//!
//! Seams where services outside the scoring core plug in.

mod text_analyzer;

pub use text_analyzer::TextAnalyzer;
