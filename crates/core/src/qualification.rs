//! Lead qualification levels

use serde::{Deserialize, Serialize};

/// Qualification level derived from a lead score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationLevel {
    /// Not yet interested
    #[default]
    Cold,
    /// Shows some interest
    Warm,
    /// Actively interested
    Hot,
    /// Ready for sales follow-up
    Qualified,
}

impl QualificationLevel {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cold => "Cold",
            Self::Warm => "Warm",
            Self::Hot => "Hot",
            Self::Qualified => "Qualified",
        }
    }

    /// Get priority (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Cold => 1,
            Self::Warm => 2,
            Self::Hot => 3,
            Self::Qualified => 4,
        }
    }
}
