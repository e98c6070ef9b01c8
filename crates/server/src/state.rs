//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use lead_scoring_config::{ScoringConfig, Settings};
use lead_scoring_engine::{KeywordTextAnalyzer, LeadScoringEngine};
use parking_lot::RwLock;

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Settings the server was started with
    pub config: Arc<RwLock<Settings>>,
    /// Current engine; handlers clone the inner `Arc` and release the lock
    engine: Arc<RwLock<Arc<LeadScoringEngine>>>,
}

impl AppState {
    /// Create state with an engine built from `settings.scoring_config_path`
    pub fn new(settings: Settings) -> Result<Self, ServerError> {
        let engine = build_engine(&settings)?;
        Ok(Self::with_engine(settings, engine))
    }

    /// Create state around an existing engine
    pub fn with_engine(settings: Settings, engine: LeadScoringEngine) -> Self {
        Self {
            config: Arc::new(RwLock::new(settings)),
            engine: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Snapshot of the current engine
    pub fn engine(&self) -> Arc<LeadScoringEngine> {
        Arc::clone(&self.engine.read())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }

    /// Reload the scoring configuration from disk.
    ///
    /// The new engine is fully built and validated before it replaces the
    /// current one; on error the current engine keeps serving.
    pub fn reload_scoring(&self) -> Result<Arc<LeadScoringEngine>, ServerError> {
        let settings = self.config.read().clone();
        let engine = Arc::new(build_engine(&settings)?);

        *self.engine.write() = Arc::clone(&engine);

        tracing::info!(
            path = %settings.scoring_config_path,
            profiles = engine.profile_names().len(),
            "Scoring configuration reloaded"
        );
        Ok(engine)
    }
}

/// Build the engine described by the settings
pub fn build_engine(settings: &Settings) -> Result<LeadScoringEngine, ServerError> {
    let scoring = ScoringConfig::load(&settings.scoring_config_path)?;
    let mut engine = LeadScoringEngine::new(settings.extraction.clone(), scoring)?;

    if settings.features.text_analysis {
        let analyzer = KeywordTextAnalyzer::new(&settings.extraction.text)?;
        engine = engine.with_text_analyzer(Arc::new(analyzer));
    }

    Ok(engine)
}
