// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Orchestrates one prediction request, in order:
//
//   Step 1: Sanitise the six inputs        (Layer 3 - domain)
//   Step 2: Engineer the 16-column record  (Layer 4 - data)
//   Step 3: Query both survival models     (Layer 5 - ml)
//   Step 4: Average into the forecast      (Layer 5 - ml)
//
// The models come from a ModelCache, so a use case built twice
// in the same process (or reused across a whole interactive
// session) parses the artifacts only once.

use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc};

use crate::data::{baseline::FeatureBaseline, engineer::engineer_features};
use crate::domain::{
    features::FeatureRecord,
    forecast::ThreatForecast,
    telemetry::TelemetryInput,
};
use crate::infra::model_store::{LoadedModels, ModelCache};
use crate::ml::ensemble::SurvivalEnsemble;

// ─── Prediction Configuration ────────────────────────────────────────────────
// Where the models live and which baseline columns to use.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub models_dir: PathBuf,
    /// Optional JSON override for the non-user columns
    pub baseline:   Option<PathBuf>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self { models_dir: PathBuf::from("models"), baseline: None }
    }
}

impl PredictConfig {
    pub fn load_baseline(&self) -> Result<FeatureBaseline> {
        match &self.baseline {
            Some(path) => FeatureBaseline::from_file(path),
            None       => Ok(FeatureBaseline::default()),
        }
    }
}

/// Sanitise inputs and build the model row. Needs no models.
pub fn build_features(input: &TelemetryInput, baseline: &FeatureBaseline) -> Result<FeatureRecord> {
    let input = input.sanitized().context("Invalid telemetry input")?;
    Ok(engineer_features(&input, baseline))
}

// ─── PredictUseCase ──────────────────────────────────────────────────────────
pub struct PredictUseCase {
    ensemble: SurvivalEnsemble,
    baseline: FeatureBaseline,
}

impl PredictUseCase {
    pub fn new(models: Arc<LoadedModels>, baseline: FeatureBaseline) -> Result<Self> {
        let ensemble = models.ensemble()?;
        Ok(Self { ensemble, baseline })
    }

    /// Build from a cache, loading the models on first use.
    pub fn from_cache(cache: &ModelCache, config: &PredictConfig) -> Result<Self> {
        let models   = cache.get()?;
        let baseline = config.load_baseline()?;
        Self::new(models, baseline)
    }

    /// Run the full pipeline for one set of inputs.
    pub fn predict(&self, input: &TelemetryInput) -> Result<ThreatForecast> {
        let record = build_features(input, &self.baseline)?;
        let row    = record.to_row();

        let (per_model, ensemble) = self
            .ensemble
            .predict(&row)
            .context("Survival model prediction failed")?;

        tracing::info!(
            "Forecast 12h={:.1}% 24h={:.1}% 48h={:.1}% 72h={:.1}%",
            ensemble.0[0] * 100.0,
            ensemble.0[1] * 100.0,
            ensemble.0[2] * 100.0,
            ensemble.0[3] * 100.0,
        );

        Ok(ThreatForecast::new(per_model, ensemble))
    }
}
