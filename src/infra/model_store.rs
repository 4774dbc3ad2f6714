// ============================================================
// Layer 6 — Model Store
// ============================================================
// Loads the two fitted survival models from JSON artifacts and
// keeps them for the rest of the process.
//
// Expected layout:
//   models/
//     wildfire_rsf_model.json    ← random survival forest
//     wildfire_gbsa_model.json   ← gradient boosted survival
//
// Every artifact is tagged with its kind:
//   { "kind": "random_survival_forest", "feature_names": [...], ... }
//   { "kind": "gradient_boosting_survival", "learning_rate": 0.1, ... }
//
// Structure, feature schema and curves are validated while
// deserialising (see ml::forest and ml::boosting), so a model
// that loads is a model that can predict.
//
// ModelCache wraps a store with a load-once cell: the first
// caller pays for parsing, everyone after gets the same Arc.
//
// Reference: Rust Book §9 (Error Handling)
//            std::sync::OnceLock

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use crate::ml::{
    boosting::GradientBoostingSurvival,
    ensemble::{SharedModel, SurvivalEnsemble},
    forest::RandomSurvivalForest,
    model::SurvivalModel,
};

pub const RSF_FILE:  &str = "wildfire_rsf_model.json";
pub const GBSA_FILE: &str = "wildfire_gbsa_model.json";

/// Any model artifact, discriminated by its "kind" field.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomSurvivalForest(RandomSurvivalForest),
    GradientBoostingSurvival(GradientBoostingSurvival),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RandomSurvivalForest(_)     => "random_survival_forest",
            Self::GradientBoostingSurvival(_) => "gradient_boosting_survival",
        }
    }
}

/// One-line description of a loaded model, for `inspect`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ModelSummary {
    pub name:       String,
    pub kind:       &'static str,
    pub path:       PathBuf,
    pub n_trees:    usize,
    pub n_features: usize,
    pub n_times:    usize,
    pub domain:     (f64, f64),
}

/// The two models this tool ensembles.
#[derive(Debug)]
pub struct LoadedModels {
    pub rsf:  Arc<RandomSurvivalForest>,
    pub gbsa: Arc<GradientBoostingSurvival>,
    pub summaries: Vec<ModelSummary>,
}

impl LoadedModels {
    /// Both models as an ensemble, RSF first.
    pub fn ensemble(&self) -> Result<SurvivalEnsemble> {
        let rsf:  SharedModel = self.rsf.clone();
        let gbsa: SharedModel = self.gbsa.clone();
        Ok(SurvivalEnsemble::new(vec![rsf, gbsa])?)
    }
}

/// Reads model artifacts from a directory.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Parse any artifact file.
    pub fn load_artifact(&self, file: &str) -> Result<ModelArtifact> {
        let path = self.dir.join(file);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model artifact '{}'. Is --models-dir pointing at the exported models?",
                path.display()
            )
        })?;

        let artifact: ModelArtifact = serde_json::from_str(&json)
            .with_context(|| format!("Invalid model artifact '{}'", path.display()))?;

        tracing::debug!("Parsed {} from '{}'", artifact.kind(), path.display());
        Ok(artifact)
    }

    pub fn load_rsf(&self) -> Result<RandomSurvivalForest> {
        match self.load_artifact(RSF_FILE)? {
            ModelArtifact::RandomSurvivalForest(m) => Ok(m),
            other => bail!("'{}' holds a {}, expected a random_survival_forest", RSF_FILE, other.kind()),
        }
    }

    pub fn load_gbsa(&self) -> Result<GradientBoostingSurvival> {
        match self.load_artifact(GBSA_FILE)? {
            ModelArtifact::GradientBoostingSurvival(m) => Ok(m),
            other => bail!("'{}' holds a {}, expected a gradient_boosting_survival", GBSA_FILE, other.kind()),
        }
    }

    /// Load both models.
    pub fn load_all(&self) -> Result<LoadedModels> {
        let rsf  = self.load_rsf()?;
        let gbsa = self.load_gbsa()?;

        let summaries = vec![
            ModelSummary {
                name:       RandomSurvivalForest::NAME.to_string(),
                kind:       "random_survival_forest",
                path:       self.dir.join(RSF_FILE),
                n_trees:    rsf.n_trees(),
                n_features: rsf.feature_names().len(),
                n_times:    rsf.event_times().len(),
                domain:     rsf.domain(),
            },
            ModelSummary {
                name:       GradientBoostingSurvival::NAME.to_string(),
                kind:       "gradient_boosting_survival",
                path:       self.dir.join(GBSA_FILE),
                n_trees:    gbsa.n_trees(),
                n_features: gbsa.feature_names().len(),
                n_times:    gbsa.baseline().times().len(),
                domain:     gbsa.baseline().domain(),
            },
        ];

        tracing::info!(
            "Loaded models from '{}': rsf ({} trees), gbsa ({} trees)",
            self.dir.display(),
            rsf.n_trees(),
            gbsa.n_trees(),
        );

        Ok(LoadedModels { rsf: Arc::new(rsf), gbsa: Arc::new(gbsa), summaries })
    }
}

/// Load-once, reuse-forever holder for the models.
#[derive(Debug)]
pub struct ModelCache {
    store:  ModelStore,
    models: OnceLock<Arc<LoadedModels>>,
}

impl ModelCache {
    pub fn new(store: ModelStore) -> Self {
        Self { store, models: OnceLock::new() }
    }

    /// The cached models, loading them on first use.
    /// A failed load leaves the cache empty so the next call retries.
    pub fn get(&self) -> Result<Arc<LoadedModels>> {
        if let Some(models) = self.models.get() {
            return Ok(models.clone());
        }
        let loaded = Arc::new(self.store.load_all()?);
        Ok(self.models.get_or_init(|| loaded).clone())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::features::FEATURE_COLUMNS;
    use serde_json::json;

    pub(crate) fn rsf_json() -> serde_json::Value {
        json!({
            "kind": "random_survival_forest",
            "feature_names": FEATURE_COLUMNS,
            "event_times": [6.0, 12.0, 24.0, 48.0, 72.0],
            "trees": [
                { "nodes": [
                    { "split": { "feature": 12, "threshold": 8000.0, "left": 1, "right": 2 } },
                    { "leaf": [0.90, 0.70, 0.50, 0.30, 0.20] },
                    { "leaf": [0.99, 0.95, 0.90, 0.80, 0.70] }
                ] },
                { "nodes": [ { "leaf": [0.95, 0.85, 0.70, 0.60, 0.50] } ] }
            ]
        })
    }

    pub(crate) fn gbsa_json() -> serde_json::Value {
        json!({
            "kind": "gradient_boosting_survival",
            "feature_names": FEATURE_COLUMNS,
            "learning_rate": 0.5,
            "trees": [
                { "nodes": [
                    { "split": { "feature": 14, "threshold": 0.02, "left": 1, "right": 2 } },
                    { "leaf": [-0.4] },
                    { "leaf": [0.8] }
                ] }
            ],
            "baseline": {
                "times":    [12.0, 24.0, 48.0, 96.0],
                "survival": [0.90, 0.80, 0.65, 0.50]
            }
        })
    }

    /// Write both artifacts into a fresh temp dir.
    pub(crate) fn write_models() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RSF_FILE), rsf_json().to_string()).unwrap();
        fs::write(dir.path().join(GBSA_FILE), gbsa_json().to_string()).unwrap();
        dir
    }

    #[test]
    fn test_load_all() {
        let dir    = write_models();
        let models = ModelStore::new(dir.path()).load_all().unwrap();

        assert_eq!(models.rsf.n_trees(), 2);
        assert_eq!(models.gbsa.n_trees(), 1);
        assert_eq!(models.summaries.len(), 2);
        assert_eq!(models.summaries[0].domain, (0.0, 72.0));
        assert_eq!(models.summaries[1].domain, (0.0, 96.0));
        assert_eq!(models.summaries[1].n_features, 16);
        assert!(models.ensemble().is_ok());
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelStore::new(dir.path()).load_rsf().unwrap_err();
        assert!(format!("{err:#}").contains(RSF_FILE));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let dir = tempfile::tempdir().unwrap();
        // A GBSA artifact saved under the RSF filename
        fs::write(dir.path().join(RSF_FILE), gbsa_json().to_string()).unwrap();
        let err = ModelStore::new(dir.path()).load_rsf().unwrap_err();
        assert!(err.to_string().contains("expected a random_survival_forest"));
    }

    #[test]
    fn test_feature_schema_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut rsf = rsf_json();
        rsf["feature_names"][3] = json!("wind_speed");
        fs::write(dir.path().join(RSF_FILE), rsf.to_string()).unwrap();

        let err = ModelStore::new(dir.path()).load_rsf().unwrap_err();
        assert!(format!("{err:#}").contains("wind_speed"));
    }

    #[test]
    fn test_cache_loads_once() {
        let dir   = write_models();
        let cache = ModelCache::new(ModelStore::new(dir.path()));

        let first = cache.get().unwrap();
        // Removing the files proves the second call never touches disk
        fs::remove_file(dir.path().join(RSF_FILE)).unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_bundled_demo_models_load_and_predict() {
        let dir    = concat!(env!("CARGO_MANIFEST_DIR"), "/models");
        let models = ModelStore::new(dir).load_all().unwrap();
        assert_eq!(models.rsf.n_trees(), 3);
        assert_eq!(models.gbsa.n_trees(), 3);

        let row = crate::data::engineer::engineer_features(
            &crate::domain::telemetry::TelemetryInput::default(),
            &crate::data::baseline::FeatureBaseline::default(),
        )
        .to_row();
        let (_, ensemble) = models.ensemble().unwrap().predict(&row).unwrap();

        // Impact probability can only grow with the horizon
        for w in ensemble.0.windows(2) {
            assert!(w[0] <= w[1]);
        }
        assert!(ensemble.0.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_cache_retries_after_failure() {
        let dir   = tempfile::tempdir().unwrap();
        let cache = ModelCache::new(ModelStore::new(dir.path()));
        assert!(cache.get().is_err());

        fs::write(dir.path().join(RSF_FILE), rsf_json().to_string()).unwrap();
        fs::write(dir.path().join(GBSA_FILE), gbsa_json().to_string()).unwrap();
        assert!(cache.get().is_ok());
    }
}
