// ============================================================
// Layer 4 — Baseline Columns
// ============================================================
// Eight of the twelve raw model columns are not exposed as user
// inputs. They are filled with typical (median) values from the
// training data so a prediction can be made from the six signals
// a user actually knows.
//
// The defaults can be overridden with a JSON file, e.g.
//
//   { "event_start_month": 7, "event_start_hour": 18 }
//
// Keys left out keep their default thanks to #[serde(default)].
//
// Reference: serde documentation (field defaults)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureBaseline {
    pub num_perimeters_0_5h:          f64,
    pub dt_first_last_0_5h:           f64,
    /// 1 = January
    pub event_start_month:            f64,
    pub low_temporal_resolution_0_5h: f64,
    /// 0 = Monday
    pub event_start_dayofweek:        f64,
    pub event_start_hour:             f64,
    pub cross_track_component:        f64,
    pub radial_growth_m:              f64,
}

impl Default for FeatureBaseline {
    fn default() -> Self {
        Self {
            num_perimeters_0_5h:          3.0,
            dt_first_last_0_5h:           4.5,
            event_start_month:            8.0,
            low_temporal_resolution_0_5h: 0.0,
            event_start_dayofweek:        3.0,
            event_start_hour:             14.0,
            cross_track_component:        0.0,
            radial_growth_m:              100.0,
        }
    }
}

impl FeatureBaseline {
    /// Read a baseline override file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read baseline file '{}'", path.display()))?;

        let baseline: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid baseline JSON in '{}'", path.display()))?;

        tracing::debug!("Loaded feature baseline from '{}'", path.display());
        Ok(baseline)
    }
}
