// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags:
//
//   predict  — one forecast from the six inputs
//   features — show the 16-column model row (no models needed)
//   session  — interactive loop, models loaded once
//   inspect  — summarise the loaded model artifacts
//
// clap's derive macros generate help text, error messages for
// bad values, and the string → f64 / PathBuf conversions.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::predict_use_case::PredictConfig;
use crate::domain::telemetry::{
    TelemetryInput, ALIGNMENT, AREA, CENTROID_SPEED, CLOSING_SPEED, DISTANCE, GROWTH_RATE,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict evacuation-zone impact probabilities at 12/24/48/72 hours
    Predict(PredictArgs),

    /// Print the engineered model input row for the given telemetry
    Features(FeaturesArgs),

    /// Interactive session: adjust inputs and predict repeatedly
    Session(SessionArgs),

    /// Describe the model artifacts in the models directory
    Inspect(InspectArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The six fire-telemetry signals. Values outside a signal's
/// range are clamped into it.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Distance to evacuation zone in meters [5000, 100000]
    #[arg(long, default_value_t = DISTANCE.default)]
    pub distance: f64,

    /// Initial burned area in hectares [0, 5000]
    #[arg(long, default_value_t = AREA.default)]
    pub area: f64,

    /// Area growth rate in ha/hr [0, 1000]
    #[arg(long, default_value_t = GROWTH_RATE.default)]
    pub growth_rate: f64,

    /// Closing speed toward the zone in m/hr [-500, 5000]
    #[arg(long, default_value_t = CLOSING_SPEED.default, allow_negative_numbers = true)]
    pub closing_speed: f64,

    /// Alignment of fire motion with the zone bearing [0, 1]
    #[arg(long, default_value_t = ALIGNMENT.default)]
    pub alignment: f64,

    /// Perimeter centroid speed in m/hr [0, 5000]
    #[arg(long, default_value_t = CENTROID_SPEED.default)]
    pub centroid_speed: f64,
}

impl From<InputArgs> for TelemetryInput {
    fn from(a: InputArgs) -> Self {
        TelemetryInput {
            dist_min_m:                a.distance,
            area_first_ha:             a.area,
            area_growth_rate_ha_per_h: a.growth_rate,
            closing_speed_m_per_h:     a.closing_speed,
            alignment_abs:             a.alignment,
            centroid_speed_m_per_h:    a.centroid_speed,
        }
    }
}

/// Where to find the models and the baseline column overrides.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Directory holding wildfire_rsf_model.json and wildfire_gbsa_model.json
    #[arg(long, env = "WILDFIRE_MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    /// JSON file overriding the default values of non-input columns
    #[arg(long)]
    pub baseline: Option<PathBuf>,
}

/// Converts CLI flags into the application-layer config, so the
/// application layer never sees clap types.
impl From<ModelArgs> for PredictConfig {
    fn from(a: ModelArgs) -> Self {
        PredictConfig {
            models_dir: a.models_dir,
            baseline:   a.baseline,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    #[command(flatten)]
    pub models: ModelArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also show each model's probabilities
    #[arg(long)]
    pub per_model: bool,

    /// Skip the text chart
    #[arg(long)]
    pub no_chart: bool,

    /// Append the forecast to this CSV file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FeaturesArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// JSON file overriding the default values of non-input columns
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Starting values for the session
    #[command(flatten)]
    pub inputs: InputArgs,

    #[command(flatten)]
    pub models: ModelArgs,

    /// Also show each model's probabilities
    #[arg(long)]
    pub per_model: bool,

    /// Append every forecast to this CSV file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory holding the model artifacts
    #[arg(long, env = "WILDFIRE_MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
