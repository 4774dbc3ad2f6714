// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// ForecastRenderer is the presentation seam: anything that
// turns a finished forecast into output. The text and JSON
// renderers (Layer 1) implement it, so commands pick one at
// runtime without caring which.
//
// The model seam, SurvivalModel, lives with the models in
// ml::model so this layer stays free of model math.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use std::io::Write;

use anyhow::Result;

use crate::domain::forecast::ThreatForecast;

// ─── ForecastRenderer ─────────────────────────────────────────────────────────
/// Anything that can present a forecast to the user.
///
/// Implementations:
///   - TextRenderer → metrics line + text line chart
///   - JsonRenderer → one JSON document
pub trait ForecastRenderer {
    fn render(&self, forecast: &ThreatForecast, out: &mut dyn Write) -> Result<()>;
}
