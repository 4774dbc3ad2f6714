// ============================================================
// Layer 1 — Renderers
// ============================================================
// Everything the user sees on stdout:
//
//   TextRenderer — four headline metrics plus a text line chart
//                  of impact probability against horizon
//   JsonRenderer — the whole forecast as one JSON document
//
// Plus small helpers for the `features`, `inspect` and session
// commands. Logging goes to stderr, so stdout stays pipeable.

use anyhow::Result;
use std::io::Write;

use crate::domain::{
    features::FeatureRecord,
    forecast::{HorizonProbabilities, ThreatForecast, HORIZONS_HOURS},
    telemetry::{TelemetryInput, INPUT_RANGES},
    traits::ForecastRenderer,
};
use crate::infra::model_store::ModelSummary;

/// Chart height in 10% bands (row 0 = 100%, row 10 = 0%)
const CHART_BANDS: usize = 10;
const CHART_WIDTH: usize = 49;

/// `0.1234` → `"12.3%"`
pub fn format_percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

pub fn horizon_label(hours: f64) -> String {
    format!("{hours} Hours")
}

// ─── Text ─────────────────────────────────────────────────────────────────────
pub struct TextRenderer {
    /// Also list each model's probabilities
    pub per_model: bool,
    pub chart:     bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { per_model: false, chart: true }
    }
}

impl ForecastRenderer for TextRenderer {
    fn render(&self, forecast: &ThreatForecast, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Threat Forecast")?;
        writeln!(out)?;

        let labels: String = HORIZONS_HOURS.iter().map(|&h| format!("{:>11}", horizon_label(h))).collect();
        writeln!(out, "{:<10}{labels}", "")?;
        writeln!(out, "{:<10}{}", "ensemble", metric_cells(&forecast.ensemble))?;

        if self.per_model {
            for m in &forecast.per_model {
                writeln!(out, "{:<10}{}", m.model, metric_cells(&m.probabilities))?;
            }
        }

        if self.chart {
            writeln!(out)?;
            writeln!(out, "Probability of Impact (%)")?;
            for line in line_chart(&forecast.ensemble) {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }
}

fn metric_cells(p: &HorizonProbabilities) -> String {
    p.0.iter().map(|&v| format!("{:>11}", format_percent(v))).collect()
}

/// Row index for a percentage, 0 at the top.
fn band(pct: f64) -> usize {
    let level = (pct / 10.0).round().clamp(0.0, CHART_BANDS as f64) as usize;
    CHART_BANDS - level
}

/// A text line chart: `*` marks each horizon, `.` joins them.
pub fn line_chart(p: &HorizonProbabilities) -> Vec<String> {
    let pct   = p.percentages();
    let first = HORIZONS_HOURS[0];
    let span  = HORIZONS_HOURS[3] - first;
    let xs    = HORIZONS_HOURS.map(|h| ((h - first) / span * (CHART_WIDTH - 1) as f64).round() as usize);

    let mut grid = vec![vec![' '; CHART_WIDTH]; CHART_BANDS + 1];

    for seg in 0..3 {
        let (x0, x1) = (xs[seg], xs[seg + 1]);
        for x in x0..=x1 {
            let t = (x - x0) as f64 / (x1 - x0).max(1) as f64;
            let y = pct[seg] + t * (pct[seg + 1] - pct[seg]);
            let cell = &mut grid[band(y)][x];
            if *cell == ' ' {
                *cell = '.';
            }
        }
    }
    for (x, y) in xs.iter().zip(pct) {
        grid[band(y)][*x] = '*';
    }

    let mut lines: Vec<String> = grid
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            let label = 100 - row * 10;
            let body: String = cells.into_iter().collect();
            format!("{label:>4} |{}", body.trim_end())
        })
        .collect();

    lines.push(format!("     +{}", "-".repeat(CHART_WIDTH)));

    let mut axis = vec![' '; CHART_WIDTH + 4];
    for (x, h) in xs.iter().zip(HORIZONS_HOURS) {
        for (i, c) in format!("{h}h").chars().enumerate() {
            axis[x + i] = c;
        }
    }
    lines.push(format!("      {}", axis.into_iter().collect::<String>().trim_end()));
    lines
}

// ─── JSON ─────────────────────────────────────────────────────────────────────
pub struct JsonRenderer;

impl ForecastRenderer for JsonRenderer {
    fn render(&self, forecast: &ThreatForecast, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, forecast)?;
        writeln!(out)?;
        Ok(())
    }
}

// ─── Helpers for other commands ───────────────────────────────────────────────
pub fn render_inputs(input: &TelemetryInput, out: &mut dyn Write) -> Result<()> {
    for (range, value) in input.fields() {
        writeln!(out, "  {:<16}{:>12}   {}", range.key, value, range.label)?;
    }
    Ok(())
}

pub fn render_features(record: &FeatureRecord, out: &mut dyn Write) -> Result<()> {
    for (name, value) in record.named_values() {
        writeln!(out, "{name:<30} = {value:.6}")?;
    }
    Ok(())
}

pub fn render_summaries(summaries: &[ModelSummary], out: &mut dyn Write) -> Result<()> {
    for s in summaries {
        writeln!(out, "{} ({})", s.name, s.kind)?;
        writeln!(out, "  path:        {}", s.path.display())?;
        writeln!(out, "  trees:       {}", s.n_trees)?;
        writeln!(out, "  features:    {}", s.n_features)?;
        writeln!(out, "  event times: {}", s.n_times)?;
        writeln!(out, "  domain:      [{}, {}] h", s.domain.0, s.domain.1)?;
    }
    Ok(())
}

pub fn render_session_help(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Set inputs with key=value pairs, then type 'predict' (or press Enter).")?;
    writeln!(out, "Other commands: show, reset, help, quit")?;
    for r in INPUT_RANGES {
        writeln!(out, "  {:<16}{:>10} .. {:<10} (default {})", r.key, r.min, r.max, r.default)?;
    }
    Ok(())
}
