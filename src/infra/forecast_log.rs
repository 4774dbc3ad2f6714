// ============================================================
// Layer 6 — Forecast Logger
// ============================================================
// Appends every forecast to a CSV file so a run of predictions
// (e.g. a whole interactive session) can be reviewed or plotted
// afterwards.
//
// One row per model plus one for the ensemble:
//
//   model,h12,h24,h48,h72
//   rsf,0.041200,0.128000,0.301000,0.402000
//   gbsa,0.063000,0.117500,0.254000,0.311900
//   ensemble,0.052100,0.122750,0.277500,0.356950
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::forecast::{HorizonProbabilities, ThreatForecast};

const HEADER: &str = "model,h12,h24,h48,h72";

pub struct ForecastLogger {
    csv_path: PathBuf,
}

impl ForecastLogger {
    /// Open (or create) the CSV at `path`.
    /// The header is written only when the file is new, so
    /// successive runs append to the same log.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = path.into();

        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create log directory '{}'", parent.display()))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create forecast log '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created forecast log: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, forecast: &ThreatForecast) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open forecast log '{}'", self.csv_path.display()))?;

        for m in &forecast.per_model {
            write_row(&mut f, &m.model, &m.probabilities)?;
        }
        write_row(&mut f, "ensemble", &forecast.ensemble)?;

        tracing::debug!("Logged forecast to '{}'", self.csv_path.display());
        Ok(())
    }
}

fn write_row(f: &mut impl Write, label: &str, p: &HorizonProbabilities) -> Result<()> {
    let [h12, h24, h48, h72] = p.0;
    writeln!(f, "{label},{h12:.6},{h24:.6},{h48:.6},{h72:.6}")?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::ModelForecast;

    fn forecast() -> ThreatForecast {
        ThreatForecast::new(
            vec![
                ModelForecast { model: "rsf".into(),  probabilities: HorizonProbabilities([0.1, 0.2, 0.3, 0.4]) },
                ModelForecast { model: "gbsa".into(), probabilities: HorizonProbabilities([0.3, 0.4, 0.5, 0.6]) },
            ],
            HorizonProbabilities([0.2, 0.3, 0.4, 0.5]),
        )
    }

    #[test]
    fn test_header_written_once_and_rows_appended() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("forecasts.csv");

        ForecastLogger::new(&path).unwrap().log(&forecast()).unwrap();
        // Reopening must not write a second header
        ForecastLogger::new(&path).unwrap().log(&forecast()).unwrap();

        let text  = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 2 * 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "rsf,0.100000,0.200000,0.300000,0.400000");
        assert_eq!(lines[3], "ensemble,0.200000,0.300000,0.400000,0.500000");
        assert_eq!(text.matches(HEADER).count(), 1);
    }
}
