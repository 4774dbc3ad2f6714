// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, hands the work to Layer 2, and renders what comes back.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

/// Text / JSON output
pub mod render;

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};

use commands::{
    Commands, FeaturesArgs, InspectArgs, OutputFormat, PredictArgs, SessionArgs,
};
use render::{JsonRenderer, TextRenderer};

use crate::application::{
    predict_use_case::{build_features, PredictConfig, PredictUseCase},
    session_use_case::{SessionReply, SessionUseCase},
};
use crate::domain::{telemetry::TelemetryInput, traits::ForecastRenderer};
use crate::infra::{
    forecast_log::ForecastLogger,
    model_store::{ModelCache, ModelStore},
};

#[derive(Parser, Debug)]
#[command(
    name = "wildfire-threat",
    version,
    about = "Predict the probability that a wildfire reaches an evacuation zone within 12, 24, 48 and 72 hours."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the handler for the chosen subcommand.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Predict(args)  => run_predict(args),
            Commands::Features(args) => run_features(args),
            Commands::Session(args)  => run_session(args),
            Commands::Inspect(args)  => run_inspect(args),
        }
    }
}

fn open_cache(config: &PredictConfig) -> ModelCache {
    ModelCache::new(ModelStore::new(config.models_dir.clone()))
}

fn open_logger(path: Option<std::path::PathBuf>) -> Result<Option<ForecastLogger>> {
    path.map(ForecastLogger::new).transpose()
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let config: PredictConfig = args.models.into();
    let input: TelemetryInput = args.inputs.into();

    let cache    = open_cache(&config);
    let use_case = PredictUseCase::from_cache(&cache, &config)?;
    let forecast = use_case.predict(&input)?;

    if let Some(logger) = open_logger(args.log)? {
        logger.log(&forecast)?;
    }

    let renderer: Box<dyn ForecastRenderer> = match args.format {
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Text => Box::new(TextRenderer {
            per_model: args.per_model,
            chart:     !args.no_chart,
        }),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render(&forecast, &mut out)
}

fn run_features(args: FeaturesArgs) -> Result<()> {
    let config = PredictConfig { baseline: args.baseline, ..PredictConfig::default() };
    let input: TelemetryInput = args.inputs.into();

    let record = build_features(&input, &config.load_baseline()?)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render::render_features(&record, &mut out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &record)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let models = ModelStore::new(args.models_dir).load_all()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render::render_summaries(&models.summaries, &mut out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &models.summaries)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn run_session(args: SessionArgs) -> Result<()> {
    let config: PredictConfig = args.models.into();
    let cache    = open_cache(&config);
    let use_case = PredictUseCase::from_cache(&cache, &config)?;
    let logger   = open_logger(args.log)?;

    let initial = TelemetryInput::from(args.inputs).sanitized()?;
    let mut session = SessionUseCase::new(use_case, initial);
    let renderer    = TextRenderer { per_model: args.per_model, chart: true };

    let stdin  = io::stdin();
    let stdout = io::stdout();
    session_loop(&mut session, &renderer, logger.as_ref(), stdin.lock(), stdout.lock())
}

/// Read lines until `quit`/`exit` or end of input. A rejected line
/// prints `error: ...` and the loop carries on with the next one.
fn session_loop(
    session:  &mut SessionUseCase,
    renderer: &dyn ForecastRenderer,
    logger:   Option<&ForecastLogger>,
    input:    impl BufRead,
    mut out:  impl Write,
) -> Result<()> {
    render::render_session_help(&mut out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        match session.handle(&line) {
            Ok(SessionReply::Forecast(forecast)) => {
                if let Some(logger) = logger {
                    logger.log(&forecast)?;
                }
                renderer.render(&forecast, &mut out)?;
            }
            Ok(SessionReply::Inputs(input)) | Ok(SessionReply::Updated(input)) => {
                render::render_inputs(&input, &mut out)?;
            }
            Ok(SessionReply::Help) => render::render_session_help(&mut out)?,
            Ok(SessionReply::Quit) => break,
            Err(e) => {
                tracing::debug!("Session line rejected: {e:#}");
                writeln!(out, "error: {e:#}")?;
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::baseline::FeatureBaseline;
    use crate::infra::model_store::tests::write_models;
    use std::fs;

    fn session(dir: &tempfile::TempDir) -> SessionUseCase {
        let models = ModelStore::new(dir.path()).load_all().unwrap();
        let uc     = PredictUseCase::new(models.into(), FeatureBaseline::default()).unwrap();
        SessionUseCase::new(uc, TelemetryInput::default())
    }

    fn run(session: &mut SessionUseCase, logger: Option<&ForecastLogger>, script: &str) -> String {
        let mut out = Vec::new();
        session_loop(session, &TextRenderer::default(), logger, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bad_line_reports_and_session_continues_to_eof() {
        let dir    = write_models();
        let logger = ForecastLogger::new(dir.path().join("session.csv")).unwrap();
        let mut s  = session(&dir);

        let text = run(&mut s, Some(&logger), "area=lots\ndistance=9000 predict\n");

        let error    = text.find("error:").unwrap();
        let forecast = text.find("72 Hours").unwrap();
        assert!(error < forecast, "{text}");
        assert!(text.contains("error: cannot parse 'lots' as a number for area"));

        // One forecast logged: header + rsf + gbsa + ensemble
        let csv = fs::read_to_string(dir.path().join("session.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_quit_stops_before_remaining_lines() {
        let dir   = write_models();
        let mut s = session(&dir);

        let text = run(&mut s, None, "show\nQUIT\npredict\n");
        assert!(text.contains("distance"));
        assert!(!text.contains("Threat Forecast"));
    }

    #[test]
    fn test_empty_input_ends_cleanly() {
        let dir   = write_models();
        let mut s = session(&dir);

        let text = run(&mut s, None, "");
        assert!(text.contains("Other commands"));
        assert!(text.trim_end().ends_with('>'));
    }
}
