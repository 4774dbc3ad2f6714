// ============================================================
// Layer 2 — Interactive Session
// ============================================================
// The command-line stand-in for "move some sliders, click
// Predict". Holds the current inputs between lines and turns
// each line of user text into a reply for the CLI to render.
//
// Line grammar (tokens separated by whitespace):
//   key=value ...   adjust inputs, e.g. `distance=20000 area=80`
//   predict         run a prediction (an empty line does too)
//   show            print current inputs
//   reset           restore defaults
//   help            list keys and ranges
//   quit | exit     leave the session
//
// Command words are case-insensitive.
//
// Adjustments and `predict` may share a line:
//   distance=9000 predict
//
// A line is applied all-or-nothing: if any pair is invalid the
// inputs stay as they were.

use anyhow::Result;

use crate::application::predict_use_case::PredictUseCase;
use crate::domain::{
    error::InputError,
    forecast::ThreatForecast,
    telemetry::TelemetryInput,
};

/// What the CLI should show after one line.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    Forecast(ThreatForecast),
    Inputs(TelemetryInput),
    /// Inputs changed; carries the new values
    Updated(TelemetryInput),
    Help,
    Quit,
}

pub struct SessionUseCase {
    predictor: PredictUseCase,
    input:     TelemetryInput,
}

impl SessionUseCase {
    pub fn new(predictor: PredictUseCase, initial: TelemetryInput) -> Self {
        Self { predictor, input: initial }
    }

    /// Handle one line of user text.
    pub fn handle(&mut self, line: &str) -> Result<SessionReply> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        // Command words match in any case; key=value pairs keep theirs
        let words: Vec<String> = tokens.iter().map(|t| t.to_ascii_lowercase()).collect();
        let words: Vec<&str>   = words.iter().map(String::as_str).collect();

        match words.as_slice() {
            []                  => return self.predict(),
            ["show"]            => return Ok(SessionReply::Inputs(self.input)),
            ["help"]            => return Ok(SessionReply::Help),
            ["quit"] | ["exit"] => return Ok(SessionReply::Quit),
            ["reset"]           => {
                self.input = TelemetryInput::default();
                return Ok(SessionReply::Updated(self.input));
            }
            _ => {}
        }

        let (pairs, run) = match words.last() {
            Some(&"predict") => (&tokens[..tokens.len() - 1], true),
            _                => (tokens.as_slice(), false),
        };

        let mut next = self.input;
        for token in pairs {
            let (key, raw) = parse_pair(token)?;
            next.set(key, raw)?;
        }
        self.input = next.sanitized()?;
        tracing::debug!("Session inputs now {:?}", self.input);

        if run {
            self.predict()
        } else {
            Ok(SessionReply::Updated(self.input))
        }
    }

    fn predict(&self) -> Result<SessionReply> {
        Ok(SessionReply::Forecast(self.predictor.predict(&self.input)?))
    }
}

/// Split `key=value` and parse the value.
fn parse_pair(token: &str) -> Result<(&str, f64), InputError> {
    let (key, raw) = token
        .split_once('=')
        .ok_or_else(|| InputError::MalformedPair(token.to_string()))?;

    let value = raw.trim().parse::<f64>().map_err(|_| InputError::NotANumber {
        key: key.to_string(),
        raw: raw.to_string(),
    })?;
    Ok((key.trim(), value))
}
