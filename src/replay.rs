// Sample replay
// Feeds recorded raw samples through a device binding and prints the signals
//
// Input format, one sample per line:
//   axis <channel> <value>
//   button <channel> <0|1|true|false|pressed|released>
// Blank lines and lines starting with '#' are skipped.

use anyhow::{Context, Result};
use rawinput_core::{DeviceBinding, RawSample, Signal};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleParseError {
    #[error("unknown sample kind \"{0}\" (expected axis or button)")]
    UnknownKind(String),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid channel \"{0}\"")]
    InvalidChannel(String),

    #[error("invalid axis value \"{0}\"")]
    InvalidValue(String),

    #[error("invalid button state \"{0}\"")]
    InvalidButtonState(String),

    #[error("unexpected trailing input \"{0}\"")]
    TrailingInput(String),
}

/// Parse one line. `Ok(None)` for blank and comment lines.
pub fn parse_sample_line(line: &str) -> Result<Option<RawSample>, SampleParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let kind = parts.next().ok_or(SampleParseError::MissingField("kind"))?;
    let channel = parts
        .next()
        .ok_or(SampleParseError::MissingField("channel"))?;
    let channel: usize = channel
        .parse()
        .map_err(|_| SampleParseError::InvalidChannel(channel.to_string()))?;
    let value = parts.next().ok_or(SampleParseError::MissingField("value"))?;

    let sample = match kind.to_ascii_lowercase().as_str() {
        "axis" | "a" => {
            let value: f32 = value
                .parse()
                .map_err(|_| SampleParseError::InvalidValue(value.to_string()))?;
            if !value.is_finite() {
                return Err(SampleParseError::InvalidValue(value.to_string()));
            }
            RawSample::Axis { channel, value }
        }
        "button" | "b" => {
            let pressed = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "pressed" | "down" => true,
                "0" | "false" | "released" | "up" => false,
                other => return Err(SampleParseError::InvalidButtonState(other.to_string())),
            };
            RawSample::Button { channel, pressed }
        }
        other => return Err(SampleParseError::UnknownKind(other.to_string())),
    };

    if let Some(extra) = parts.next() {
        return Err(SampleParseError::TrailingInput(extra.to_string()));
    }
    Ok(Some(sample))
}

/// Render a signal for display
pub fn format_signal(signal: &Signal<'_>) -> String {
    match signal {
        Signal::Axis(axis) => format!(
            "{} {:.4} ({})",
            axis.key,
            axis.value,
            axis.range.as_str()
        ),
        Signal::Button(button) => format!(
            "{} {}",
            button.key,
            if button.pressed { "pressed" } else { "released" }
        ),
    }
}

/// Counters for a replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub samples: usize,
    pub emitted: usize,
    pub suppressed: usize,
    pub malformed: usize,
}

/// Replay every sample in `input` through `binding`, writing one line per
/// emitted signal to `out`. Malformed lines, including ones that are not
/// UTF-8, are logged and skipped; only read and write failures are errors.
pub fn replay<R: BufRead, W: Write>(
    input: R,
    binding: &DeviceBinding,
    out: &mut W,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes.context("Failed to read sample input")?;
        let Ok(line) = String::from_utf8(bytes) else {
            warn!("Line {}: not valid UTF-8", index + 1);
            summary.malformed += 1;
            continue;
        };
        let sample = match parse_sample_line(line.trim_end_matches('\r')) {
            Ok(Some(sample)) => sample,
            Ok(None) => continue,
            Err(e) => {
                warn!("Line {}: {}", index + 1, e);
                summary.malformed += 1;
                continue;
            }
        };

        summary.samples += 1;
        match binding.remap(sample) {
            Some(signal) => {
                summary.emitted += 1;
                writeln!(out, "{}", format_signal(&signal))?;
            }
            None => summary.suppressed += 1,
        }
    }

    Ok(summary)
}
