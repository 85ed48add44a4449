use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{MAX_SPEED, RANGE_TOLERANCE};

/// Why a speed list was rejected
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("speed list must be comma-separated finite numbers, e.g. [-0.5, 1.0]")]
    Malformed,

    #[error("no speed lies within the accepted range")]
    OutOfRange,

    #[error("cannot rescale a speed list whose values are all zero")]
    DegenerateScale,
}

/// How out-of-range values are handled when text is parsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// Drop values outside the tolerance band, clamp the rest into range
    ClampDrop,
    /// Scale the whole list so the largest magnitude equals the maximum speed
    RescaleToMax,
}

/// Sorted, immutable list of characteristic speeds.
///
/// Cloning is cheap; the backing slice is shared and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedSet {
    speeds: Arc<[f64]>,
}

impl SpeedSet {
    /// Build a set from raw values, sorting them.
    ///
    /// Every value must be finite and lie within `[-max_speed, max_speed]`.
    pub fn new(mut values: Vec<f64>, max_speed: f64) -> Result<Self, ParseError> {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return Err(ParseError::Malformed);
        }
        if values.iter().any(|v| v.abs() > max_speed) {
            return Err(ParseError::OutOfRange);
        }
        values.sort_by(f64::total_cmp);
        Ok(Self {
            speeds: values.into(),
        })
    }

    /// The startup list
    pub fn default_set() -> Self {
        let mut values = crate::config::DEFAULT_SPEEDS.to_vec();
        values.sort_by(f64::total_cmp);
        Self {
            speeds: values.into(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.speeds
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    /// Always false; a set holds at least one speed
    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }
}

/// Serializes as `[-0.5, -0.25, 1.0, 1.5]`, the same form the parser accepts
impl fmt::Display for SpeedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, speed) in self.speeds.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            // Debug keeps a fractional digit and prints the shortest exact form
            write!(f, "{:?}", speed)?;
        }
        write!(f, "]")
    }
}

/// Turns user text into a validated `SpeedSet`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedSetParser {
    pub mode: ValidationMode,
    pub max_speed: f64,
    pub tolerance: f64,
}

impl SpeedSetParser {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            max_speed: MAX_SPEED,
            tolerance: RANGE_TOLERANCE,
        }
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Parse a bracketed, comma-separated list of numbers.
    ///
    /// Surrounding whitespace and brackets are optional. The result is sorted.
    pub fn parse(&self, text: &str) -> Result<SpeedSet, ParseError> {
        let values = split_numbers(text)?;
        let values = match self.mode {
            ValidationMode::ClampDrop => self.clamp_drop(values)?,
            ValidationMode::RescaleToMax => self.rescale(values)?,
        };
        SpeedSet::new(values, self.max_speed)
    }

    fn clamp_drop(&self, values: Vec<f64>) -> Result<Vec<f64>, ParseError> {
        let limit = self.max_speed + self.tolerance;
        let kept: Vec<f64> = values
            .into_iter()
            .filter(|v| {
                let inside = v.abs() <= limit;
                if !inside {
                    log::debug!("Dropping out-of-range speed {}", v);
                }
                inside
            })
            .map(|v| v.clamp(-self.max_speed, self.max_speed))
            .collect();
        if kept.is_empty() {
            return Err(ParseError::OutOfRange);
        }
        Ok(kept)
    }

    fn rescale(&self, values: Vec<f64>) -> Result<Vec<f64>, ParseError> {
        let max = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if max == 0.0 {
            return Err(ParseError::DegenerateScale);
        }
        if max == self.max_speed {
            return Ok(values);
        }
        Ok(values
            .into_iter()
            .map(|v| (v / max * self.max_speed).clamp(-self.max_speed, self.max_speed))
            .collect())
    }
}

fn split_numbers(text: &str) -> Result<Vec<f64>, ParseError> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);
    if trimmed.trim().is_empty() {
        return Err(ParseError::Malformed);
    }

    trimmed
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(ParseError::Malformed)
        })
        .collect()
}
