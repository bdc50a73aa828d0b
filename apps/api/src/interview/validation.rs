//! Validation boundary for provider output.
//!
//! Turns the raw text of a completion into an `AnswerAnalysisResult` or one of
//! three distinguishable failures. Nothing is repaired: no fence stripping, no
//! clamping, no defaulting of required fields.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::interview::models::AnswerAnalysisResult;

pub const SCORE_RANGE: (i64, i64) = (0, 100);
/// Ratings use 1..=5; a zero rating is treated as a contract break.
pub const RATING_RANGE: (i64, i64) = (1, 5);

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("output violates schema at `{path}`: {message}")]
    SchemaViolation { path: String, message: String },

    #[error("`{field}` = {value} is outside [{min}, {max}]")]
    RangeViolation {
        field: &'static str,
        value: i128,
        min: i64,
        max: i64,
    },
}

impl OutputError {
    /// Stable identifier reported to callers next to the error code.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputError::Malformed(_) => "malformed_output",
            OutputError::SchemaViolation { .. } => "schema_violation",
            OutputError::RangeViolation { .. } => "range_violation",
        }
    }
}

/// Any JSON integer, however large.
///
/// Literals past `u64` arrive from serde_json as integral floats; those
/// saturate into `i128` so they fail the range check, while a float literal
/// within the integer range stays a type error.
#[derive(Debug, Clone, Copy)]
struct WireInt(i128);

impl<'de> Deserialize<'de> for WireInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IntVisitor;

        impl<'de> Visitor<'de> for IntVisitor {
            type Value = WireInt;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<WireInt, E> {
                Ok(WireInt(v.into()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<WireInt, E> {
                Ok(WireInt(v.into()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<WireInt, E> {
                let beyond_int = v >= u64::MAX as f64 || v < i64::MIN as f64;
                if v.fract() == 0.0 && beyond_int {
                    Ok(WireInt(v as i128))
                } else {
                    Err(E::invalid_type(Unexpected::Float(v), &self))
                }
            }
        }

        deserializer.deserialize_any(IntVisitor)
    }
}

/// Wire shape before range checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    score: WireInt,
    #[serde(default = "zero")]
    time_ms: WireInt,
    fluency: WireInt,
    content_depth: WireInt,
    structure: WireInt,
    filler_count: WireInt,
    improvements: Vec<String>,
    strengths: Vec<String>,
    #[serde(default)]
    risks: Vec<String>,
}

fn zero() -> WireInt {
    WireInt(0)
}

/// Parses raw provider text into a validated analysis.
pub fn parse_analysis(raw: &str) -> Result<AnswerAnalysisResult, OutputError> {
    let value: Value = serde_json::from_str(raw).map_err(OutputError::Malformed)?;
    parse_analysis_value(value)
}

/// Validates an already-parsed JSON value against the analysis schema.
pub fn parse_analysis_value(value: Value) -> Result<AnswerAnalysisResult, OutputError> {
    // serde would otherwise accept a positional array for a struct
    if !value.is_object() {
        return Err(OutputError::SchemaViolation {
            path: ".".to_string(),
            message: "expected a JSON object".to_string(),
        });
    }

    let raw: RawAnalysis =
        serde_path_to_error::deserialize(value).map_err(|e| OutputError::SchemaViolation {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;

    let (score_min, score_max) = SCORE_RANGE;
    Ok(AnswerAnalysisResult {
        score: bounded("score", raw.score, score_min, score_max)? as u32,
        time_ms: bounded("timeMs", raw.time_ms, 0, i64::MAX)? as u64,
        fluency: rating("fluency", raw.fluency)?,
        content_depth: rating("contentDepth", raw.content_depth)?,
        structure: rating("structure", raw.structure)?,
        filler_count: bounded("fillerCount", raw.filler_count, 0, u32::MAX.into())? as u32,
        improvements: raw.improvements,
        strengths: raw.strengths,
        risks: raw.risks,
    })
}

fn bounded(field: &'static str, value: WireInt, min: i64, max: i64) -> Result<i64, OutputError> {
    match i64::try_from(value.0) {
        Ok(v) if (min..=max).contains(&v) => Ok(v),
        _ => Err(OutputError::RangeViolation {
            field,
            value: value.0,
            min,
            max,
        }),
    }
}

fn rating(field: &'static str, value: WireInt) -> Result<u8, OutputError> {
    let (min, max) = RATING_RANGE;
    bounded(field, value, min, max).map(|v| v as u8)
}
