//! Performance sample types
//!
//! A [`PerformanceSample`] is one Core Web Vitals measurement as it is kept in
//! the persisted log: the signal name, the value rounded to an integer, and an
//! ISO-8601 timestamp. [`RawMetric`] is the looser shape handed over by the
//! browser's web-vitals callbacks before validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::VitalsError;

/// One of the five measured Core Web Vitals signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    /// Cumulative Layout Shift (unitless score)
    #[serde(rename = "CLS")]
    Cls,
    /// Interaction to Next Paint (milliseconds)
    #[serde(rename = "INP")]
    Inp,
    /// First Contentful Paint (milliseconds)
    #[serde(rename = "FCP")]
    Fcp,
    /// Largest Contentful Paint (milliseconds)
    #[serde(rename = "LCP")]
    Lcp,
    /// Time to First Byte (milliseconds)
    #[serde(rename = "TTFB")]
    Ttfb,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Cls,
        Signal::Inp,
        Signal::Fcp,
        Signal::Lcp,
        Signal::Ttfb,
    ];

    /// Short name used on the wire and in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Cls => "CLS",
            Signal::Inp => "INP",
            Signal::Fcp => "FCP",
            Signal::Lcp => "LCP",
            Signal::Ttfb => "TTFB",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .into_iter()
            .find(|signal| signal.as_str() == s)
            .ok_or_else(|| VitalsError::InvalidSample(format!("Unknown signal: {:?}", s)))
    }
}

/// Metric payload as reported by the web-vitals observers
///
/// Only `name` and `value` are used; the other fields the library attaches
/// (`delta`, `id`, `rating`, `navigationType`) are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetric {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default)]
    pub id: Option<String>,
}

impl RawMetric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            delta: None,
            id: None,
        }
    }
}

/// A recorded measurement, as persisted in the metrics log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Which signal was measured
    pub name: Signal,
    /// Measurement rounded to the nearest integer
    #[serde(deserialize_with = "deserialize_value")]
    pub value: u64,
    /// When the sample was recorded
    pub timestamp: DateTime<Utc>,
}

impl PerformanceSample {
    /// Create a sample, rounding `raw_value` to the nearest integer
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidSample`] if the value is negative,
    /// NaN, infinite, or too large for a `u64`.
    pub fn new(name: Signal, raw_value: f64, timestamp: DateTime<Utc>) -> Result<Self, VitalsError> {
        Ok(Self {
            name,
            value: round_value(name, raw_value)?,
            timestamp,
        })
    }

    /// Create a sample stamped with the current time
    pub fn now(name: Signal, raw_value: f64) -> Result<Self, VitalsError> {
        Self::new(name, raw_value, Utc::now())
    }

    /// Validate a raw observer payload into a sample
    pub fn from_raw(raw: &RawMetric, timestamp: DateTime<Utc>) -> Result<Self, VitalsError> {
        let name: Signal = raw.name.parse()?;
        Self::new(name, raw.value, timestamp)
    }
}

fn round_value(name: Signal, raw_value: f64) -> Result<u64, VitalsError> {
    if !raw_value.is_finite() {
        return Err(VitalsError::InvalidSample(format!(
            "{} value is not finite: {}",
            name, raw_value
        )));
    }
    if raw_value < 0.0 {
        return Err(VitalsError::InvalidSample(format!(
            "{} value is negative: {}",
            name, raw_value
        )));
    }
    let rounded = raw_value.round();
    if rounded >= u64::MAX as f64 {
        return Err(VitalsError::InvalidSample(format!(
            "{} value is out of range: {}",
            name, raw_value
        )));
    }
    Ok(rounded as u64)
}

/// Stored values may have been written as floats; round them the same way
fn deserialize_value<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 || raw.round() >= u64::MAX as f64 {
        return Err(de::Error::custom(format!("invalid sample value: {}", raw)));
    }
    Ok(raw.round() as u64)
}
