//! Inbound interface for the browser's metric observers
//!
//! Each of the five web-vitals observers pushes its reports into one
//! [`SampleSink`], at its own pace and in no particular order relative to the
//! others.

use chrono::Utc;
use tracing::warn;

use crate::error::VitalsError;
use crate::log::MetricsLog;
use crate::sample::{PerformanceSample, RawMetric};
use crate::storage::StoragePort;

/// Receiver for validated samples
pub trait SampleSink {
    fn on_sample(&mut self, sample: PerformanceSample) -> Result<(), VitalsError>;
}

impl<S: StoragePort> SampleSink for MetricsLog<S> {
    fn on_sample(&mut self, sample: PerformanceSample) -> Result<(), VitalsError> {
        self.record(sample)
    }
}

/// Validate an observer payload, stamp it with the current time and forward it
///
/// Payloads with an unknown signal name or an unusable value are dropped
/// with a warning and reported as [`VitalsError::InvalidSample`].
pub fn accept_raw<K: SampleSink + ?Sized>(sink: &mut K, raw: &RawMetric) -> Result<(), VitalsError> {
    let sample = match PerformanceSample::from_raw(raw, Utc::now()) {
        Ok(sample) => sample,
        Err(e) => {
            warn!(name = %raw.name, value = raw.value, error = %e, "Rejected web vital");
            return Err(e);
        }
    };
    sink.on_sample(sample)
}
