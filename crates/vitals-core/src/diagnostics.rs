//! Developer-facing diagnostic output
//!
//! In development builds every recorded sample is echoed as a short
//! `NAME: value` line. The line never becomes part of the persisted log.

use crate::sample::PerformanceSample;

/// Sink for diagnostic text lines
pub trait DiagnosticChannel {
    fn emit(&self, line: &str);
}

/// Format the diagnostic line for a sample, e.g. `"LCP: 2500"`
pub fn format_line(sample: &PerformanceSample) -> String {
    format!("{}: {}", sample.name, sample.value)
}

/// Emits diagnostic lines as `tracing` events on the `web_vitals` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingChannel;

impl DiagnosticChannel for TracingChannel {
    fn emit(&self, line: &str) {
        tracing::info!(target: "web_vitals", "{}", line);
    }
}
