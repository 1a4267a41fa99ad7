//! End-to-end behavior of the metrics log over in-memory storage

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use vitals_core::{
    accept_raw, ExecutionMode, MemoryStorage, MetricsLog, PerformanceSample, RawMetric, Signal,
    TracingChannel, VitalsConfig,
};

fn at(offset_ms: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap() + Duration::milliseconds(offset_ms)
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn five_signals_are_recorded_in_order_and_rounded() {
    let mut log = MetricsLog::new(MemoryStorage::new());
    let inputs = [
        (Signal::Cls, 0.05),
        (Signal::Inp, 180.4),
        (Signal::Fcp, 1200.9),
        (Signal::Lcp, 2500.1),
        (Signal::Ttfb, 300.0),
    ];

    for (i, (signal, value)) in inputs.iter().enumerate() {
        let sample = PerformanceSample::new(*signal, *value, at(i as i64 * 10)).unwrap();
        log.record(sample).unwrap();
    }

    let all = log.get_all();
    let names: Vec<Signal> = all.iter().map(|s| s.name).collect();
    let values: Vec<u64> = all.iter().map(|s| s.value).collect();

    assert_eq!(
        names,
        vec![Signal::Cls, Signal::Inp, Signal::Fcp, Signal::Lcp, Signal::Ttfb]
    );
    assert_eq!(values, vec![0, 180, 1201, 2500, 300]);
}

#[test]
fn rounding_applies_before_storage() {
    let mut log = MetricsLog::new(MemoryStorage::new());
    log.record(PerformanceSample::new(Signal::Lcp, 123.6, at(0)).unwrap())
        .unwrap();

    assert_eq!(log.get_all()[0].value, 124);
    assert!(log.storage().raw("webVitals").unwrap().contains(r#""value":124"#));
}

#[test]
fn eleven_samples_keep_the_last_ten() {
    let mut log = MetricsLog::new(MemoryStorage::new());
    let samples: Vec<_> = (1..=11)
        .map(|i| PerformanceSample::new(Signal::Inp, i as f64 * 10.0, at(i)).unwrap())
        .collect();

    for s in &samples {
        log.record(s.clone()).unwrap();
    }

    assert_eq!(log.get_all(), samples[1..].to_vec());
    assert_eq!(log.len(), 10);
}

#[test]
fn log_survives_a_reload() {
    let mut first = MetricsLog::new(MemoryStorage::new());
    first
        .record(PerformanceSample::new(Signal::Fcp, 900.0, at(0)).unwrap())
        .unwrap();

    // A new page load sees only what was persisted.
    let second = MetricsLog::new(first.into_storage());
    assert_eq!(second.get_all().len(), 1);
    assert_eq!(second.latest(Signal::Fcp).unwrap().value, 900);
}

#[test]
fn reads_values_written_by_the_page_script() {
    let stored = r#"[
        {"name":"LCP","value":2100,"timestamp":"2025-01-15T08:59:58.120Z"},
        {"name":"CLS","value":0,"timestamp":"2025-01-15T08:59:59.004Z"}
    ]"#;
    let mut log = MetricsLog::new(MemoryStorage::new().with_entry("webVitals", stored));
    assert_eq!(log.len(), 2);

    accept_raw(&mut log, &RawMetric::new("INP", 64.2)).unwrap();
    let all = log.get_all();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].name, Signal::Lcp);
    assert_eq!(all[2].value, 64);
}

#[test]
fn development_mode_writes_diagnostic_lines() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let config = VitalsConfig {
        mode: ExecutionMode::Development,
        ..VitalsConfig::default()
    };

    tracing::subscriber::with_default(subscriber, || {
        let mut log =
            MetricsLog::from_config(MemoryStorage::new(), &config, Box::new(TracingChannel))
                .unwrap();
        log.record(PerformanceSample::new(Signal::Lcp, 2500.1, at(0)).unwrap())
            .unwrap();
    });

    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("LCP: 2500"), "output was: {}", output);
    assert!(output.contains("web_vitals"));
}

#[test]
fn production_mode_writes_no_diagnostic_lines() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let config = VitalsConfig {
        mode: ExecutionMode::Production,
        ..VitalsConfig::default()
    };

    tracing::subscriber::with_default(subscriber, || {
        let mut log =
            MetricsLog::from_config(MemoryStorage::new(), &config, Box::new(TracingChannel))
                .unwrap();
        log.record(PerformanceSample::new(Signal::Lcp, 2500.1, at(0)).unwrap())
            .unwrap();
        assert_eq!(log.len(), 1);
    });

    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(!output.contains("LCP: 2500"), "output was: {}", output);
}

#[test]
fn oversized_stored_log_reads_back_capped() {
    let stored: Vec<_> = (0..15)
        .map(|i| PerformanceSample::new(Signal::Fcp, i as f64, at(i)).unwrap())
        .collect();
    let log = MetricsLog::new(
        MemoryStorage::new().with_entry("webVitals", serde_json::to_string(&stored).unwrap()),
    );

    assert_eq!(log.get_all().len(), 10);
    assert_eq!(log.get_all(), stored[5..].to_vec());
}
