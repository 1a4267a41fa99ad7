//! Core Web Vitals metrics log
//!
//! Keeps a small rolling window of recent performance samples (CLS, INP,
//! FCP, LCP, TTFB) in a key-value store so they can be inspected from a
//! developer console. The browser bindings in `vitals-wasm` back the store
//! with `localStorage`; everything in this crate runs natively.
//!
//! - [`MetricsLog`]: bounded FIFO log, persisted through a [`StoragePort`]
//! - [`SampleSink`]: single entry point the metric observers push into
//! - [`DiagnosticChannel`]: `NAME: value` lines in development builds
//! - [`VitalsConfig`]: storage key, capacity and execution mode

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod log;
pub mod sample;
pub mod sink;
pub mod storage;

pub use config::{ExecutionMode, VitalsConfig, DEFAULT_CAPACITY, DEFAULT_STORAGE_KEY};
pub use diagnostics::{format_line, DiagnosticChannel, TracingChannel};
pub use error::VitalsError;
pub use log::MetricsLog;
pub use sample::{PerformanceSample, RawMetric, Signal};
pub use sink::{accept_raw, SampleSink};
pub use storage::{MemoryStorage, StoragePort};
