//! Bounded, persisted log of performance samples
//!
//! [`MetricsLog`] keeps a rolling window of the most recent samples under a
//! single storage key. Every operation goes back to storage: the persisted
//! value is the source of truth, nothing is cached between calls.
//!
//! # Example
//!
//! ```
//! use vitals_core::{MemoryStorage, MetricsLog, PerformanceSample, Signal};
//!
//! # fn example() -> Result<(), vitals_core::VitalsError> {
//! let mut log = MetricsLog::new(MemoryStorage::new());
//! log.record(PerformanceSample::now(Signal::Lcp, 2500.1)?)?;
//!
//! let samples = log.get_all();
//! assert_eq!(samples.len(), 1);
//! assert_eq!(samples[0].value, 2500);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::config::{VitalsConfig, DEFAULT_CAPACITY, DEFAULT_STORAGE_KEY};
use crate::diagnostics::{format_line, DiagnosticChannel};
use crate::error::VitalsError;
use crate::sample::{PerformanceSample, Signal};
use crate::storage::StoragePort;

/// FIFO-evicting sample log persisted through a [`StoragePort`]
pub struct MetricsLog<S> {
    storage: S,
    key: String,
    capacity: usize,
    diagnostics: Option<Box<dyn DiagnosticChannel>>,
}

impl<S: StoragePort> MetricsLog<S> {
    /// Log with the default key and capacity and no diagnostic output
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
            diagnostics: None,
        }
    }

    /// Log using the key, capacity and mode from `config`
    ///
    /// `channel` receives diagnostic lines in development mode and is
    /// dropped in production mode.
    pub fn from_config(
        storage: S,
        config: &VitalsConfig,
        channel: Box<dyn DiagnosticChannel>,
    ) -> Result<Self, VitalsError> {
        config.validate()?;
        Ok(Self {
            storage,
            key: config.storage_key.clone(),
            capacity: config.capacity,
            diagnostics: config.mode.is_development().then_some(channel),
        })
    }

    /// Echo every recorded sample to `channel`
    pub fn with_diagnostics(mut self, channel: Box<dyn DiagnosticChannel>) -> Self {
        self.diagnostics = Some(channel);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Append a sample, evicting the oldest entries beyond capacity
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::Storage`] if the updated log cannot be written.
    /// The previously stored log is left as it was.
    pub fn record(&mut self, sample: PerformanceSample) -> Result<(), VitalsError> {
        let line = format_line(&sample);
        let signal = sample.name;
        let value = sample.value;

        let mut samples: VecDeque<PerformanceSample> = self.load().into();
        samples.push_back(sample);

        let mut evicted = 0usize;
        while samples.len() > self.capacity {
            samples.pop_front();
            evicted += 1;
        }

        let json = serde_json::to_string(&samples)
            .map_err(|e| VitalsError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &json)?;

        debug!(
            signal = %signal,
            value,
            retained = samples.len(),
            evicted,
            "Recorded web vital"
        );

        if let Some(channel) = &self.diagnostics {
            channel.emit(&line);
        }

        Ok(())
    }

    /// Current samples, oldest first
    pub fn get_all(&self) -> Vec<PerformanceSample> {
        self.load()
    }

    /// Most recent retained sample for `signal`
    pub fn latest(&self, signal: Signal) -> Option<PerformanceSample> {
        self.load().into_iter().rev().find(|s| s.name == signal)
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the persisted log; absent, unreadable or malformed means empty
    fn load(&self) -> Vec<PerformanceSample> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read web vitals log");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<PerformanceSample>>(&raw) {
            Ok(mut samples) => {
                // Another writer may have used a larger capacity.
                samples.split_off(samples.len().saturating_sub(self.capacity))
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding malformed web vitals log");
                Vec::new()
            }
        }
    }
}
