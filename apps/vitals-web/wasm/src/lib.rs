//! WASM bindings for the site's Web Vitals log
//!
//! Records Core Web Vitals reported by the `web-vitals` library into a
//! bounded log in `localStorage` and exposes the log for debugging.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import * as webVitals from 'web-vitals';
//! import init, { init_web_vitals, get_web_vitals } from './pkg/vitals_wasm.js';
//!
//! await init();
//!
//! // Subscribe to CLS, INP, FCP, LCP and TTFB
//! init_web_vitals(webVitals);
//!
//! // Later, from the developer console
//! console.table(get_web_vitals());
//! ```
//!
//! Pages that wire the observers themselves can pass `report_web_vital`
//! directly, e.g. `onLCP(report_web_vital)`.

pub mod console;
pub mod storage;

use js_sys::{Function, Reflect};
use serde::Serialize;
use vitals_core::{accept_raw, MetricsLog, RawMetric, Signal, VitalsConfig, VitalsError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub use console::ConsoleChannel;
pub use storage::LocalStorage;

/// Observer registration functions exported by the `web-vitals` module
const OBSERVERS: [&str; 5] = ["onCLS", "onINP", "onFCP", "onLCP", "onTTFB"];

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Configuration used by the site: default key and capacity, mode from the build profile
pub fn site_config() -> VitalsConfig {
    VitalsConfig::default()
}

fn open_log() -> Result<MetricsLog<LocalStorage>, VitalsError> {
    let config = site_config();
    MetricsLog::from_config(LocalStorage::open()?, &config, Box::new(ConsoleChannel))
}

fn to_js(e: VitalsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_plain_object<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Record one metric reported by a web-vitals observer
///
/// Throws if the metric is not one of CLS, INP, FCP, LCP, TTFB with a
/// finite non-negative value, or if `localStorage` rejects the write.
#[wasm_bindgen]
pub fn report_web_vital(metric: JsValue) -> Result<(), JsValue> {
    let raw: RawMetric = serde_wasm_bindgen::from_value(metric)
        .map_err(|e| JsValue::from_str(&format!("Invalid metric: {}", e)))?;
    let mut log = open_log().map_err(to_js)?;
    accept_raw(&mut log, &raw).map_err(to_js)
}

/// Get the recorded samples, oldest first
///
/// Returns an array of `{ name, value, timestamp }` objects.
#[wasm_bindgen]
pub fn get_web_vitals() -> Result<JsValue, JsValue> {
    let log = open_log().map_err(to_js)?;
    to_plain_object(&log.get_all())
}

/// Get the newest recorded sample for a signal, or `null`
#[wasm_bindgen]
pub fn get_latest_web_vital(name: &str) -> Result<JsValue, JsValue> {
    let signal: Signal = name.parse().map_err(to_js)?;
    let log = open_log().map_err(to_js)?;
    match log.latest(signal) {
        Some(sample) => to_plain_object(&sample),
        None => Ok(JsValue::NULL),
    }
}

/// Subscribe `report_web_vital` to all five web-vitals observers
///
/// `observers` is the `web-vitals` module namespace (or any object with
/// `onCLS`, `onINP`, `onFCP`, `onLCP` and `onTTFB` functions).
#[wasm_bindgen]
pub fn init_web_vitals(observers: &JsValue) -> Result<(), JsValue> {
    // All five must resolve before any is registered.
    let mut registrars = Vec::with_capacity(OBSERVERS.len());
    for name in OBSERVERS {
        let register = Reflect::get(observers, &name.into())?
            .dyn_into::<Function>()
            .map_err(|_| JsValue::from_str(&format!("{} is not a function", name)))?;
        registrars.push(register);
    }

    let callback = Closure::<dyn FnMut(JsValue)>::new(|metric: JsValue| {
        if let Err(e) = report_web_vital(metric) {
            web_sys::console::warn_2(&"[Web Vitals] Dropped metric:".into(), &e);
        }
    });

    let result = registrars
        .iter()
        .try_for_each(|register| register.call1(&JsValue::NULL, callback.as_ref()).map(|_| ()));

    // Observers fire for the lifetime of the page.
    callback.forget();
    result
}
