use vitals_core::DiagnosticChannel;

/// Writes diagnostic lines to the browser console
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleChannel;

impl DiagnosticChannel for ConsoleChannel {
    fn emit(&self, line: &str) {
        web_sys::console::log_1(&format!("[Web Vitals] {}", line).into());
    }
}
