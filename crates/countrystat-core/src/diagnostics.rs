//! Warning sink handed to the loader.
//!
//! The loader reports unavailable sources through this capability instead of
//! a process-wide logger, so embedders and tests decide where warnings go.

use parking_lot::Mutex;

/// Receives non-fatal loader warnings.
pub trait Diagnostics: Send + Sync {
    /// Report a warning.
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "countrystat::loader", "{message}");
    }
}

/// Keeps warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of collected warnings, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_collecting_diagnostics_keeps_order() {
        let sink = CollectingDiagnostics::new();
        sink.warn("first");
        sink.warn("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_diagnostics_usable_as_trait_object() {
        let sink = Arc::new(CollectingDiagnostics::new());
        let dyn_sink: Arc<dyn Diagnostics> = sink.clone();
        dyn_sink.warn("shared");
        assert_eq!(sink.messages(), vec!["shared"]);
    }

    #[test]
    fn test_tracing_diagnostics_does_not_panic_without_subscriber() {
        TracingDiagnostics.warn("nobody listens");
    }
}
