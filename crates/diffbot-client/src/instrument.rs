use diffbot_core::traits::Instrumentor;

/// Instrumentor that turns request events into `tracing` events.
///
/// `*.error` events are logged at `warn`, everything else at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentor;

impl TracingInstrumentor {
    pub fn new() -> Self {
        Self
    }
}

impl Instrumentor for TracingInstrumentor {
    fn instrument(&self, event: &str, payload: &serde_json::Value) {
        if event.ends_with(".error") {
            tracing::warn!(event, %payload, "Diffbot request failed");
        } else {
            tracing::info!(event, %payload, "Diffbot event");
        }
    }
}
