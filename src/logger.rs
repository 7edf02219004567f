use tracing::info;

/// Sink for the human-readable status lines a command prints.
pub trait Logger {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
}

/// Forwards status lines to the `tracing` subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn success(&self, message: &str) {
        info!(status = "success", "{message}");
    }
}
