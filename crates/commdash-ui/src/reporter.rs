//! Last-resort reporting of errors nobody else handled.

use std::fmt;
use std::future::Future;

use commdash_telemetry::Metrics;
use serde::Serialize;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::error;

use crate::notify::Notifier;

const REJECTION_MESSAGE: &str = "An unexpected error occurred";

/// A synchronous failure caught at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptError {
    pub message: String,
    pub source: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl ScriptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, source: impl Into<String>, line: u32, column: u32) -> Self {
        self.source = Some(source.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line, self.column) {
            (Some(source), Some(line), Some(column)) => {
                write!(f, "{} ({source}:{line}:{column})", self.message)
            }
            _ => f.write_str(&self.message),
        }
    }
}

/// Aborts the wrapped task when dropped.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Logs uncaught failures and surfaces them as error notifications.
///
/// Nothing reported here is retried or treated as fatal.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    notifier: Notifier,
}

impl ErrorReporter {
    pub fn new(notifier: Notifier) -> Self {
        Self { notifier }
    }

    /// Report an async operation that failed with nobody awaiting it.
    pub fn report_unhandled_rejection(&self, reason: impl fmt::Display) {
        error!(reason = %reason, "Unhandled rejection");
        Metrics::unhandled_error("rejection");
        self.notifier.error(REJECTION_MESSAGE);
    }

    /// Report a synchronous failure.
    ///
    /// Always returns `false`: the default reporting path is left in place.
    pub fn report_script_error(&self, err: &ScriptError) -> bool {
        error!(
            message = %err.message,
            source = ?err.source,
            line = ?err.line,
            column = ?err.column,
            "Script error"
        );
        Metrics::unhandled_error("script");
        self.notifier.error(format!("An error occurred: {}", err.message));
        false
    }

    /// Spawn `fut` on the current runtime and report how it ends.
    ///
    /// An `Err` is reported as an unhandled rejection, a panic as a script
    /// error. Aborting the returned handle also cancels `fut`; a cancelled
    /// task is not reported.
    pub fn spawn_reported<F>(&self, name: &'static str, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let reporter = self.clone();
        let task = tokio::spawn(fut);
        let guard = AbortOnDrop(task.abort_handle());
        tokio::spawn(async move {
            let _guard = guard;
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => reporter.report_unhandled_rejection(format!("{name}: {e:#}")),
                Err(join_err) if join_err.is_panic() => {
                    let payload = join_err.into_panic();
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "task panicked".to_string());
                    reporter.report_script_error(&ScriptError {
                        source: Some(name.to_string()),
                        ..ScriptError::new(message)
                    });
                }
                Err(_) => {}
            }
        })
    }
}
