//! Termination signals (SIGINT, SIGTERM).
//!
//! Handlers are registered by `ShutdownSignal::install`, which `main` calls
//! before loading config, so a signal during startup is captured instead of
//! hitting the default disposition. The protocol loop only observes it between
//! units.

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Registered termination handlers.
#[derive(Debug)]
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: Option<Signal>,
    #[cfg(unix)]
    terminate: Option<Signal>,
}

impl ShutdownSignal {
    /// Register the handlers now. Must run inside a tokio runtime context.
    ///
    /// A handler that cannot be installed is logged and that signal is never
    /// observed; end of input still stops the loop.
    #[cfg(unix)]
    pub fn install() -> Self {
        Self {
            interrupt: register(SignalKind::interrupt(), "SIGINT"),
            terminate: register(SignalKind::terminate(), "SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    pub fn install() -> Self {
        Self {}
    }

    /// Resolves once either signal has been delivered, including signals that
    /// arrived between `install` and this call.
    #[cfg(unix)]
    pub async fn wait(self) {
        tokio::select! {
            _ = recv(self.interrupt, "SIGINT") => {},
            _ = recv(self.terminate, "SIGTERM") => {},
        }
    }

    #[cfg(not(unix))]
    pub async fn wait(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(unix)]
fn register(kind: SignalKind, name: &'static str) -> Option<Signal> {
    match signal(kind) {
        Ok(sig) => Some(sig),
        Err(e) => {
            tracing::warn!(error = %e, signal = name, "failed to install signal handler");
            None
        }
    }
}

#[cfg(unix)]
async fn recv(sig: Option<Signal>, name: &'static str) {
    match sig {
        Some(mut sig) => {
            sig.recv().await;
            tracing::info!(signal = name, "received termination signal");
        }
        None => std::future::pending::<()>().await,
    }
}
