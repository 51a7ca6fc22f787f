//! Per-request context: trace ids plus the timeout and cancellation signal
//! applied to every store round-trip.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, Instrument};

use crate::data::errors::{CoreError, CoreResult};
use crate::data::trace_context::TraceContext;

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Receiver side of a cancellation signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelHandle {
    pub fn new() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelSignal { rx })
    }

    /// Cancels every operation observing a signal from this handle.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested. Never resolves if the handle
    /// is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Context threaded through every service call.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub trace_ctx: TraceContext,
    store_timeout: Option<Duration>,
    cancel: Option<CancelSignal>,
}

impl RequestContext {
    /// Creates a context with a fresh root trace and no limits.
    pub fn new_root() -> Self {
        Self::default()
    }

    /// Bounds each store round-trip by `timeout`.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    pub fn with_cancel_signal(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_ctx.trace_id
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout
    }

    /// Runs one store round-trip under this context, inside a child span of
    /// the request's trace. Fails with `CoreError::Cancelled` if the signal
    /// fires or the timeout elapses first.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> CoreResult<T>
    where
        F: Future<Output = CoreResult<T>>,
    {
        if self.cancel.as_ref().is_some_and(CancelSignal::is_cancelled) {
            return Err(CoreError::cancelled(operation, "cancelled by caller"));
        }

        let cancelled = async {
            match &self.cancel {
                Some(signal) => signal.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };

        let bounded = async {
            match self.store_timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(CoreError::cancelled(
                        operation,
                        format!("timed out after {}ms", limit.as_millis()),
                    )),
                },
                None => fut.await,
            }
        };

        let call = self.trace_ctx.child_span();
        let span = call.store_span(operation);

        async {
            let result = tokio::select! {
                biased;
                _ = cancelled => Err(CoreError::cancelled(operation, "cancelled by caller")),
                result = bounded => result,
            };
            if let Err(CoreError::Cancelled { reason, .. }) = &result {
                debug!(span_id = %call.span_id, %reason, "Store call cancelled");
            }
            result
        }
        .instrument(span)
        .await
    }
}
