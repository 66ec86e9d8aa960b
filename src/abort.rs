//! Single-assignment cancellation for one generation attempt.
//!
//! A fresh controller is created per attempt and is the sole cancellation
//! channel. The first `abort` wins; the reason is immutable afterwards and
//! every current and future waiter observes the same value.

use std::sync::Arc;

use tokio::sync::watch;

/// Reason carried by an abort: the off-origin URL that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectError {
    /// Target of the blocked top-level navigation.
    pub url: String,
}

impl RedirectError {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Write side of the cancellation pair.
///
/// Cloning shares the same underlying slot; `abort` is write-once across all
/// clones.
#[derive(Debug, Clone)]
pub struct AbortController {
    tx: Arc<watch::Sender<Option<RedirectError>>>,
}

impl AbortController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe a new waiter. Signals taken after the abort still observe it.
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Raise the abort. The first reason wins; later calls leave the original
    /// reason in place and return `false`.
    pub fn abort(&self, reason: RedirectError) -> bool {
        self.tx.send_if_modified(|slot| {
            if slot.is_none() {
                *slot = Some(reason);
                true
            } else {
                false
            }
        })
    }

    /// The reason set by the winning `abort`, if any.
    pub fn reason(&self) -> Option<RedirectError> {
        self.tx.borrow().clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.tx.borrow().is_some()
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of the cancellation pair.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<Option<RedirectError>>,
}

impl AbortSignal {
    /// Resolve once the abort is raised, yielding its reason.
    ///
    /// If every controller clone is dropped without aborting, no abort can
    /// ever arrive and this future stays pending; callers only ever use it as
    /// the losing side of a race.
    pub async fn aborted(mut self) -> RedirectError {
        loop {
            if let Some(reason) = self.rx.borrow_and_update().clone() {
                return reason;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// The reason set by the winning `abort`, if any.
    pub fn reason(&self) -> Option<RedirectError> {
        self.rx.borrow().clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.rx.borrow().is_some()
    }
}
