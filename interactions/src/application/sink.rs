//! Response sink: single-fire guarded delivery racing the deadline alarm.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use howl_common::InteractionResponse;
use thiserror::Error;

use super::alarm::AlarmHandle;

/// Error type surfaced by a consumer response callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Async callback invoked with the single response for an interaction.
pub type ResponseCallback =
    Arc<dyn Fn(InteractionResponse) -> BoxFuture<'static, Result<(), CallbackError>> + Send + Sync>;

/// Errors from delivering a response.
#[derive(Debug, Error)]
pub enum SinkError {
    /// A response was already committed through this sink.
    #[error("a response was already delivered for this interaction")]
    AlreadyResponded,
    /// The consumer callback failed.
    #[error("response callback failed: {0}")]
    Callback(#[source] CallbackError),
}

struct SinkInner {
    callback: ResponseCallback,
    alarm: AlarmHandle,
    sent: AtomicBool,
}

/// Deadline-aware response sink handed to hooks and routed handlers.
///
/// The first [`send`](Self::send) commits the outcome: it cancels the
/// deadline alarm and forwards the response to the consumer callback. Any
/// later send, from either the handler or a stale path, is rejected to
/// preserve at-most-once delivery. The sink stays usable after the dispatch
/// future has already failed with a timeout.
#[derive(Clone)]
pub struct ResponseSink {
    inner: Arc<SinkInner>,
}

impl ResponseSink {
    pub(crate) fn new(callback: ResponseCallback, alarm: AlarmHandle) -> Self {
        Self {
            inner: Arc::new(SinkInner {
                callback,
                alarm,
                sent: AtomicBool::new(false),
            }),
        }
    }

    /// Deliver the response for this interaction.
    pub async fn send(&self, response: InteractionResponse) -> Result<(), SinkError> {
        if self.inner.sent.swap(true, Ordering::SeqCst) {
            return Err(SinkError::AlreadyResponded);
        }
        self.inner.alarm.cancel();
        (self.inner.callback)(response).await.map_err(SinkError::Callback)
    }

    /// Whether a response has already been committed.
    #[must_use]
    pub fn responded(&self) -> bool {
        self.inner.sent.load(Ordering::SeqCst)
    }
}
