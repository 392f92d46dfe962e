//! Deadline alarm: a one-shot cancellable timer racing the response sink.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation handle for a [`DeadlineAlarm`]. Cancelling is idempotent;
/// clearing an already-cleared alarm is a no-op.
#[derive(Clone)]
pub(crate) struct AlarmHandle {
    token: CancellationToken,
}

impl AlarmHandle {
    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }
}

/// One-shot alarm armed when an interaction is authenticated. The deadline
/// is fixed at construction, so time spent in hooks counts against it.
pub(crate) struct DeadlineAlarm {
    deadline: Instant,
    token: CancellationToken,
}

impl DeadlineAlarm {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            token: CancellationToken::new(),
        }
    }

    pub(crate) fn handle(&self) -> AlarmHandle {
        AlarmHandle {
            token: self.token.clone(),
        }
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Resolves when the deadline elapses. Pends forever once cancelled, so
    /// a cancelled alarm can never win a race.
    pub(crate) async fn fired(&self) {
        tokio::select! {
            () = tokio::time::sleep_until(self.deadline) => (),
            () = self.token.cancelled() => std::future::pending::<()>().await,
        }
    }
}
