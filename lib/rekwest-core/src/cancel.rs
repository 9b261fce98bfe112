//! Caller-supplied cancellation signal.
//!
//! A [`Cancellation`] fires either when [`Cancellation::cancel`] is called on
//! any of its clones, or when its optional deadline passes. The default signal
//! never fires.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Cancellation signal raced against an in-flight request.
///
/// # Example
///
/// ```ignore
/// let cancellation = Cancellation::with_timeout(Duration::from_millis(200));
/// let mut request = Rekwest::new(url).cancellation(cancellation.clone());
///
/// // from another task
/// cancellation.cancel();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that only fires when cancelled manually.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that fires at `deadline` at the latest.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// A signal that fires once `timeout` has elapsed from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Derive a signal that fires with this one, and can be cancelled alone.
    ///
    /// The child keeps the earliest of both deadlines.
    #[must_use]
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let own = timeout.map(|timeout| Instant::now() + timeout);
        let deadline = match (self.deadline, own) {
            (Some(parent), Some(own)) => Some(parent.min(own)),
            (parent, own) => parent.or(own),
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    /// Fire the signal.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The reason this signal has fired, or `None` while it is still pending.
    #[must_use]
    pub fn error(&self) -> Option<Error> {
        if self.token.is_cancelled() {
            Some(Error::Canceled)
        } else if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            Some(Error::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Wait until the signal fires, and return why.
    ///
    /// Never completes for a signal without deadline that nobody cancels.
    pub async fn cancelled(&self) -> Error {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    () = self.token.cancelled() => Error::Canceled,
                    () = tokio::time::sleep_until(deadline) => Error::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                Error::Canceled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn manual_cancel() {
        let cancellation = Cancellation::new();
        check!(cancellation.error().is_none());

        let handle = cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        let_assert!(Error::Canceled = cancellation.cancelled().await);
        check!(cancellation.error().is_some_and(|err| err.is_canceled()));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fires() {
        let cancellation = Cancellation::with_timeout(Duration::from_millis(5));
        let err = cancellation.cancelled().await;
        check!(err.to_string() == "cancellation deadline exceeded");
        let_assert!(Some(Error::DeadlineExceeded) = cancellation.error());
    }

    #[tokio::test(start_paused = true)]
    async fn default_never_fires() {
        let cancellation = Cancellation::default();
        let waited = tokio::time::timeout(Duration::from_secs(3600), cancellation.cancelled()).await;
        check!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn child_follows_parent() {
        let parent = Cancellation::with_timeout(Duration::from_secs(10));
        let child = parent.child(Some(Duration::from_secs(60)));
        check!(child.deadline() == parent.deadline());

        parent.cancel();
        let_assert!(Error::Canceled = child.cancelled().await);
    }

    #[test]
    fn cancelling_child_leaves_parent() {
        let parent = Cancellation::new();
        let child = parent.child(None);
        child.cancel();

        check!(child.error().is_some());
        check!(parent.error().is_none());
    }
}
