//! Cancellable scheduled tasks owned by a single step.
//!
//! A [`ScopedTimer`] is a tokio task that pushes [`TimerTick`]s into the
//! application's event channel. Dropping the timer aborts the task, so a step
//! that owns its timers releases them on every exit path. Ticks carry the
//! owner's [`TimerToken`]; ticks that were already queued when the owner went
//! away are recognisable and can be discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of one timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a timer is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// OTP resend countdown, once per second.
    ResendCountdown,
    /// Simulated fingerprint scan progress.
    ScanProgress,
    /// Delay between vote finalization and the completion hook.
    CompletionDelay,
}

/// One firing of a scoped timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub token: TimerToken,
    pub kind: TimerKind,
}

/// Handle to a running timer task. Aborts the task when dropped.
#[derive(Debug)]
pub struct ScopedTimer {
    token: TimerToken,
    kind: TimerKind,
    handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Fire every `period`, first firing one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn interval<E, F>(
        period: Duration,
        kind: TimerKind,
        tx: mpsc::UnboundedSender<E>,
        wrap: F,
    ) -> Self
    where
        E: Send + 'static,
        F: Fn(TimerTick) -> E + Send + 'static,
    {
        let token = TimerToken::next();
        let tick = TimerTick { token, kind };
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(wrap(tick)).is_err() {
                    break;
                }
            }
        });
        log::debug!("Started {kind:?} timer {token:?} every {period:?}");
        Self { token, kind, handle }
    }

    /// Fire once after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn once<E, F>(delay: Duration, kind: TimerKind, tx: mpsc::UnboundedSender<E>, wrap: F) -> Self
    where
        E: Send + 'static,
        F: FnOnce(TimerTick) -> E + Send + 'static,
    {
        let token = TimerToken::next();
        let tick = TimerTick { token, kind };
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(wrap(tick));
        });
        log::debug!("Scheduled {kind:?} timer {token:?} in {delay:?}");
        Self { token, kind, handle }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Whether `tick` was produced by this timer.
    pub fn owns(&self, tick: &TimerTick) -> bool {
        tick.token == self.token
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the timer now. Equivalent to dropping it.
    pub fn cancel(self) {}
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.handle.abort();
        log::trace!("Released {:?} timer {:?}", self.kind, self.token);
    }
}

/// Owner check over an optional timer slot.
pub fn owned_by(slot: &Option<ScopedTimer>, tick: &TimerTick) -> bool {
    slot.as_ref().is_some_and(|timer| timer.owns(tick))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_interval_ticks_carry_token() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ScopedTimer::interval(
            Duration::from_millis(5),
            TimerKind::ScanProgress,
            tx,
            |tick| tick,
        );

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(timer.owns(&first));
        assert_eq!(first, second);
        assert_eq!(first.kind, TimerKind::ScanProgress);
    }

    #[tokio::test]
    async fn test_drop_releases_task() {
        let (tx, mut rx) = mpsc::unbounded_channel::<TimerTick>();
        let timer = ScopedTimer::interval(
            Duration::from_millis(5),
            TimerKind::ResendCountdown,
            tx,
            |tick| tick,
        );
        rx.recv().await.unwrap();
        drop(timer);

        // The aborted task drops the only sender, so the channel drains and closes.
        let drained = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok(), "timer kept sending after drop");
    }

    #[tokio::test]
    async fn test_once_fires_exactly_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ScopedTimer::once(
            Duration::from_millis(5),
            TimerKind::CompletionDelay,
            tx,
            |tick| tick,
        );
        let tick = rx.recv().await.unwrap();
        assert!(timer.owns(&tick));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let (tx, _rx) = mpsc::unbounded_channel::<TimerTick>();
        let a = ScopedTimer::once(Duration::from_secs(60), TimerKind::CompletionDelay, tx.clone(), |t| t);
        let b = ScopedTimer::once(Duration::from_secs(60), TimerKind::CompletionDelay, tx, |t| t);
        assert_ne!(a.token(), b.token());

        let stale = TimerTick { token: a.token(), kind: TimerKind::CompletionDelay };
        assert!(!b.owns(&stale));
        assert!(owned_by(&Some(a), &stale));
        assert!(!owned_by(&None, &stale));
    }
}
