//! Wall-clock hour-boundary scheduling.
//!
//! Tariffs change on the hour, so the pricing screen must refresh at
//! every `:00:00` crossing no matter when it was mounted. The boundary
//! math is pure and clock-free; [`HourBoundaryScheduler`] owns the
//! actual timers.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Timelike};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const HOUR: Duration = Duration::from_secs(3600);

/// The next `:00:00` strictly after `now`.
///
/// A `now` that is exactly on a boundary still yields the *next* one --
/// the caller has already refreshed for the current hour.
pub fn next_hour_boundary<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Tz> {
    let seconds_into_hour = i64::from(now.minute() * 60 + now.second());
    let remainder = 3600 - seconds_into_hour;
    let nanos = i64::from(now.nanosecond());
    now + chrono::Duration::seconds(remainder) - chrono::Duration::nanoseconds(nanos)
}

/// How long to sleep from `now` until the next hour boundary.
pub fn delay_until_next_hour<Tz: TimeZone>(now: DateTime<Tz>) -> Duration {
    let next = next_hour_boundary(now.clone());
    (next - now).to_std().unwrap_or_default()
}

/// Time source injected into the scheduler so the first-delay computation
/// is testable without a real clock.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fires a callback at (or immediately after) every wall-clock hour
/// boundary, independent of when it was activated.
///
/// One-shot timer to the first boundary, then a 1 h periodic timer with
/// skipped missed ticks so long-running sessions get exactly one refresh
/// per hour. Deactivation cancels both timers; no callback fires after
/// deactivation.
pub struct HourBoundaryScheduler {
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl HourBoundaryScheduler {
    pub fn new() -> Self {
        Self {
            cancel: None,
            handle: None,
        }
    }

    /// Arm the timers with the system clock.
    pub fn activate<F>(&mut self, on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.activate_with_clock(SystemClock, on_tick);
    }

    /// Arm the timers with an injected clock.
    ///
    /// Idempotent per instance: a second activation without an
    /// intervening [`deactivate`](Self::deactivate) is a no-op, so a
    /// double-mounted view cannot leak a duplicate refresh cadence.
    pub fn activate_with_clock<C, F>(&mut self, clock: C, mut on_tick: F)
    where
        C: Clock,
        F: FnMut() + Send + 'static,
    {
        if self.cancel.is_some() {
            debug!("scheduler already active; ignoring duplicate activation");
            return;
        }

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let first_delay = delay_until_next_hour(clock.now());
            debug!(?first_delay, "armed one-shot timer for next hour boundary");

            tokio::select! {
                () = task_cancel.cancelled() => return,
                () = tokio::time::sleep(first_delay) => on_tick(),
            }

            let mut interval = tokio::time::interval(HOUR);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await; // consume the immediate first tick

            loop {
                tokio::select! {
                    biased;
                    () = task_cancel.cancelled() => break,
                    _ = interval.tick() => on_tick(),
                }
            }
        });

        self.cancel = Some(cancel);
        self.handle = Some(handle);
    }

    /// Cancel the pending one-shot timer and, if armed, the periodic
    /// timer. Safe to call when inactive.
    pub fn deactivate(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Default for HourBoundaryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HourBoundaryScheduler {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 5, h, m, s).unwrap()
    }

    #[test]
    fn boundary_rounds_up_to_next_hour() {
        assert_eq!(next_hour_boundary(local(14, 23, 10)), local(15, 0, 0));
        assert_eq!(next_hour_boundary(local(14, 59, 59)), local(15, 0, 0));
    }

    #[test]
    fn exact_boundary_yields_the_following_hour() {
        assert_eq!(next_hour_boundary(local(14, 0, 0)), local(15, 0, 0));
    }

    #[test]
    fn delay_matches_boundary_distance() {
        assert_eq!(
            delay_until_next_hour(local(14, 23, 10)),
            Duration::from_secs(36 * 60 + 50)
        );
        assert_eq!(delay_until_next_hour(local(9, 0, 0)), Duration::from_secs(3600));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_boundary() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let mut scheduler = HourBoundaryScheduler::new();
        scheduler.activate_with_clock(FixedClock(local(14, 23, 10)), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // 14:23:10 → 15:00:00 is 2210 s away. One second short: nothing.
        tokio::time::sleep(Duration::from_secs(2209)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        // Crossing 15:00:00 fires exactly once.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // The next fire is the 16:00:00 boundary, a full hour later.
        tokio::time::sleep(Duration::from_secs(3598)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        scheduler.deactivate();
    }

    #[tokio::test(start_paused = true)]
    async fn deactivation_before_boundary_suppresses_all_callbacks() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let mut scheduler = HourBoundaryScheduler::new();
        scheduler.activate_with_clock(FixedClock(local(14, 23, 10)), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(100)).await;
        scheduler.deactivate();
        assert!(!scheduler.is_active());

        // Well past several boundaries: still nothing.
        tokio::time::sleep(Duration::from_secs(4 * 3600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_activation_does_not_double_fire() {
        let fired = Arc::new(AtomicUsize::new(0));

        let mut scheduler = HourBoundaryScheduler::new();
        let counter = Arc::clone(&fired);
        scheduler.activate_with_clock(FixedClock(local(14, 30, 0)), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&fired);
        scheduler.activate_with_clock(FixedClock(local(14, 30, 0)), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(1801)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        scheduler.deactivate();
    }
}
