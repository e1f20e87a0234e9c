//! Deterministic virtual clock for driving a controller without wall time.

use std::{collections::BTreeMap, time::Duration};

use shared::{
    domain::TimerId,
    protocol::{CarouselSignal, TimerFired, TimerKind},
};

use crate::{
    scheduler::{Scheduler, TimerIds},
    view::SlideView,
    CarouselController,
};

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    id: TimerId,
    kind: TimerKind,
    period: Option<Duration>,
}

/// Ordered queue of timer deadlines on a virtual clock.
///
/// Timers due at the same instant fire in the order they were scheduled.
/// Repeating timers are re-queued one period after each firing.
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    seq: u64,
    ids: TimerIds,
    queue: BTreeMap<(Duration, u64), PendingTimer>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the timeline was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.queue.values().filter(|timer| timer.kind == kind).count()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its deadline. A timer left overdue by [`Timeline::advance_to`] fires
    /// at the current time instead.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerFired> {
        let (&(at, seq), _) = self.queue.first_key_value()?;
        if at > until {
            return None;
        }
        let timer = self.queue.remove(&(at, seq))?;
        self.now = self.now.max(at);
        if let Some(period) = timer.period {
            self.push(self.now + period, timer);
        }
        Some(TimerFired {
            id: timer.id,
            kind: timer.kind,
        })
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn advance_to(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    fn push(&mut self, at: Duration, timer: PendingTimer) {
        self.seq += 1;
        self.queue.insert((at, self.seq), timer);
    }

    fn schedule(&mut self, delay: Duration, kind: TimerKind, period: Option<Duration>) -> TimerId {
        let id = self.ids.next();
        self.push(self.now + delay, PendingTimer { id, kind, period });
        id
    }
}

impl Scheduler for Timeline {
    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.schedule(delay, kind, None)
    }

    fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerId {
        self.schedule(period, kind, Some(period))
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.retain(|_, timer| timer.id != id);
    }
}

impl<V: SlideView> CarouselController<V, Timeline> {
    /// Fires every timer due within the next `by` of virtual time.
    pub fn advance_by(&mut self, by: Duration) {
        let until = self.scheduler().now() + by;
        self.run_until(until);
    }

    /// Fires every timer due at or before `until`, in deadline order, then
    /// leaves the clock at `until`.
    pub fn run_until(&mut self, until: Duration) {
        while self.fire_next_due(until).is_some() {}
        self.scheduler_mut().advance_to(until);
    }

    /// Fires only the earliest timer due at or before `until`. The clock
    /// stops at that timer's deadline so callers can observe each firing.
    pub fn fire_next_due(&mut self, until: Duration) -> Option<TimerFired> {
        let fired = self.scheduler_mut().pop_due(until)?;
        self.handle(CarouselSignal::TimerFired(fired));
        Some(fired)
    }

    /// Moves the virtual clock forward to `at` without firing anything.
    ///
    /// Used by drivers that deliver an external signal at `at` after every
    /// timer due before it has fired.
    pub fn skip_to(&mut self, at: Duration) {
        self.scheduler_mut().advance_to(at);
    }
}

#[cfg(test)]
#[path = "tests/timeline_tests.rs"]
mod tests;
