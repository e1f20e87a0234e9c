//! Timer seam between the controller and whatever clock drives it.

use std::time::Duration;

use shared::{domain::TimerId, protocol::TimerKind};

/// Schedules future [`TimerFired`](shared::protocol::TimerFired) signals.
///
/// Implementations deliver each firing back into the controller as
/// `CarouselSignal::TimerFired` carrying the id returned here. A cancelled
/// id must never be delivered again once `cancel` returns, but a firing that
/// was already queued may still arrive; the controller discards those.
pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId;
    fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

/// Hands out monotonically increasing timer ids.
#[derive(Debug, Default, Clone)]
pub(crate) struct TimerIds {
    next: u64,
}

impl TimerIds {
    pub(crate) fn next(&mut self) -> TimerId {
        self.next += 1;
        TimerId(self.next)
    }
}
