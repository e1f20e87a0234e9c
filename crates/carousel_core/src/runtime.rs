//! Tokio driver: one task owns the controller and drains a signal queue.

use std::{collections::HashMap, time::Duration};

use shared::{
    domain::{CarouselLayout, CarouselSnapshot, ImageId, TimerId},
    error::ConfigError,
    protocol::{CarouselSignal, TimerFired, TimerKind},
};
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::{
    config::CarouselSettings,
    scheduler::{Scheduler, TimerIds},
    view::SlideView,
    CarouselController,
};

#[derive(Debug, Error)]
#[error("carousel runtime has stopped")]
pub struct RuntimeClosed;

/// Wall-clock scheduler backed by tokio timer tasks.
///
/// Each timer is a task that sends `TimerFired` into the runtime's queue.
/// Cancelling aborts the task; dropping the scheduler aborts all of them.
#[derive(Debug)]
pub struct TokioScheduler {
    signals: mpsc::UnboundedSender<CarouselSignal>,
    ids: TimerIds,
    timers: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(signals: mpsc::UnboundedSender<CarouselSignal>) -> Self {
        Self {
            signals,
            ids: TimerIds::default(),
            timers: HashMap::new(),
        }
    }

    /// Timers still waiting to fire (or, for repeating ones, still running).
    pub fn active_timers(&self) -> usize {
        self.timers
            .values()
            .filter(|task| !task.is_finished())
            .count()
    }

    fn prune_finished(&mut self) {
        self.timers.retain(|_, task| !task.is_finished());
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&mut self, delay: Duration, kind: TimerKind) -> TimerId {
        self.prune_finished();
        let id = self.ids.next();
        let signals = self.signals.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = signals.send(CarouselSignal::TimerFired(TimerFired { id, kind }));
        });
        self.timers.insert(id, task);
        id
    }

    fn schedule_repeating(&mut self, period: Duration, kind: TimerKind) -> TimerId {
        self.prune_finished();
        let id = self.ids.next();
        let signals = self.signals.clone();
        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if signals
                    .send(CarouselSignal::TimerFired(TimerFired { id, kind }))
                    .is_err()
                {
                    break;
                }
            }
        });
        self.timers.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.timers.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }
}

#[derive(Debug)]
pub struct CarouselRuntime;

impl CarouselRuntime {
    /// Binds a controller to `view` and starts processing signals.
    ///
    /// Must be called from within a tokio runtime. Configuration errors are
    /// reported here, before any task is spawned.
    pub fn spawn<V>(
        layout: &CarouselLayout,
        settings: CarouselSettings,
        view: V,
    ) -> Result<CarouselHandle, ConfigError>
    where
        V: SlideView + Send + 'static,
    {
        let (signals_tx, mut signals_rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(signals_tx.clone());
        let mut controller = CarouselController::new(layout, settings, view, scheduler)?;
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        let task = tokio::spawn(async move {
            while let Some(signal) = signals_rx.recv().await {
                controller.handle(signal);
                snapshot_tx.send_replace(controller.snapshot());
            }
            debug!("carousel signal queue closed");
        });

        Ok(CarouselHandle {
            signals: signals_tx,
            snapshots: snapshot_rx,
            task,
        })
    }
}

/// Page-side handle to a running carousel.
///
/// Dropping the handle stops the carousel and every timer it owns.
#[derive(Debug)]
pub struct CarouselHandle {
    signals: mpsc::UnboundedSender<CarouselSignal>,
    snapshots: watch::Receiver<CarouselSnapshot>,
    task: JoinHandle<()>,
}

impl CarouselHandle {
    pub fn send(&self, signal: CarouselSignal) -> Result<(), RuntimeClosed> {
        self.signals.send(signal).map_err(|_| RuntimeClosed)
    }

    pub fn click_indicator(&self, index: usize) -> Result<(), RuntimeClosed> {
        self.send(CarouselSignal::IndicatorClicked { index })
    }

    pub fn pointer_enter(&self) -> Result<(), RuntimeClosed> {
        self.send(CarouselSignal::PointerEntered)
    }

    pub fn pointer_leave(&self) -> Result<(), RuntimeClosed> {
        self.send(CarouselSignal::PointerLeft)
    }

    pub fn image_loaded(&self, image: ImageId) -> Result<(), RuntimeClosed> {
        self.send(CarouselSignal::ImageLoaded { image })
    }

    pub fn image_failed(&self, image: ImageId) -> Result<(), RuntimeClosed> {
        self.send(CarouselSignal::ImageFailed { image })
    }

    /// State as of the last handled signal.
    pub fn snapshot(&self) -> CarouselSnapshot {
        *self.snapshots.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshots.clone()
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
