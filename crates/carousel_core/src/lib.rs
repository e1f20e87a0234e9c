use std::collections::HashSet;

use shared::{
    domain::{
        CarouselLayout, CarouselPhase, CarouselSnapshot, ElementKind, ImageId, ImageOutcome,
        TimerId,
    },
    error::ConfigError,
    protocol::{CarouselSignal, TimerFired, TimerKind},
};
use tracing::{debug, info, trace};

pub mod config;
pub mod load_gate;
pub mod runtime;
pub mod scheduler;
pub mod timeline;
pub mod view;

pub use config::{load_settings, CarouselSettings};
pub use load_gate::{GateStep, LoadGate};
pub use runtime::{CarouselHandle, CarouselRuntime, RuntimeClosed, TokioScheduler};
pub use scheduler::Scheduler;
pub use timeline::Timeline;
pub use view::{MemoryView, SlideView};

/// Why a requested transition did not happen. Never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Images are still settling and no slide has been shown yet.
    NotStarted,
    OutOfRange { index: usize, len: usize },
    AlreadyShowing,
    /// Another transition holds the lock.
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Started { from: usize, to: usize },
    Ignored(IgnoreReason),
}

impl TransitionOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, TransitionOutcome::Started { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    from: usize,
    to: usize,
    settle_timer: TimerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Startup {
    AwaitingImages,
    Delayed(TimerId),
    Done,
}

/// Drives which slide/indicator pair is active.
///
/// Every signal is handled synchronously and to completion, so the
/// transition flag is the only mutual exclusion needed. All timing goes
/// through the injected [`Scheduler`]; all page mutation goes through the
/// injected [`SlideView`].
#[derive(Debug)]
pub struct CarouselController<V, S> {
    settings: CarouselSettings,
    view: V,
    scheduler: S,
    len: usize,
    current: usize,
    shown: bool,
    in_flight: Option<InFlight>,
    autoplay: Option<TimerId>,
    autoplay_started: bool,
    startup: Startup,
    gate: LoadGate,
}

impl<V: SlideView, S: Scheduler> CarouselController<V, S> {
    /// Binds a controller to the page.
    ///
    /// Images already loaded or failed count toward the load gate at once.
    /// When nothing is left pending (including a carousel without images)
    /// the first pair is shown and the startup delay is scheduled before
    /// this returns.
    pub fn new(
        layout: &CarouselLayout,
        settings: CarouselSettings,
        view: V,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        validate_layout(layout)?;
        settings.validate()?;

        let mut controller = Self {
            settings,
            view,
            scheduler,
            len: layout.slides,
            current: 0,
            shown: false,
            in_flight: None,
            autoplay: None,
            autoplay_started: false,
            startup: Startup::AwaitingImages,
            gate: LoadGate::new(&layout.images),
        };

        debug!(
            slides = layout.slides,
            images = controller.gate.total(),
            settled = controller.gate.settled(),
            "carousel bound to page"
        );

        if controller.gate.is_open() {
            controller.open_gate();
        }

        Ok(controller)
    }

    pub fn handle(&mut self, signal: CarouselSignal) {
        trace!(signal = signal.name(), "carousel signal");
        match signal {
            CarouselSignal::IndicatorClicked { index } => self.indicator_clicked(index),
            CarouselSignal::PointerEntered => self.pointer_entered(),
            CarouselSignal::PointerLeft => self.pointer_left(),
            CarouselSignal::ImageLoaded { image } => {
                self.image_settled(image, ImageOutcome::Loaded)
            }
            CarouselSignal::ImageFailed { image } => {
                self.image_settled(image, ImageOutcome::Failed)
            }
            CarouselSignal::TimerFired(fired) => self.timer_fired(fired),
        }
    }

    pub fn show_slide(&mut self, target: usize) -> TransitionOutcome {
        if !self.shown {
            return self.ignored(target, IgnoreReason::NotStarted);
        }
        if self.in_flight.is_some() {
            return self.ignored(target, IgnoreReason::InFlight);
        }
        if target >= self.len {
            return self.ignored(
                target,
                IgnoreReason::OutOfRange {
                    index: target,
                    len: self.len,
                },
            );
        }
        if target == self.current {
            return self.ignored(target, IgnoreReason::AlreadyShowing);
        }

        let from = self.current;
        self.set_pair(from, false);
        self.set_pair(target, true);
        self.current = target;

        let settle_timer = self
            .scheduler
            .schedule_once(self.settings.transition(), TimerKind::TransitionSettled);
        self.in_flight = Some(InFlight {
            from,
            to: target,
            settle_timer,
        });

        debug!(from, to = target, "slide transition started");
        TransitionOutcome::Started { from, to: target }
    }

    pub fn next_slide(&mut self) -> TransitionOutcome {
        if self.in_flight.is_some() {
            return self.ignored(self.current, IgnoreReason::InFlight);
        }
        self.show_slide((self.current + 1) % self.len)
    }

    /// (Re)starts the repeating autoplay timer with a full fresh period.
    pub fn start_autoplay(&mut self) {
        if let Some(previous) = self.autoplay.take() {
            self.scheduler.cancel(previous);
        }
        let timer = self
            .scheduler
            .schedule_repeating(self.settings.autoplay_interval(), TimerKind::AutoplayTick);
        self.autoplay = Some(timer);
        self.autoplay_started = true;
        debug!(timer = %timer, interval_ms = self.settings.autoplay_interval_ms, "autoplay started");
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(timer) = self.autoplay.take() {
            self.scheduler.cancel(timer);
            debug!(timer = %timer, "autoplay stopped");
        }
    }

    /// Manual navigation: jumps to `index` and restarts the autoplay period.
    pub fn indicator_clicked(&mut self, index: usize) {
        if !self.shown {
            debug!(index, "indicator click before first slide; ignoring");
            return;
        }
        if self.in_flight.is_some() || index == self.current || index >= self.len {
            debug!(
                index,
                current = self.current,
                transitioning = self.in_flight.is_some(),
                "indicator click ignored"
            );
            return;
        }

        self.stop_autoplay();
        self.show_slide(index);
        self.start_autoplay();
    }

    pub fn pointer_entered(&mut self) {
        if !self.shown {
            return;
        }
        self.stop_autoplay();
    }

    pub fn pointer_left(&mut self) {
        if !self.shown {
            return;
        }
        self.start_autoplay();
    }

    pub fn image_settled(&mut self, image: ImageId, outcome: ImageOutcome) {
        match self.gate.settle(image) {
            GateStep::Counted => debug!(
                image = %image,
                ?outcome,
                settled = self.gate.settled(),
                total = self.gate.total(),
                "carousel image settled"
            ),
            GateStep::Opened => {
                debug!(image = %image, ?outcome, "last carousel image settled");
                self.open_gate();
            }
            GateStep::Ignored => debug!(
                image = %image,
                ?outcome,
                "ignoring completion for unknown or already settled image"
            ),
        }
    }

    pub fn timer_fired(&mut self, fired: TimerFired) {
        let TimerFired { id, kind } = fired;
        match kind {
            TimerKind::TransitionSettled => match self.in_flight {
                Some(flight) if flight.settle_timer == id => {
                    self.in_flight = None;
                    trace!(index = flight.to, "slide transition settled");
                }
                _ => debug!(timer = %id, "ignoring stale transition timer"),
            },
            TimerKind::AutoplayTick => {
                if self.autoplay == Some(id) {
                    trace!(timer = %id, "autoplay tick");
                    self.next_slide();
                } else {
                    debug!(timer = %id, "ignoring tick from cancelled autoplay timer");
                }
            }
            TimerKind::StartupDelay => {
                if self.startup == Startup::Delayed(id) {
                    self.startup = Startup::Done;
                    info!("carousel startup delay elapsed; starting autoplay");
                    self.start_autoplay();
                } else {
                    debug!(timer = %id, "ignoring stale startup timer");
                }
            }
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.len
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_some()
    }

    /// `(settled, total)` image counts.
    pub fn load_progress(&self) -> (usize, usize) {
        (self.gate.settled(), self.gate.total())
    }

    pub fn phase(&self) -> CarouselPhase {
        if !self.shown {
            return CarouselPhase::Idle;
        }
        if let Some(flight) = self.in_flight {
            return CarouselPhase::Transitioning {
                from: flight.from,
                to: flight.to,
            };
        }
        if self.autoplay_started && self.autoplay.is_none() {
            return CarouselPhase::Paused {
                index: self.current,
            };
        }
        CarouselPhase::Showing {
            index: self.current,
        }
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            phase: self.phase(),
            current_index: self.current,
            transitioning: self.is_transitioning(),
            autoplay_running: self.autoplay_running(),
            images_settled: self.gate.settled(),
            images_total: self.gate.total(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn open_gate(&mut self) {
        info!(
            images = self.gate.total(),
            "carousel images settled; showing first slide"
        );
        self.current = 0;
        self.set_pair(0, true);
        self.shown = true;

        let timer = self
            .scheduler
            .schedule_once(self.settings.startup_delay(), TimerKind::StartupDelay);
        self.startup = Startup::Delayed(timer);
    }

    fn set_pair(&mut self, index: usize, active: bool) {
        self.view.set_active(ElementKind::Slide, index, active);
        self.view.set_active(ElementKind::Indicator, index, active);
    }

    fn ignored(&self, requested: usize, reason: IgnoreReason) -> TransitionOutcome {
        debug!(requested, current = self.current, ?reason, "slide transition ignored");
        TransitionOutcome::Ignored(reason)
    }
}

fn validate_layout(layout: &CarouselLayout) -> Result<(), ConfigError> {
    if layout.slides == 0 {
        return Err(ConfigError::NoSlides);
    }
    if layout.indicators != layout.slides {
        return Err(ConfigError::IndicatorMismatch {
            slides: layout.slides,
            indicators: layout.indicators,
        });
    }

    let mut seen = HashSet::new();
    for image in &layout.images {
        if image.slide >= layout.slides {
            return Err(ConfigError::ImageOutsideDeck {
                image: image.id,
                slide: image.slide,
                slides: layout.slides,
            });
        }
        if !seen.insert(image.id) {
            return Err(ConfigError::DuplicateImage { image: image.id });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
