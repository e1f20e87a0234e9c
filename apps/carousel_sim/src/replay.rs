use std::time::Duration;

use carousel_core::{CarouselController, CarouselRuntime, CarouselSettings, MemoryView, Timeline};
use serde::Serialize;
use shared::{domain::CarouselSnapshot, protocol::ViewChange};
use tokio::time::Instant;

use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub at_ms: u64,
    #[serde(flatten)]
    pub change: ViewChange,
}

#[derive(Debug, Clone)]
pub struct Replay {
    pub transcript: Vec<TranscriptLine>,
    pub final_state: CarouselSnapshot,
}

fn record(view: &MemoryView, at_ms: u64, transcript: &mut Vec<TranscriptLine>) {
    transcript.extend(
        view.drain_changes()
            .into_iter()
            .map(|change| TranscriptLine { at_ms, change }),
    );
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Replays the scenario on a virtual clock; returns as fast as it computes.
pub fn replay_virtual(scenario: &Scenario, settings: CarouselSettings) -> anyhow::Result<Replay> {
    let layout = &scenario.layout;
    let view = MemoryView::new(layout.slides, layout.indicators);
    let mut controller = CarouselController::new(layout, settings, view.clone(), Timeline::new())?;
    let mut transcript = Vec::new();
    record(&view, 0, &mut transcript);

    let run_until = Duration::from_millis(scenario.run_until_ms);
    for event in scenario.ordered_events() {
        let at = Duration::from_millis(event.at_ms);
        drain_timers(&mut controller, &view, at, &mut transcript);
        controller.skip_to(at);
        controller.handle(event.signal);
        record(&view, event.at_ms, &mut transcript);
    }
    drain_timers(&mut controller, &view, run_until, &mut transcript);
    controller.skip_to(run_until);

    Ok(Replay {
        transcript,
        final_state: controller.snapshot(),
    })
}

fn drain_timers(
    controller: &mut CarouselController<MemoryView, Timeline>,
    view: &MemoryView,
    until: Duration,
    transcript: &mut Vec<TranscriptLine>,
) {
    while controller.fire_next_due(until).is_some() {
        record(view, millis(controller.scheduler().now()), transcript);
    }
}

/// Replays the scenario against the tokio runtime on the wall clock.
pub async fn replay_realtime(
    scenario: &Scenario,
    settings: CarouselSettings,
) -> anyhow::Result<Replay> {
    let layout = &scenario.layout;
    let view = MemoryView::new(layout.slides, layout.indicators);
    let handle = CarouselRuntime::spawn(layout, settings, view.clone())?;
    let mut updates = handle.subscribe();

    let started = Instant::now();
    let deadline = started + Duration::from_millis(scenario.run_until_ms);
    let mut transcript = Vec::new();
    record(&view, 0, &mut transcript);

    let mut events = scenario.ordered_events().into_iter().peekable();
    loop {
        let wake_at = events
            .peek()
            .map(|event| started + Duration::from_millis(event.at_ms))
            .unwrap_or(deadline);

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                record(&view, millis(started.elapsed()), &mut transcript);
            }
            _ = tokio::time::sleep_until(wake_at) => {
                let Some(event) = events.next() else {
                    break;
                };
                handle.send(event.signal)?;
            }
        }
    }

    record(&view, millis(started.elapsed()), &mut transcript);
    let final_state = handle.snapshot();
    handle.shutdown();

    Ok(Replay {
        transcript,
        final_state,
    })
}

#[cfg(test)]
#[path = "tests/replay_tests.rs"]
mod tests;
