use super::*;

use shared::domain::{CarouselLayout, CarouselPhase, ElementKind, ImageId};
use shared::error::ConfigError;
use shared::protocol::CarouselSignal;

use crate::scenario::ScheduledSignal;

fn activations(replay: &Replay, kind: ElementKind) -> Vec<(u64, usize)> {
    replay
        .transcript
        .iter()
        .filter(|line| line.change.kind == kind && line.change.active)
        .map(|line| (line.at_ms, line.change.index))
        .collect()
}

#[test]
fn demo_scenario_follows_gate_hover_and_click() {
    let replay =
        replay_virtual(&Scenario::demo(), CarouselSettings::default()).expect("replay");

    // Gate opens at 300ms; autoplay starts at 1300ms and ticks at 9300ms.
    // Hover from 12s to 20s restarts the period (next tick would be 28s),
    // but the click at 26s restarts it again, so the next tick is at 34s
    // and the one after at 42s.
    assert_eq!(
        activations(&replay, ElementKind::Slide),
        vec![(300, 0), (9300, 1), (26_000, 3), (34_000, 0), (42_000, 1)]
    );
    assert_eq!(
        activations(&replay, ElementKind::Indicator),
        activations(&replay, ElementKind::Slide)
    );
    assert_eq!(
        replay.final_state.phase,
        CarouselPhase::Showing { index: 1 }
    );
    assert_eq!(replay.final_state.images_settled, 4);
}

#[test]
fn unfinished_images_keep_carousel_idle() {
    let scenario = Scenario {
        layout: CarouselLayout::uniform(3).with_pending_image_per_slide(),
        events: vec![ScheduledSignal {
            at_ms: 10,
            signal: CarouselSignal::ImageLoaded { image: ImageId(0) },
        }],
        run_until_ms: 60_000,
    };

    let replay = replay_virtual(&scenario, CarouselSettings::default()).expect("replay");
    assert!(replay.transcript.is_empty());
    assert_eq!(replay.final_state.phase, CarouselPhase::Idle);
    assert!(!replay.final_state.autoplay_running);
}

#[test]
fn degenerate_layout_surfaces_config_error() {
    let scenario = Scenario {
        layout: CarouselLayout {
            slides: 3,
            indicators: 2,
            images: Vec::new(),
        },
        events: Vec::new(),
        run_until_ms: 1000,
    };

    let err = replay_virtual(&scenario, CarouselSettings::default()).expect_err("mismatch");
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::IndicatorMismatch {
            slides: 3,
            indicators: 2
        })
    );
}

#[test]
fn transcript_lines_serialize_flat() {
    let line = TranscriptLine {
        at_ms: 9300,
        change: ViewChange {
            kind: ElementKind::Slide,
            index: 1,
            active: true,
        },
    };
    let raw = serde_json::to_value(line).expect("json");
    assert_eq!(
        raw,
        serde_json::json!({ "at_ms": 9300, "kind": "slide", "index": 1, "active": true })
    );
}

#[tokio::test(start_paused = true)]
async fn realtime_replay_matches_virtual_schedule() {
    let scenario = Scenario {
        layout: CarouselLayout::uniform(3),
        events: vec![ScheduledSignal {
            at_ms: 4000,
            signal: CarouselSignal::IndicatorClicked { index: 2 },
        }],
        run_until_ms: 13_000,
    };

    let replay = replay_realtime(&scenario, CarouselSettings::default())
        .await
        .expect("replay");

    // Click at 4s restarts the period, so the next tick lands at 12s.
    assert_eq!(
        activations(&replay, ElementKind::Slide),
        vec![(0, 0), (4000, 2), (12_000, 0)]
    );
}
