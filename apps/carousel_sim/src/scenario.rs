use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::{
    domain::{CarouselLayout, ImageId},
    protocol::CarouselSignal,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledSignal {
    pub at_ms: u64,
    pub signal: CarouselSignal,
}

/// A page layout plus the external signals it receives over time.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub layout: CarouselLayout,
    #[serde(default)]
    pub events: Vec<ScheduledSignal>,
    pub run_until_ms: u64,
}

impl Scenario {
    /// Four slides whose images trickle in (two of them broken), a hover
    /// pause, and one manual jump.
    pub fn demo() -> Self {
        let at = |at_ms, signal| ScheduledSignal { at_ms, signal };
        Self {
            layout: CarouselLayout::uniform(4).with_pending_image_per_slide(),
            events: vec![
                at(120, CarouselSignal::ImageLoaded { image: ImageId(0) }),
                at(180, CarouselSignal::ImageLoaded { image: ImageId(1) }),
                at(240, CarouselSignal::ImageFailed { image: ImageId(2) }),
                at(300, CarouselSignal::ImageFailed { image: ImageId(3) }),
                at(12_000, CarouselSignal::PointerEntered),
                at(20_000, CarouselSignal::PointerLeft),
                at(26_000, CarouselSignal::IndicatorClicked { index: 3 }),
            ],
            run_until_ms: 45_000,
        }
    }

    /// Events due within the run, in delivery order. Events sharing a
    /// timestamp keep their file order.
    pub fn ordered_events(&self) -> Vec<ScheduledSignal> {
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|event| event.at_ms <= self.run_until_ms)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.at_ms);
        events
    }
}

pub fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse scenario '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod tests;
