use serde::{Deserialize, Serialize};

use crate::domain::{ElementKind, ImageId, ImageOutcome, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Releases the transition lock once the visual transition has run.
    TransitionSettled,
    /// One period of the repeating autoplay timer.
    AutoplayTick,
    /// Grace delay between the load gate opening and the first autoplay start.
    StartupDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerFired {
    pub id: TimerId,
    pub kind: TimerKind,
}

/// Every discrete event the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselSignal {
    IndicatorClicked { index: usize },
    PointerEntered,
    PointerLeft,
    ImageLoaded { image: ImageId },
    ImageFailed { image: ImageId },
    TimerFired(TimerFired),
}

impl CarouselSignal {
    pub fn image_settled(image: ImageId, outcome: ImageOutcome) -> Self {
        match outcome {
            ImageOutcome::Loaded => CarouselSignal::ImageLoaded { image },
            ImageOutcome::Failed => CarouselSignal::ImageFailed { image },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CarouselSignal::IndicatorClicked { .. } => "indicator_clicked",
            CarouselSignal::PointerEntered => "pointer_entered",
            CarouselSignal::PointerLeft => "pointer_left",
            CarouselSignal::ImageLoaded { .. } => "image_loaded",
            CarouselSignal::ImageFailed { .. } => "image_failed",
            CarouselSignal::TimerFired(_) => "timer_fired",
        }
    }
}

/// One activation-flag mutation applied to a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewChange {
    pub kind: ElementKind,
    pub index: usize,
    pub active: bool,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
