use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ImageId, u32);
id_newtype!(TimerId, u64);

/// Which of the two index-aligned element sequences a flag change touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Slide,
    Indicator,
}

/// Readiness of an image at the moment the carousel binds to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl ImageStatus {
    pub fn is_settled(self) -> bool {
        !matches!(self, ImageStatus::Pending)
    }
}

/// How an image completion signal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub id: ImageId,
    /// Index of the slide that contains the image.
    pub slide: usize,
    #[serde(default)]
    pub status: ImageStatus,
}

/// Element collections discovered on the page at bind time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarouselLayout {
    pub slides: usize,
    pub indicators: usize,
    #[serde(default)]
    pub images: Vec<ImageSource>,
}

impl CarouselLayout {
    /// A layout with `count` slides, `count` indicators and no images.
    pub fn uniform(count: usize) -> Self {
        Self {
            slides: count,
            indicators: count,
            images: Vec::new(),
        }
    }

    /// Adds one pending image to every slide, ids numbered from zero.
    pub fn with_pending_image_per_slide(mut self) -> Self {
        self.images = (0..self.slides)
            .map(|slide| ImageSource {
                id: ImageId(slide as u32),
                slide,
                status: ImageStatus::Pending,
            })
            .collect();
        self
    }
}

/// Observable controller phase, derived from controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CarouselPhase {
    /// Images still settling; no slide is active.
    Idle,
    Showing { index: usize },
    Transitioning { from: usize, to: usize },
    /// Autoplay was running and has been stopped; the shown slide is retained.
    Paused { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub phase: CarouselPhase,
    pub current_index: usize,
    pub transitioning: bool,
    pub autoplay_running: bool,
    pub images_settled: usize,
    pub images_total: usize,
}
