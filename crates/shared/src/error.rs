use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ImageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NoSlides,
    IndicatorMismatch,
    ImageOutsideDeck,
    DuplicateImage,
    ZeroDuration,
}

/// Construction-time rejection of a carousel that could not run safely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("carousel has no slides")]
    NoSlides,
    #[error("carousel has {slides} slides but {indicators} indicators")]
    IndicatorMismatch { slides: usize, indicators: usize },
    #[error("image {image} sits in slide {slide} but the carousel has {slides} slides")]
    ImageOutsideDeck {
        image: ImageId,
        slide: usize,
        slides: usize,
    },
    #[error("image {image} is listed more than once")]
    DuplicateImage { image: ImageId },
    #[error("setting '{setting}' must be greater than zero")]
    ZeroDuration { setting: &'static str },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::NoSlides => ErrorCode::NoSlides,
            ConfigError::IndicatorMismatch { .. } => ErrorCode::IndicatorMismatch,
            ConfigError::ImageOutsideDeck { .. } => ErrorCode::ImageOutsideDeck,
            ConfigError::DuplicateImage { .. } => ErrorCode::DuplicateImage,
            ConfigError::ZeroDuration { .. } => ErrorCode::ZeroDuration,
        }
    }
}

/// Serializable form of a [`ConfigError`] for machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ConfigError> for ErrorReport {
    fn from(value: &ConfigError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
