use std::collections::HashSet;

use shared::domain::{ImageId, ImageSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStep {
    /// The image was counted and the gate is still closed.
    Counted,
    /// The image was counted and completed the set; reported exactly once.
    Opened,
    /// Unknown image, repeated completion, or the gate was already open.
    Ignored,
}

/// One-way counter that holds autoplay back until every image has settled.
///
/// Load and error completions count the same. Each image counts at most once,
/// so the settled count never exceeds the total and the gate never closes
/// again after opening.
#[derive(Debug, Clone)]
pub struct LoadGate {
    pending: HashSet<ImageId>,
    total: usize,
}

impl LoadGate {
    pub fn new(images: &[ImageSource]) -> Self {
        let mut known = HashSet::new();
        let mut pending = HashSet::new();
        for image in images {
            // The first entry for an id decides its status.
            if known.insert(image.id) && !image.status.is_settled() {
                pending.insert(image.id);
            }
        }
        Self {
            pending,
            total: known.len(),
        }
    }

    pub fn settle(&mut self, image: ImageId) -> GateStep {
        if !self.pending.remove(&image) {
            return GateStep::Ignored;
        }
        if self.pending.is_empty() {
            GateStep::Opened
        } else {
            GateStep::Counted
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn settled(&self) -> usize {
        self.total - self.pending.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
#[path = "tests/load_gate_tests.rs"]
mod tests;
