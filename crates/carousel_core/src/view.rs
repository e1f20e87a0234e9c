//! Binding between the controller and the page elements it toggles.

use std::sync::{Arc, Mutex, MutexGuard};

use shared::{domain::ElementKind, protocol::ViewChange};

/// The activation flags the controller is allowed to touch.
pub trait SlideView {
    fn set_active(&mut self, kind: ElementKind, index: usize, active: bool);
}

#[derive(Debug, Default)]
struct PageState {
    slides: Vec<bool>,
    indicators: Vec<bool>,
    changes: Vec<ViewChange>,
}

/// In-memory page stand-in shared between a driver and its observers.
///
/// Clones point at the same page, so a test can keep one clone while the
/// controller owns another inside a runtime task.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    inner: Arc<Mutex<PageState>>,
}

impl MemoryView {
    pub fn new(slides: usize, indicators: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PageState {
                slides: vec![false; slides],
                indicators: vec![false; indicators],
                changes: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        // A panic while holding the lock leaves plain flags behind; keep using them.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn active_slides(&self) -> Vec<usize> {
        active_positions(&self.lock().slides)
    }

    pub fn active_indicators(&self) -> Vec<usize> {
        active_positions(&self.lock().indicators)
    }

    pub fn is_active(&self, kind: ElementKind, index: usize) -> bool {
        let page = self.lock();
        let flags = match kind {
            ElementKind::Slide => &page.slides,
            ElementKind::Indicator => &page.indicators,
        };
        flags.get(index).copied().unwrap_or(false)
    }

    /// Removes and returns every change recorded since the last drain.
    pub fn drain_changes(&self) -> Vec<ViewChange> {
        std::mem::take(&mut self.lock().changes)
    }
}

fn active_positions(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(index, active)| active.then_some(index))
        .collect()
}

impl SlideView for MemoryView {
    fn set_active(&mut self, kind: ElementKind, index: usize, active: bool) {
        let mut page = self.lock();
        let flags = match kind {
            ElementKind::Slide => &mut page.slides,
            ElementKind::Indicator => &mut page.indicators,
        };
        let Some(flag) = flags.get_mut(index) else {
            return;
        };
        // Class-list semantics: re-adding a present class is not a change.
        if *flag == active {
            return;
        }
        *flag = active;
        page.changes.push(ViewChange {
            kind,
            index,
            active,
        });
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
