use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared, mutable writing direction.
///
/// Clones observe the same value, so a resolver built from one clone picks up
/// direction changes made through another.
#[derive(Debug, Clone, Default)]
pub struct DirectionCell(Arc<AtomicBool>);

impl DirectionCell {
    pub fn new(is_rtl: bool) -> Self {
        Self(Arc::new(AtomicBool::new(is_rtl)))
    }

    pub fn set_rtl(&self, is_rtl: bool) {
        self.0.store(is_rtl, Ordering::Relaxed);
    }

    pub fn is_rtl(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
