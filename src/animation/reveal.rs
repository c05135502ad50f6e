//! One-shot visibility reveal tracking.

use crate::view::{Rect, Viewport};
use std::collections::BTreeSet;

/// Fraction of `bounds` inside the viewport, with the viewport's bottom edge
/// pulled up by `bottom_margin`.
///
/// Zero-height elements count as fully visible when their top lies inside the
/// shrunk viewport.
pub fn intersection_ratio(bounds: Rect, viewport: Viewport, bottom_margin: f64) -> f64 {
    let view_top = viewport.scroll_y;
    let view_bottom = viewport.scroll_y + viewport.height - bottom_margin;
    if view_bottom <= view_top {
        return 0.0;
    }
    if bounds.height <= 0.0 {
        let inside = bounds.top >= view_top && bounds.top < view_bottom;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = bounds.bottom().min(view_bottom) - bounds.top.max(view_top);
    (overlap.max(0.0) / bounds.height).min(1.0)
}

/// Tracks which observed elements have already been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: Vec<String>,
    fired: BTreeSet<String>,
}

impl RevealTracker {
    pub fn new(observed: Vec<String>) -> Self {
        Self {
            observed,
            fired: BTreeSet::new(),
        }
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.fired.contains(id)
    }

    pub fn revealed_count(&self) -> usize {
        self.fired.len()
    }

    /// Record `id` as fired. Returns `false` if it had already fired.
    pub fn mark(&mut self, id: &str) -> bool {
        self.fired.insert(id.to_string())
    }

    /// Observed elements not yet fired, in observation order.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.observed
            .iter()
            .map(String::as_str)
            .filter(|id| !self.fired.contains(*id))
    }
}
