#![forbid(unsafe_code)]

//! Slide position with wraparound.
//!
//! The first visible slide is `index`, and `group` slides are visible, so
//! the last valid index is `slide_count - group`. Stepping past either end
//! wraps to the other.
//!
//! # Invariants
//!
//! 1. `0 <= index <= max_index()` where `max_index() = slide_count - group`
//!    (0 when there are fewer slides than the group).
//! 2. Changing the slide count resets `index` to 0.
//! 3. Changing the group clamps `index` into the new range.
//!
//! `next` and `prev` move by one slide; `scroll` is stored for layouts but
//! does not change the step.

/// Snapshot of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionState {
    pub index: usize,
    pub slide_count: usize,
    pub group: usize,
    pub scroll: usize,
}

impl Default for PositionState {
    fn default() -> Self {
        Self {
            index: 0,
            slide_count: 0,
            group: 1,
            scroll: 1,
        }
    }
}

/// Emitted by every move for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChanged {
    pub index: usize,
    /// Whether the move should be animated.
    pub animate: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PositionController {
    state: PositionState,
}

impl PositionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PositionState {
        self.state
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.state.index
    }

    /// Largest valid index.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.state.slide_count.saturating_sub(self.state.group)
    }

    /// Whether there is anything to navigate between.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.state.slide_count > 1
    }

    /// Step forward, wrapping to 0 after the last index.
    pub fn next(&mut self, animate: bool) -> PositionChanged {
        self.state.index = if self.state.index < self.max_index() {
            self.state.index + 1
        } else {
            0
        };
        self.changed(animate)
    }

    /// Step back, wrapping to the last index before 0.
    pub fn prev(&mut self, animate: bool) -> PositionChanged {
        self.state.index = if self.state.index > 0 {
            self.state.index - 1
        } else {
            self.max_index()
        };
        self.changed(animate)
    }

    /// Jump to `index`, clamped to [`max_index`](Self::max_index).
    pub fn go_to(&mut self, index: usize, animate: bool) -> PositionChanged {
        self.state.index = index.min(self.max_index());
        self.changed(animate)
    }

    pub fn reset(&mut self) {
        self.state.index = 0;
    }

    /// New slide collection: store the count and start over.
    pub fn set_slide_count(&mut self, slide_count: usize) {
        self.state.slide_count = slide_count;
        self.reset();
    }

    /// New group size (at least 1). The index is clamped.
    pub fn set_group(&mut self, group: usize) {
        self.state.group = group.max(1);
        self.state.index = self.state.index.min(self.max_index());
    }

    pub fn set_scroll(&mut self, scroll: usize) {
        self.state.scroll = scroll.max(1);
    }

    fn changed(&self, animate: bool) -> PositionChanged {
        tracing::trace!(index = self.state.index, animate, "position changed");
        PositionChanged {
            index: self.state.index,
            animate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(slides: usize, group: usize) -> PositionController {
        let mut c = PositionController::new();
        c.set_slide_count(slides);
        c.set_group(group);
        c
    }

    #[test]
    fn five_slides_group_two_walks_to_three_then_wraps() {
        let mut c = controller(5, 2);
        let seen: Vec<usize> = (0..4).map(|_| c.next(true).index).collect();
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn prev_from_zero_wraps_to_last_index() {
        let mut c = controller(5, 2);
        assert_eq!(c.prev(true).index, 3);
        assert_eq!(c.prev(true).index, 2);
    }

    #[test]
    fn fewer_slides_than_group_stays_at_zero() {
        let mut c = controller(2, 3);
        assert_eq!(c.max_index(), 0);
        assert_eq!(c.next(true).index, 0);
        assert_eq!(c.prev(true).index, 0);
    }

    #[test]
    fn animate_flag_is_passed_through() {
        let mut c = controller(3, 1);
        assert!(c.next(true).animate);
        assert!(!c.next(false).animate);
    }

    #[test]
    fn slide_count_change_resets() {
        let mut c = controller(6, 1);
        c.next(true);
        c.next(true);
        c.set_slide_count(4);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn larger_group_clamps_index() {
        let mut c = controller(6, 1);
        for _ in 0..5 {
            c.next(true);
        }
        assert_eq!(c.index(), 5);
        c.set_group(3);
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn go_to_clamps_to_last_index() {
        let mut c = controller(5, 2);
        assert_eq!(c.go_to(2, false).index, 2);
        assert_eq!(c.go_to(9, true).index, 3);
        assert_eq!(c.next(true).index, 0);
    }

    #[test]
    fn navigable_needs_two_slides() {
        assert!(!controller(1, 1).is_navigable());
        assert!(controller(2, 1).is_navigable());
    }
}
