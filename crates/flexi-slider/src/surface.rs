#![forbid(unsafe_code)]

//! The boundary to whatever actually draws the slider.
//!
//! The engine decides *what* the slides look like; a [`Surface`] owns the
//! elements, measures the container, and paints. Style changes arrive as
//! [`SurfaceUpdate`]s carrying the symbolic formulas, so a browser-like
//! surface can emit `calc()` text ([`SurfaceUpdate::css`]) while a native
//! one evaluates them against its own pixel sizes.
//!
//! [`HeadlessSurface`] records everything it is told and is driven by hand.
//! It backs the tests and suits hosts that only need the numbers.

use flexi_core::length::Length;
use flexi_layout::geometry::{Offset, WidthFormula, slide_margin_css};

/// A style change for the slider elements.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceUpdate {
    /// Flex basis of every slide.
    SlideWidth(WidthFormula),
    /// Full margin between slides; each slide carries half on each side.
    SlideMargin(Length),
    /// Translation of the slides container.
    Transform(Offset),
    /// Transition of the slides container. `None` disables it.
    Transition(Option<String>),
    /// Layout is computed; make the slider visible.
    Reveal,
}

impl SurfaceUpdate {
    /// CSS `(property, value)` for the element this update targets.
    #[must_use]
    pub fn css(&self) -> (&'static str, String) {
        match self {
            Self::SlideWidth(width) => ("flex", width.flex_css()),
            Self::SlideMargin(margin) => ("margin", slide_margin_css(*margin)),
            Self::Transform(offset) => ("transform", offset.translate3d_css()),
            Self::Transition(Some(timing)) => ("transition", format!("transform {timing}")),
            Self::Transition(None) => ("transition", "none".to_string()),
            Self::Reveal => ("opacity", "1".to_string()),
        }
    }
}

/// Navigation control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Next,
}

impl NavAction {
    /// Action for a control by its class list (`flexi-prev`, `flexi-next`).
    #[must_use]
    pub fn from_class_name(class_name: &str) -> Option<Self> {
        [Self::Prev, Self::Next]
            .into_iter()
            .find(|action| class_name.contains(action.name()))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

/// Host-side rendering and element lookup.
pub trait Surface {
    /// Container width in pixels; 0 while hidden or not laid out.
    fn container_width(&self) -> u32;

    /// Locate the moving slides container. `false` when nothing matches.
    fn find_slides(&mut self, selector: &str) -> bool;

    /// Number of slides matching `selector` inside the slides container.
    fn count_slides(&mut self, selector: &str) -> usize;

    fn apply(&mut self, update: SurfaceUpdate);

    /// Create the navigation controls from `template` and route their
    /// activations to the engine's click channel.
    fn bind_navigation(&mut self, template: &str);

    /// Remove the controls and their activation listeners.
    fn unbind_navigation(&mut self);

    /// Attach the bound controls to the container.
    fn show_navigation(&mut self);

    /// Attach (`true`) or detach (`false`) native resize listeners.
    fn watch_resize(&mut self, enabled: bool);
}

/// In-memory [`Surface`] that records what it is asked to do.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    width: u32,
    containers: Vec<String>,
    slide_counts: Vec<(String, usize)>,
    slides_container: Option<String>,
    updates: Vec<SurfaceUpdate>,
    navigation: Option<String>,
    navigation_shown: bool,
    unbind_count: usize,
    watching_resize: bool,
}

impl HeadlessSurface {
    /// Container `width` px wide, with `count` slides under the default
    /// selectors.
    #[must_use]
    pub fn new(width: u32, count: usize) -> Self {
        Self::default()
            .with_slides(crate::settings::DEFAULT_SLIDES_SELECTOR)
            .with_slide_count(crate::settings::DEFAULT_SLIDE_SELECTOR, count)
            .with_width(width)
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Make `selector` resolve to a slides container.
    #[must_use]
    pub fn with_slides(mut self, selector: &str) -> Self {
        self.containers.push(selector.to_string());
        self
    }

    /// Make `selector` match `count` slides.
    #[must_use]
    pub fn with_slide_count(mut self, selector: &str, count: usize) -> Self {
        self.slide_counts.push((selector.to_string(), count));
        self
    }

    /// Simulate the container being resized (or hidden with 0).
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Every update applied so far, oldest first.
    #[must_use]
    pub fn updates(&self) -> &[SurfaceUpdate] {
        &self.updates
    }

    /// Drain recorded updates.
    pub fn take_updates(&mut self) -> Vec<SurfaceUpdate> {
        std::mem::take(&mut self.updates)
    }

    /// Most recent transform, if any.
    #[must_use]
    pub fn last_transform(&self) -> Option<&Offset> {
        self.updates.iter().rev().find_map(|u| match u {
            SurfaceUpdate::Transform(offset) => Some(offset),
            _ => None,
        })
    }

    /// Most recent transition, if any.
    #[must_use]
    pub fn last_transition(&self) -> Option<&Option<String>> {
        self.updates.iter().rev().find_map(|u| match u {
            SurfaceUpdate::Transition(t) => Some(t),
            _ => None,
        })
    }

    /// Most recent slide width, if any.
    #[must_use]
    pub fn last_slide_width(&self) -> Option<&WidthFormula> {
        self.updates.iter().rev().find_map(|u| match u {
            SurfaceUpdate::SlideWidth(w) => Some(w),
            _ => None,
        })
    }

    #[must_use]
    pub fn slides_container(&self) -> Option<&str> {
        self.slides_container.as_deref()
    }

    /// Template of the bound navigation, if any.
    #[must_use]
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    #[must_use]
    pub fn navigation_shown(&self) -> bool {
        self.navigation_shown
    }

    #[must_use]
    pub fn unbind_count(&self) -> usize {
        self.unbind_count
    }

    #[must_use]
    pub fn watching_resize(&self) -> bool {
        self.watching_resize
    }
}

impl Surface for HeadlessSurface {
    fn container_width(&self) -> u32 {
        self.width
    }

    fn find_slides(&mut self, selector: &str) -> bool {
        let found = self.containers.iter().any(|s| s == selector);
        if found {
            self.slides_container = Some(selector.to_string());
        }
        found
    }

    fn count_slides(&mut self, selector: &str) -> usize {
        if self.slides_container.is_none() {
            return 0;
        }
        self.slide_counts
            .iter()
            .find(|(s, _)| s == selector)
            .map_or(0, |(_, count)| *count)
    }

    fn apply(&mut self, update: SurfaceUpdate) {
        self.updates.push(update);
    }

    fn bind_navigation(&mut self, template: &str) {
        self.navigation = Some(template.to_string());
        self.navigation_shown = false;
    }

    fn unbind_navigation(&mut self) {
        self.navigation = None;
        self.navigation_shown = false;
        self.unbind_count += 1;
    }

    fn show_navigation(&mut self) {
        if self.navigation.is_some() {
            self.navigation_shown = true;
        }
    }

    fn watch_resize(&mut self, enabled: bool) {
        self.watching_resize = enabled;
    }
}
