#![forbid(unsafe_code)]

//! Layout: breakpoint rules and the slide geometry derived from them.
//!
//! [`breakpoint`] turns an unordered list of [`LayoutRuleSpec`]s into
//! contiguous [`LayoutRule`] ranges and picks the one active for a container
//! width. [`geometry`] derives the symbolic width and offset formulas for a
//! rule. Both are pure; the engine in `flexi-slider` owns all state.

pub mod breakpoint;
pub mod geometry;

pub use breakpoint::{
    BreakpointTracker, LayoutError, LayoutRule, LayoutRuleSpec, MarginSpec, RuleDefaults,
    Transition, active_for, resolve,
};
pub use flexi_core::length::{Length, LengthUnit};
pub use geometry::{Offset, WidthFormula, container_offset, slide_margin, slide_width};
