#![forbid(unsafe_code)]

//! Width breakpoints: which layout rule applies at which container width.
//!
//! Callers declare rules as an unordered list of [`LayoutRuleSpec`], each
//! naming the width at which it starts. [`resolve`] sorts them and derives
//! closed ranges: a rule ends one pixel before the next one starts, and the
//! last rule is unbounded.
//!
//! ```
//! use flexi_layout::breakpoint::{LayoutRuleSpec, active_for, resolve};
//!
//! let rules = resolve(&[
//!     LayoutRuleSpec::at_width(600).group(3).margin_px(20.0),
//!     LayoutRuleSpec::base(),
//! ])
//! .unwrap();
//! assert_eq!(rules[0].to_width, Some(599));
//! let (index, rule) = active_for(800, &rules).unwrap();
//! assert_eq!((index, rule.group), (1, 3));
//! ```
//!
//! # Invariants
//!
//! 1. Resolved ranges are sorted, disjoint and contiguous.
//! 2. Exactly one rule starts at width 0, so every positive width has a rule.
//! 3. Fields a spec leaves out come from [`RuleDefaults`].
//!
//! # Failure Modes
//!
//! - Empty list: [`LayoutError::Empty`].
//! - No rule at width 0: [`LayoutError::MissingBaseRule`].
//! - Two rules at the same width: [`LayoutError::DuplicateWidth`].
//! - `group` or `scroll` of 0, or a malformed margin: rejected per rule.

use flexi_core::length::{Length, LengthError};
use serde::{Deserialize, Serialize};

/// Errors produced by [`resolve`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout list is empty")]
    Empty,
    #[error("a layout with no width (or width 0) is mandatory; smallest declared width is {0}")]
    MissingBaseRule(u32),
    #[error("two layouts declare width {0}")]
    DuplicateWidth(u32),
    #[error("layout at width {width}: group must be at least 1")]
    ZeroGroup { width: u32 },
    #[error("layout at width {width}: scroll must be at least 1")]
    ZeroScroll { width: u32 },
    #[error("layout at width {width}: bad margin: {source}")]
    Margin {
        width: u32,
        #[source]
        source: LengthError,
    },
}

/// A margin as written in configuration: a bare number (pixels) or CSS text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarginSpec {
    Number(f64),
    Text(String),
}

impl MarginSpec {
    pub fn to_length(&self) -> Result<Length, LengthError> {
        match self {
            Self::Number(n) => Length::from_number(*n),
            Self::Text(s) => Length::parse(s),
        }
    }
}

impl From<f64> for MarginSpec {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MarginSpec {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One caller-declared rule. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRuleSpec {
    /// Container width (px) from which the rule applies. Absent means 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Slides visible at once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
    /// Slides advanced per step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<u32>,
    /// Space between slides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<MarginSpec>,
}

impl LayoutRuleSpec {
    /// A rule with no width: the mandatory base rule.
    #[must_use]
    pub fn base() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at_width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn group(mut self, group: u32) -> Self {
        self.group = Some(group);
        self
    }

    #[must_use]
    pub fn scroll(mut self, scroll: u32) -> Self {
        self.scroll = Some(scroll);
        self
    }

    #[must_use]
    pub fn margin_px(mut self, px: f64) -> Self {
        self.margin = Some(MarginSpec::Number(px));
        self
    }

    #[must_use]
    pub fn margin(mut self, css: &str) -> Self {
        self.margin = Some(MarginSpec::Text(css.to_string()));
        self
    }

    fn declared_width(&self) -> u32 {
        self.width.unwrap_or(0)
    }
}

/// Field values for specs that leave them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleDefaults {
    pub group: u32,
    pub scroll: u32,
    pub margin: Length,
}

impl RuleDefaults {
    /// One slide, one step, no margin.
    pub const BASE: RuleDefaults = RuleDefaults {
        group: 1,
        scroll: 1,
        margin: Length::ZERO,
    };
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self::BASE
    }
}

/// A resolved rule covering `[from_width, to_width]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRule {
    pub from_width: u32,
    /// Inclusive upper bound. `None` is unbounded.
    pub to_width: Option<u32>,
    pub group: u32,
    pub scroll: u32,
    pub margin: Length,
}

impl LayoutRule {
    /// Whether `width` falls in this rule's range.
    #[must_use]
    pub fn contains(&self, width: u32) -> bool {
        width >= self.from_width && self.to_width.is_none_or(|to| width <= to)
    }
}

/// Resolve with [`RuleDefaults::BASE`].
pub fn resolve(specs: &[LayoutRuleSpec]) -> Result<Vec<LayoutRule>, LayoutError> {
    resolve_with(specs, RuleDefaults::BASE)
}

/// Sort `specs` by declared width and derive contiguous ranges.
pub fn resolve_with(
    specs: &[LayoutRuleSpec],
    defaults: RuleDefaults,
) -> Result<Vec<LayoutRule>, LayoutError> {
    let mut sorted: Vec<&LayoutRuleSpec> = specs.iter().collect();
    sorted.sort_by_key(|spec| spec.declared_width());

    let first = sorted.first().ok_or(LayoutError::Empty)?;
    if first.declared_width() != 0 {
        return Err(LayoutError::MissingBaseRule(first.declared_width()));
    }

    let mut rules = Vec::with_capacity(sorted.len());
    for (i, spec) in sorted.iter().enumerate() {
        let from_width = spec.declared_width();
        let to_width = match sorted.get(i + 1) {
            Some(next) if next.declared_width() == from_width => {
                return Err(LayoutError::DuplicateWidth(from_width));
            }
            Some(next) => Some(next.declared_width() - 1),
            None => None,
        };
        let group = spec.group.unwrap_or(defaults.group);
        if group == 0 {
            return Err(LayoutError::ZeroGroup { width: from_width });
        }
        let scroll = spec.scroll.unwrap_or(defaults.scroll);
        if scroll == 0 {
            return Err(LayoutError::ZeroScroll { width: from_width });
        }
        let margin = match &spec.margin {
            Some(margin) => margin.to_length().map_err(|source| LayoutError::Margin {
                width: from_width,
                source,
            })?,
            None => defaults.margin,
        };
        rules.push(LayoutRule {
            from_width,
            to_width,
            group,
            scroll,
            margin,
        });
    }
    tracing::debug!(rules = rules.len(), "layouts resolved");
    Ok(rules)
}

/// First rule whose range contains `width`, with its index.
///
/// A width of 0 means the container has not been measured (or is hidden);
/// no rule is returned so callers keep their current layout.
#[must_use]
pub fn active_for(width: u32, rules: &[LayoutRule]) -> Option<(usize, &LayoutRule)> {
    if width == 0 {
        return None;
    }
    rules.iter().enumerate().find(|(_, rule)| rule.contains(width))
}

/// Outcome of [`BreakpointTracker::observe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Width unknown; nothing to do.
    Unmeasured,
    /// Same rule as last time.
    Unchanged,
    /// A different rule (or the first one) is now active.
    Changed { index: usize, rule: LayoutRule },
}

/// Remembers the last applied rule so re-resolution is idempotent.
#[derive(Debug, Clone, Default)]
pub struct BreakpointTracker {
    last: Option<(usize, LayoutRule)>,
}

impl BreakpointTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `width` against `rules` and record the result.
    ///
    /// Reports [`Transition::Unchanged`] only when both the index and the
    /// rule itself match what was last applied, so replacing the rule list
    /// with different geometry at the same index still counts as a change.
    pub fn observe(&mut self, width: u32, rules: &[LayoutRule]) -> Transition {
        let Some((index, rule)) = active_for(width, rules) else {
            return Transition::Unmeasured;
        };
        if self.last == Some((index, *rule)) {
            return Transition::Unchanged;
        }
        self.last = Some((index, *rule));
        Transition::Changed { index, rule: *rule }
    }

    /// Index of the last applied rule.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.last.map(|(index, _)| index)
    }
}
