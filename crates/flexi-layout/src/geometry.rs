#![forbid(unsafe_code)]

//! Slide geometry as symbolic formulas.
//!
//! Slide widths are fractions of a container whose pixel size is only known
//! at paint time, minus margins that may be in any CSS unit. The functions
//! here therefore return formulas, not numbers. Each formula can be
//! rendered as CSS `calc()` text for a browser-like surface, or evaluated
//! numerically once the container width and unit sizes are known.
//!
//! # Formulas
//!
//! With `g` slides per group and margin `m`:
//!
//! - slide width: `100%/g − (m/g)·(g−1)` (`100%` when `g = 1`)
//! - slide margin: `m/2` on each side
//! - container offset at position `p`:
//!   - `p = 0, m = 0`: `0`
//!   - `p = 0, m ≠ 0`: `−m/2`
//!   - otherwise: `(width × −p) − (m × p) − m/2`
//!
//! The half-margin term keeps the first visible slide's outer margin out of
//! view: every slide carries `m/2` on both sides, so the track is shifted by
//! one half-margin even at rest.

use flexi_core::length::{Length, LengthUnit};

/// Width of one slide: `base_percent`% of the container minus `shrink`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthFormula {
    pub group: u32,
    pub base_percent: f64,
    /// Margin units subtracted from the base fraction.
    pub shrink: Length,
    /// Whether a margin is configured. A zero shrink with a margin (group
    /// of one) still renders the subtraction, matching the offset formula.
    has_margin: bool,
}

impl WidthFormula {
    /// CSS expression without the outer `calc()`.
    ///
    /// `(100% / 3)` for three slides, `((100% / 3) - 13.333333333333334px)`
    /// with a 20px margin, `100%` for a single slide without margin.
    #[must_use]
    pub fn to_css(&self) -> String {
        let base = if self.group > 1 {
            format!("(100% / {})", self.group)
        } else {
            "100%".to_string()
        };
        if self.has_margin {
            format!("({base} - {})", self.shrink)
        } else {
            base
        }
    }

    /// Flex shorthand for a slide: `0 0 calc(<width>)`.
    #[must_use]
    pub fn flex_css(&self) -> String {
        format!("0 0 calc({})", self.to_css())
    }

    /// Width in pixels for a container `container_px` wide.
    #[must_use]
    pub fn evaluate(&self, container_px: f64, unit_px: impl Fn(LengthUnit) -> f64) -> f64 {
        container_px * self.base_percent / 100.0 - self.shrink.to_px(unit_px)
    }
}

/// Width formula for `group` slides separated by `margin`.
///
/// `group` is at least 1 for resolved layouts; 0 is treated as 1.
#[must_use]
pub fn slide_width(group: u32, margin: Length) -> WidthFormula {
    let group = group.max(1);
    let base_percent = if group > 1 {
        100.0 / f64::from(group)
    } else {
        100.0
    };
    let shrink = if margin.is_zero() {
        Length::new(0.0, margin.unit)
    } else {
        Length::new(
            (margin.value / f64::from(group)) * f64::from(group - 1),
            margin.unit,
        )
    };
    WidthFormula {
        group,
        base_percent,
        shrink,
        has_margin: !margin.is_zero(),
    }
}

/// Margin on each side of a slide.
#[must_use]
pub fn slide_margin(margin: Length) -> Length {
    margin.half()
}

/// Margin shorthand for a slide: `0 <m/2>`.
#[must_use]
pub fn slide_margin_css(margin: Length) -> String {
    format!("0 {}", slide_margin(margin))
}

/// Horizontal translation of the slides container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// At rest, no margin.
    Zero,
    /// At rest with a margin: `−m/2`.
    HalfMargin { margin: Length },
    /// Shifted `pos` slides to the left.
    Shift {
        pos: usize,
        width: WidthFormula,
        margin: Length,
    },
}

impl Offset {
    /// CSS `calc()` expression.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Offset::Zero => "calc(0)".to_string(),
            Offset::HalfMargin { margin } => format!("calc(-{margin} / 2)"),
            Offset::Shift { pos, width, margin } => {
                let mut css = format!("calc(({} * -{pos})", width.to_css());
                if !margin.is_zero() {
                    let travelled = margin.scale(*pos as f64);
                    css.push_str(&format!(" - ({travelled}) - ({margin} / 2)"));
                }
                css.push(')');
                css
            }
        }
    }

    /// Transform value for the slides container.
    #[must_use]
    pub fn translate3d_css(&self) -> String {
        format!("translate3d({}, 0, 0)", self.to_css())
    }

    /// Offset in pixels for a container `container_px` wide.
    #[must_use]
    pub fn evaluate(&self, container_px: f64, unit_px: impl Fn(LengthUnit) -> f64) -> f64 {
        match self {
            Offset::Zero => 0.0,
            Offset::HalfMargin { margin } => -margin.to_px(&unit_px) / 2.0,
            Offset::Shift { pos, width, margin } => {
                let pos = *pos as f64;
                let slide = width.evaluate(container_px, &unit_px);
                let m = margin.to_px(&unit_px);
                (slide * -pos) - (m * pos) - (m / 2.0)
            }
        }
    }
}

/// Offset of the slides container when slide `pos` is first in view.
#[must_use]
pub fn container_offset(pos: usize, width: &WidthFormula, margin: Length) -> Offset {
    match (pos, margin.is_zero()) {
        (0, true) => Offset::Zero,
        (0, false) => Offset::HalfMargin { margin },
        _ => Offset::Shift {
            pos,
            width: *width,
            margin,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(_: LengthUnit) -> f64 {
        1.0
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_slide_is_full_width() {
        let w = slide_width(1, Length::ZERO);
        assert_eq!(w.base_percent, 100.0);
        assert_eq!(w.to_css(), "100%");
        assert_eq!(w.flex_css(), "0 0 calc(100%)");
    }

    #[test]
    fn three_slides_with_margin() {
        let w = slide_width(3, Length::px(20.0));
        assert!(close(w.base_percent, 100.0 / 3.0));
        assert!(close(w.shrink.value, 40.0 / 3.0));
        assert_eq!(w.shrink.unit, LengthUnit::Px);
        assert_eq!(w.to_css(), "((100% / 3) - 13.333333333333334px)");
        // 3 slides + 2 gaps fill the container exactly.
        let slide = w.evaluate(800.0, px);
        assert!(close(slide * 3.0 + 20.0 * 2.0, 800.0));
    }

    #[test]
    fn margin_keeps_its_unit() {
        let w = slide_width(2, Length::new(1.0, LengthUnit::Em));
        assert_eq!(w.to_css(), "((100% / 2) - 0.5em)");
        assert!(close(w.evaluate(400.0, |_| 16.0), 200.0 - 8.0));
    }

    #[test]
    fn slide_margin_is_half() {
        assert_eq!(slide_margin(Length::px(20.0)), Length::px(10.0));
        assert_eq!(slide_margin_css(Length::px(20.0)), "0 10px");
    }

    #[test]
    fn offset_at_rest_without_margin_is_zero() {
        let w = slide_width(2, Length::ZERO);
        let off = container_offset(0, &w, Length::ZERO);
        assert_eq!(off, Offset::Zero);
        assert_eq!(off.translate3d_css(), "translate3d(calc(0), 0, 0)");
        assert_eq!(off.evaluate(500.0, px), 0.0);
    }

    #[test]
    fn offset_at_rest_with_margin_is_negative_half_margin() {
        let m = Length::px(20.0);
        let off = container_offset(0, &slide_width(3, m), m);
        assert_eq!(off.to_css(), "calc(-20px / 2)");
        assert_eq!(off.evaluate(900.0, px), -10.0);
    }

    #[test]
    fn shifted_offset_counts_slides_and_margins() {
        let m = Length::px(20.0);
        let w = slide_width(3, m);
        let off = container_offset(2, &w, m);
        assert_eq!(
            off.to_css(),
            "calc((((100% / 3) - 13.333333333333334px) * -2) - (40px) - (20px / 2))"
        );
        let slide = w.evaluate(800.0, px);
        assert!(close(off.evaluate(800.0, px), -2.0 * slide - 40.0 - 10.0));
    }

    #[test]
    fn shifted_offset_without_margin_has_no_margin_terms() {
        let w = slide_width(2, Length::ZERO);
        let off = container_offset(3, &w, Length::ZERO);
        assert_eq!(off.to_css(), "calc(((100% / 2) * -3))");
        assert!(close(off.evaluate(600.0, px), -900.0));
    }

    #[test]
    fn zero_group_is_treated_as_one() {
        assert_eq!(slide_width(0, Length::ZERO).group, 1);
    }
}
