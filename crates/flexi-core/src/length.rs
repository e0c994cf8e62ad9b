#![forbid(unsafe_code)]

//! CSS-style lengths: a number paired with a unit.
//!
//! Margins are configured either as bare numbers (pixels) or as strings such
//! as `"1.5em"` or `"5%"`. [`Length::parse`] normalizes both into a
//! [`Length`], which the geometry formulas carry around symbolically. The
//! final pixel value is only known once a rendering surface supplies the
//! size of one unit, see [`Length::to_px`].
//!
//! # Failure Modes
//!
//! - Unparsable number: [`LengthError::InvalidNumber`].
//! - Unit outside [`LengthUnit`]: [`LengthError::UnknownUnit`].
//! - Non-finite value (`NaN`, `inf`): [`LengthError::NonFinite`].

use std::fmt;
use std::str::FromStr;

/// Errors produced while parsing a [`Length`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LengthError {
    /// The input was empty or whitespace only.
    #[error("empty length")]
    Empty,
    /// The numeric part could not be parsed.
    #[error("invalid number in length {0:?}")]
    InvalidNumber(String),
    /// The unit suffix is not a recognized CSS unit.
    #[error("unknown unit {unit:?} in length {input:?}")]
    UnknownUnit { input: String, unit: String },
    /// The value is NaN or infinite.
    #[error("length value must be finite, got {0}")]
    NonFinite(f64),
}

/// Units accepted for margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    #[default]
    Px,
    Em,
    Rem,
    Percent,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Ch,
    Ex,
    Pt,
    Pc,
    Cm,
    Mm,
    In,
}

impl LengthUnit {
    /// Every unit, in declaration order.
    pub const ALL: [LengthUnit; 15] = [
        Self::Px,
        Self::Em,
        Self::Rem,
        Self::Percent,
        Self::Vw,
        Self::Vh,
        Self::Vmin,
        Self::Vmax,
        Self::Ch,
        Self::Ex,
        Self::Pt,
        Self::Pc,
        Self::Cm,
        Self::Mm,
        Self::In,
    ];

    /// CSS suffix for this unit.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Percent => "%",
            Self::Vw => "vw",
            Self::Vh => "vh",
            Self::Vmin => "vmin",
            Self::Vmax => "vmax",
            Self::Ch => "ch",
            Self::Ex => "ex",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::In => "in",
        }
    }

    /// Pixels per unit for the absolute units (96 dpi reference pixel).
    ///
    /// Returns `None` for units that depend on fonts or the viewport.
    #[must_use]
    pub const fn absolute_px(self) -> Option<f64> {
        match self {
            Self::Px => Some(1.0),
            Self::Pt => Some(96.0 / 72.0),
            Self::Pc => Some(16.0),
            Self::In => Some(96.0),
            Self::Cm => Some(96.0 / 2.54),
            Self::Mm => Some(96.0 / 25.4),
            _ => None,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for LengthUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.suffix().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A number with a CSS unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Length = Length::px(0.0);

    #[must_use]
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// A length in pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// Build a length from a bare number. Bare numbers are pixels.
    pub fn from_number(value: f64) -> Result<Self, LengthError> {
        if !value.is_finite() {
            return Err(LengthError::NonFinite(value));
        }
        Ok(Self::px(value))
    }

    /// Parse `"<number><unit>"`. A missing unit means pixels.
    ///
    /// Whitespace between the number and the unit is allowed (`"10 px"`).
    pub fn parse(input: &str) -> Result<Self, LengthError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LengthError::Empty);
        }
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        let value: f64 = number
            .parse()
            .map_err(|_| LengthError::InvalidNumber(input.to_string()))?;
        if !value.is_finite() {
            return Err(LengthError::NonFinite(value));
        }
        let unit = unit.trim();
        let unit = if unit.is_empty() {
            LengthUnit::Px
        } else {
            unit.parse().map_err(|()| LengthError::UnknownUnit {
                input: input.to_string(),
                unit: unit.to_string(),
            })?
        };
        Ok(Self::new(value, unit))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Multiply the value, keeping the unit.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.value * factor, self.unit)
    }

    /// Half of this length. Slides carry half the margin on each side.
    #[must_use]
    pub fn half(self) -> Self {
        self.scale(0.5)
    }

    /// Convert to pixels using `unit_px`, the size of one unit in pixels.
    #[must_use]
    pub fn to_px(self, unit_px: impl Fn(LengthUnit) -> f64) -> f64 {
        self.value * unit_px(self.unit)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Length {
    type Err = LengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_string_is_pixels() {
        assert_eq!(Length::parse("20").unwrap(), Length::px(20.0));
    }

    #[test]
    fn parses_units() {
        assert_eq!(
            Length::parse("1.5em").unwrap(),
            Length::new(1.5, LengthUnit::Em)
        );
        assert_eq!(
            Length::parse("5%").unwrap(),
            Length::new(5.0, LengthUnit::Percent)
        );
        assert_eq!(
            Length::parse(" 10 px ").unwrap(),
            Length::new(10.0, LengthUnit::Px)
        );
        assert_eq!(
            Length::parse("2REM").unwrap(),
            Length::new(2.0, LengthUnit::Rem)
        );
    }

    #[test]
    fn negative_values_parse() {
        assert_eq!(Length::parse("-4px").unwrap(), Length::px(-4.0));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = Length::parse("3parsecs").unwrap_err();
        assert!(matches!(err, LengthError::UnknownUnit { ref unit, .. } if unit == "parsecs"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            Length::parse("px"),
            Err(LengthError::InvalidNumber(_))
        ));
        assert_eq!(Length::parse("   "), Err(LengthError::Empty));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(matches!(
            Length::from_number(f64::NAN),
            Err(LengthError::NonFinite(_))
        ));
    }

    #[test]
    fn display_round_trips_css_text() {
        assert_eq!(Length::px(20.0).to_string(), "20px");
        assert_eq!(Length::new(1.5, LengthUnit::Em).to_string(), "1.5em");
        assert_eq!(Length::new(5.0, LengthUnit::Percent).to_string(), "5%");
    }

    #[test]
    fn half_keeps_unit() {
        assert_eq!(
            Length::new(3.0, LengthUnit::Em).half(),
            Length::new(1.5, LengthUnit::Em)
        );
    }

    #[test]
    fn to_px_uses_resolver() {
        let em = Length::new(2.0, LengthUnit::Em);
        assert_eq!(em.to_px(|_| 16.0), 32.0);
        let inch = Length::new(1.0, LengthUnit::In);
        assert_eq!(inch.to_px(|u| u.absolute_px().unwrap_or(0.0)), 96.0);
    }
}
