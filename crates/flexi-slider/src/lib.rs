#![forbid(unsafe_code)]

//! Responsive slide carousel engine.
//!
//! A [`SlideEngine`] owns the option store, the active breakpoint, the
//! symbolic slide geometry, and the current index, and pushes style updates
//! to a [`Surface`]. Hosts drive it with three kinds of input:
//!
//! - option writes ([`SlideEngine::set`], [`SlideEngine::set_many`]),
//! - navigation ([`SlideEngine::click`], [`SlideEngine::invoke`]),
//! - time and resize signals ([`SlideEngine::tick`],
//!   [`SlideEngine::notify_resize`]).
//!
//! # Example
//!
//! ```
//! use flexi_core::ManualClock;
//! use flexi_layout::LayoutRuleSpec;
//! use flexi_slider::{HeadlessSurface, OptionName, SettingsPatch, SlideEngine};
//!
//! let overrides = SettingsPatch::new().with(
//!     OptionName::Layout,
//!     vec![
//!         LayoutRuleSpec::base().group(1),
//!         LayoutRuleSpec::at_width(600).group(3).margin_px(20.0),
//!     ],
//! );
//! let mut engine = SlideEngine::initialize(
//!     HeadlessSurface::new(800, 5),
//!     ManualClock::new(),
//!     overrides,
//! );
//! assert_eq!(engine.position().group, 3);
//! assert_eq!(engine.invoke("next").unwrap().index, 1);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod position;
pub mod settings;
pub mod surface;

#[cfg(feature = "subscriber")]
pub use flexi_core::logging;

pub use config::{ConfigFileError, SliderConfig};
pub use engine::{Command, REPAINT_DELAY, ResizeMode, SlideEngine};
pub use error::ConfigError;
pub use position::{PositionChanged, PositionController, PositionState};
pub use settings::{
    Change, HookOutcome, OptionName, OptionValue, Settings, SettingsHooks, SettingsPatch,
    SettingsStore, Tier, ValueKind, default_layouts, set_many_with_hooks, set_with_hooks,
};
pub use surface::{HeadlessSurface, NavAction, Surface, SurfaceUpdate};
