#![forbid(unsafe_code)]

//! Option storage with per-option change hooks.
//!
//! # Design
//!
//! The option set is closed ([`OptionName`]), so settings live in an
//! explicit record ([`Settings`]) rather than a string-keyed map, and hook
//! dispatch is a `match` in the host's [`SettingsHooks::on_set`] rather
//! than a lookup by name.
//!
//! Every write goes through [`set_with_hooks`]:
//!
//! 1. The value's kind is checked against the option.
//! 2. The host's hook (if the option has one) sees `{old, new}` and may
//!    rewrite `new`.
//! 3. The hook answers [`HookOutcome::Store`] (store `new`) or
//!    [`HookOutcome::Handled`] (keep the stored value; only the hook's side
//!    effects apply).
//!
//! # Ordering
//!
//! Batches ([`set_many_with_hooks`]) are applied in
//! [`OptionName::DEFAULT_ORDER`], never in patch order, because some hooks
//! read state prepared by earlier ones: slides must be found before they are
//! counted, and layouts must be resolved before resize detection starts.

use crate::error::ConfigError;
use flexi_layout::{LayoutRule, LayoutRuleSpec};
use std::fmt;
use std::str::FromStr;

/// Default markup for the previous/next controls.
pub const DEFAULT_NAVIGATION_TEMPLATE: &str =
    r#"<nav><b class="flexi-prev"></b><b class="flexi-next"></b></nav>"#;
pub const DEFAULT_SLIDER_SELECTOR: &str = ".flexi-slider";
pub const DEFAULT_SLIDES_SELECTOR: &str = ".flexi-slides";
pub const DEFAULT_SLIDE_SELECTOR: &str = ".flexi-slide";
pub const DEFAULT_CLICK_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_SCROLL_TRANSITION: &str = "0.5s ease-in-out";
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 100;

/// The single base layout used when nothing (valid) is configured.
#[must_use]
pub fn default_layouts() -> Vec<LayoutRuleSpec> {
    vec![LayoutRuleSpec::base().group(1).scroll(1).margin_px(0.0)]
}

/// Who may write an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Set once during initialization.
    Init,
    /// May be changed by callers at any time.
    Runtime,
    /// Derived by the engine; never set from outside.
    Internal,
}

/// Every option the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    NavigationTemplate,
    Slider,
    Slides,
    Slide,
    Debug,
    ClickDebounceTimeout,
    Layout,
    ScrollTransition,
    ResizeDebounceTimeout,
    WatchElementInterval,
    WatchElementResize,
    SlideLayout,
}

impl OptionName {
    /// Init defaults followed by runtime defaults. Batches are applied in
    /// this order.
    pub const DEFAULT_ORDER: [OptionName; 11] = [
        Self::NavigationTemplate,
        Self::Slider,
        Self::Slides,
        Self::Slide,
        Self::Debug,
        Self::ClickDebounceTimeout,
        Self::Layout,
        Self::ScrollTransition,
        Self::ResizeDebounceTimeout,
        Self::WatchElementInterval,
        Self::WatchElementResize,
    ];

    pub const ALL: [OptionName; 12] = [
        Self::NavigationTemplate,
        Self::Slider,
        Self::Slides,
        Self::Slide,
        Self::Debug,
        Self::ClickDebounceTimeout,
        Self::Layout,
        Self::ScrollTransition,
        Self::ResizeDebounceTimeout,
        Self::WatchElementInterval,
        Self::WatchElementResize,
        Self::SlideLayout,
    ];

    /// Configuration key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NavigationTemplate => "navigationTemplate",
            Self::Slider => "slider",
            Self::Slides => "slides",
            Self::Slide => "slide",
            Self::Debug => "debug",
            Self::ClickDebounceTimeout => "clickDebounceTimeout",
            Self::Layout => "layout",
            Self::ScrollTransition => "scrollTransition",
            Self::ResizeDebounceTimeout => "resizeDebounceTimeout",
            Self::WatchElementInterval => "watchElementInterval",
            Self::WatchElementResize => "watchElementResize",
            Self::SlideLayout => "slideLayout",
        }
    }

    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::NavigationTemplate | Self::Slider | Self::Slides | Self::Slide => Tier::Init,
            Self::SlideLayout => Tier::Internal,
            _ => Tier::Runtime,
        }
    }

    /// Kind of value the option holds.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::NavigationTemplate
            | Self::Slider
            | Self::Slides
            | Self::Slide
            | Self::ScrollTransition => ValueKind::Text,
            Self::Debug | Self::WatchElementResize => ValueKind::Bool,
            Self::ClickDebounceTimeout
            | Self::ResizeDebounceTimeout
            | Self::WatchElementInterval => ValueKind::Millis,
            Self::Layout => ValueKind::Layouts,
            Self::SlideLayout => ValueKind::Rule,
        }
    }

    /// Options whose hook deals with malformed values itself (by falling
    /// back to a default) instead of having them rejected up front.
    #[must_use]
    pub const fn lenient(self) -> bool {
        matches!(self, Self::Layout)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OptionName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.key() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

/// Kind tag of an [`OptionValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Unset,
    Bool,
    Millis,
    Text,
    Layouts,
    Rule,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unset => "nothing",
            Self::Bool => "a boolean",
            Self::Millis => "milliseconds",
            Self::Text => "text",
            Self::Layouts => "a layout list",
            Self::Rule => "a layout rule",
        })
    }
}

/// A dynamically typed option value.
///
/// [`OptionValue::Unset`] is the absent marker. It is distinct from
/// `false`, `0` and `""`, which are ordinary values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    Unset,
    Bool(bool),
    Millis(u64),
    Text(String),
    Layouts(Vec<LayoutRuleSpec>),
    Rule(LayoutRule),
}

impl OptionValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Unset => ValueKind::Unset,
            Self::Bool(_) => ValueKind::Bool,
            Self::Millis(_) => ValueKind::Millis,
            Self::Text(_) => ValueKind::Text,
            Self::Layouts(_) => ValueKind::Layouts,
            Self::Rule(_) => ValueKind::Rule,
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_millis(&self) -> Option<u64> {
        match self {
            Self::Millis(ms) => Some(*ms),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rule(&self) -> Option<&LayoutRule> {
        match self {
            Self::Rule(rule) => Some(rule),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Millis(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<LayoutRuleSpec>> for OptionValue {
    fn from(value: Vec<LayoutRuleSpec>) -> Self {
        Self::Layouts(value)
    }
}

impl From<LayoutRule> for OptionValue {
    fn from(value: LayoutRule) -> Self {
        Self::Rule(value)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Into::into)
    }
}

/// Stored option values. `None` is the absent marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub navigation_template: Option<String>,
    pub slider: Option<String>,
    pub slides: Option<String>,
    pub slide: Option<String>,
    pub debug: Option<bool>,
    pub click_debounce_timeout: Option<u64>,
    pub layout: Option<Vec<LayoutRuleSpec>>,
    pub scroll_transition: Option<String>,
    pub resize_debounce_timeout: Option<u64>,
    pub watch_element_interval: Option<u64>,
    pub watch_element_resize: Option<bool>,
    pub slide_layout: Option<LayoutRule>,
}

impl Settings {
    /// Current value of `name` as an [`OptionValue`].
    #[must_use]
    pub fn value(&self, name: OptionName) -> OptionValue {
        match name {
            OptionName::NavigationTemplate => self.navigation_template.clone().into(),
            OptionName::Slider => self.slider.clone().into(),
            OptionName::Slides => self.slides.clone().into(),
            OptionName::Slide => self.slide.clone().into(),
            OptionName::Debug => self.debug.into(),
            OptionName::ClickDebounceTimeout => self.click_debounce_timeout.into(),
            OptionName::Layout => self.layout.clone().into(),
            OptionName::ScrollTransition => self.scroll_transition.clone().into(),
            OptionName::ResizeDebounceTimeout => self.resize_debounce_timeout.into(),
            OptionName::WatchElementInterval => self.watch_element_interval.into(),
            OptionName::WatchElementResize => self.watch_element_resize.into(),
            OptionName::SlideLayout => self.slide_layout.into(),
        }
    }

    /// Write `value` into the field for `name`. `Unset` clears the field.
    pub(crate) fn put(&mut self, name: OptionName, value: OptionValue) -> Result<(), ConfigError> {
        let mismatch = |found: ValueKind| ConfigError::TypeMismatch {
            name,
            expected: name.kind(),
            found,
        };
        let found = value.kind();
        match (name, value) {
            (OptionName::NavigationTemplate, v) => self.navigation_template = text(v).map_err(mismatch)?,
            (OptionName::Slider, v) => self.slider = text(v).map_err(mismatch)?,
            (OptionName::Slides, v) => self.slides = text(v).map_err(mismatch)?,
            (OptionName::Slide, v) => self.slide = text(v).map_err(mismatch)?,
            (OptionName::ScrollTransition, v) => self.scroll_transition = text(v).map_err(mismatch)?,
            (OptionName::Debug, v) => self.debug = boolean(v).map_err(mismatch)?,
            (OptionName::WatchElementResize, v) => {
                self.watch_element_resize = boolean(v).map_err(mismatch)?;
            }
            (OptionName::ClickDebounceTimeout, v) => {
                self.click_debounce_timeout = millis(v).map_err(mismatch)?;
            }
            (OptionName::ResizeDebounceTimeout, v) => {
                self.resize_debounce_timeout = millis(v).map_err(mismatch)?;
            }
            (OptionName::WatchElementInterval, v) => {
                self.watch_element_interval = millis(v).map_err(mismatch)?;
            }
            (OptionName::Layout, OptionValue::Layouts(specs)) => self.layout = Some(specs),
            (OptionName::SlideLayout, OptionValue::Rule(rule)) => self.slide_layout = Some(rule),
            (OptionName::Layout, OptionValue::Unset) => self.layout = None,
            (OptionName::SlideLayout, OptionValue::Unset) => self.slide_layout = None,
            (OptionName::Layout | OptionName::SlideLayout, _) => return Err(mismatch(found)),
        }
        Ok(())
    }

    pub fn watch_element_interval(&self) -> u64 {
        self.watch_element_interval
            .unwrap_or(DEFAULT_WATCH_INTERVAL_MS)
    }

    pub fn scroll_transition(&self) -> &str {
        self.scroll_transition
            .as_deref()
            .unwrap_or(DEFAULT_SCROLL_TRANSITION)
    }
}

fn text(value: OptionValue) -> Result<Option<String>, ValueKind> {
    match value {
        OptionValue::Text(s) => Ok(Some(s)),
        OptionValue::Unset => Ok(None),
        other => Err(other.kind()),
    }
}

fn boolean(value: OptionValue) -> Result<Option<bool>, ValueKind> {
    match value {
        OptionValue::Bool(b) => Ok(Some(b)),
        OptionValue::Unset => Ok(None),
        other => Err(other.kind()),
    }
}

fn millis(value: OptionValue) -> Result<Option<u64>, ValueKind> {
    match value {
        OptionValue::Millis(ms) => Ok(Some(ms)),
        OptionValue::Unset => Ok(None),
        other => Err(other.kind()),
    }
}

/// A set of option assignments, at most one per option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    entries: Vec<(OptionName, OptionValue)>,
}

impl SettingsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options fixed at initialization.
    #[must_use]
    pub fn init_defaults() -> Self {
        Self::new()
            .with(OptionName::NavigationTemplate, DEFAULT_NAVIGATION_TEMPLATE)
            .with(OptionName::Slider, DEFAULT_SLIDER_SELECTOR)
            .with(OptionName::Slides, DEFAULT_SLIDES_SELECTOR)
            .with(OptionName::Slide, DEFAULT_SLIDE_SELECTOR)
    }

    /// Options callers may change later.
    #[must_use]
    pub fn runtime_defaults() -> Self {
        Self::new()
            .with(OptionName::Debug, false)
            .with(OptionName::ClickDebounceTimeout, DEFAULT_CLICK_DEBOUNCE_MS)
            .with(OptionName::Layout, default_layouts())
            .with(OptionName::ScrollTransition, DEFAULT_SCROLL_TRANSITION)
            .with(OptionName::ResizeDebounceTimeout, DEFAULT_RESIZE_DEBOUNCE_MS)
            .with(OptionName::WatchElementInterval, DEFAULT_WATCH_INTERVAL_MS)
            .with(OptionName::WatchElementResize, false)
    }

    /// `defaults_a`, overridden by `defaults_b`, overridden by `overrides`.
    #[must_use]
    pub fn merge(defaults_a: Self, defaults_b: Self, overrides: Self) -> Self {
        defaults_a.merged(defaults_b).merged(overrides)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: OptionName, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Assign `value` to `name`, replacing an earlier assignment.
    pub fn insert(&mut self, name: OptionName, value: impl Into<OptionValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// `self` with every assignment of `other` applied on top.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: OptionName) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionName, &OptionValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owner of the [`Settings`] record.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stored value of `name`, or [`OptionValue::Unset`].
    #[must_use]
    pub fn get(&self, name: OptionName) -> OptionValue {
        self.settings.value(name)
    }

    /// Stored value of `name`, or `fallback` when it is unset.
    #[must_use]
    pub fn get_or(&self, name: OptionName, fallback: impl Into<OptionValue>) -> OptionValue {
        match self.get(name) {
            OptionValue::Unset => fallback.into(),
            value => value,
        }
    }

    pub(crate) fn put(&mut self, name: OptionName, value: OptionValue) -> Result<(), ConfigError> {
        self.settings.put(name, value)
    }
}

/// The `{old, new}` pair a hook receives.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub name: OptionName,
    pub old: OptionValue,
    /// May be rewritten by the hook before it is stored.
    pub new: OptionValue,
}

/// What [`set_with_hooks`] does after a hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Store `change.new`.
    Store,
    /// Leave the stored value alone.
    Handled,
}

/// Host of a [`SettingsStore`] with per-option side effects.
pub trait SettingsHooks {
    fn store(&self) -> &SettingsStore;

    fn store_mut(&mut self) -> &mut SettingsStore;

    /// Run the hook for `change.name`.
    ///
    /// Returns `None` when the option has no hook, so the value is stored
    /// verbatim. An `Err` means the value was not applied; nothing is stored.
    fn on_set(&mut self, change: &mut Change) -> Option<Result<HookOutcome, ConfigError>>;
}

/// Write one option through its hook.
pub fn set_with_hooks<H: SettingsHooks + ?Sized>(
    host: &mut H,
    name: OptionName,
    value: OptionValue,
) -> Result<(), ConfigError> {
    if !value.is_unset() && value.kind() != name.kind() && !name.lenient() {
        let err = ConfigError::TypeMismatch {
            name,
            expected: name.kind(),
            found: value.kind(),
        };
        tracing::error!(option = %name, error = %err, "rejected option value");
        return Err(err);
    }
    let old = host.store().get(name);
    let mut change = Change {
        name,
        old,
        new: value,
    };
    match host.on_set(&mut change) {
        None | Some(Ok(HookOutcome::Store)) => host.store_mut().put(name, change.new),
        Some(Ok(HookOutcome::Handled)) => Ok(()),
        Some(Err(err)) => Err(err),
    }
}

/// Write every option of `patch` that belongs to the default key set, in
/// [`OptionName::DEFAULT_ORDER`]. Keeps going past failures and returns
/// them all.
pub fn set_many_with_hooks<H: SettingsHooks + ?Sized>(
    host: &mut H,
    patch: &SettingsPatch,
) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    for name in OptionName::DEFAULT_ORDER {
        let Some(value) = patch.get(name) else {
            continue;
        };
        if let Err(err) = set_with_hooks(host, name, value.clone()) {
            errors.push(err);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records hook calls; `slides` is settable once, `layout` is never stored.
    #[derive(Default)]
    struct Host {
        store: SettingsStore,
        calls: Vec<OptionName>,
    }

    impl SettingsHooks for Host {
        fn store(&self) -> &SettingsStore {
            &self.store
        }

        fn store_mut(&mut self) -> &mut SettingsStore {
            &mut self.store
        }

        fn on_set(&mut self, change: &mut Change) -> Option<Result<HookOutcome, ConfigError>> {
            match change.name {
                OptionName::Slides => {
                    self.calls.push(change.name);
                    if change.old.is_unset() {
                        change.new = OptionValue::Text("#resolved".into());
                        Some(Ok(HookOutcome::Store))
                    } else {
                        Some(Ok(HookOutcome::Handled))
                    }
                }
                OptionName::Layout => {
                    self.calls.push(change.name);
                    Some(Ok(HookOutcome::Handled))
                }
                _ => None,
            }
        }
    }

    #[test]
    fn option_names_round_trip_through_keys() {
        for name in OptionName::ALL {
            assert_eq!(name.key().parse::<OptionName>().unwrap(), name);
        }
        assert_eq!(
            "bogus".parse::<OptionName>(),
            Err(ConfigError::UnknownOption("bogus".into()))
        );
    }

    #[test]
    fn only_runtime_defaults_are_runtime_tier() {
        let runtime = SettingsPatch::runtime_defaults();
        for name in OptionName::ALL {
            assert_eq!(runtime.get(name).is_some(), name.tier() == Tier::Runtime, "{name}");
        }
    }

    #[test]
    fn merge_priority_is_overrides_then_b_then_a() {
        let a = SettingsPatch::new()
            .with(OptionName::Debug, false)
            .with(OptionName::Slider, ".a");
        let b = SettingsPatch::new()
            .with(OptionName::Debug, true)
            .with(OptionName::ClickDebounceTimeout, 10u64);
        let o = SettingsPatch::new().with(OptionName::ClickDebounceTimeout, 99u64);
        let merged = SettingsPatch::merge(a, b, o);
        assert_eq!(merged.get(OptionName::Debug), Some(&OptionValue::Bool(true)));
        assert_eq!(merged.get(OptionName::Slider), Some(&OptionValue::Text(".a".into())));
        assert_eq!(
            merged.get(OptionName::ClickDebounceTimeout),
            Some(&OptionValue::Millis(99))
        );
    }

    #[test]
    fn get_or_only_falls_back_on_unset() {
        let mut host = Host::default();
        set_with_hooks(&mut host, OptionName::ClickDebounceTimeout, 0u64.into()).unwrap();
        set_with_hooks(&mut host, OptionName::Debug, false.into()).unwrap();
        set_with_hooks(&mut host, OptionName::ScrollTransition, "".into()).unwrap();
        let store = &host.store;
        assert_eq!(
            store.get_or(OptionName::ClickDebounceTimeout, 5u64),
            OptionValue::Millis(0)
        );
        assert_eq!(store.get_or(OptionName::Debug, true), OptionValue::Bool(false));
        assert_eq!(
            store.get_or(OptionName::ScrollTransition, "x"),
            OptionValue::Text(String::new())
        );
        assert_eq!(
            store.get_or(OptionName::WatchElementInterval, 7u64),
            OptionValue::Millis(7)
        );
    }

    #[test]
    fn hook_can_rewrite_value_before_store() {
        let mut host = Host::default();
        set_with_hooks(&mut host, OptionName::Slides, ".flexi-slides".into()).unwrap();
        assert_eq!(host.store.get(OptionName::Slides), OptionValue::Text("#resolved".into()));
    }

    #[test]
    fn handled_hook_leaves_stored_value_alone() {
        let mut host = Host::default();
        set_with_hooks(&mut host, OptionName::Slides, "a".into()).unwrap();
        set_with_hooks(&mut host, OptionName::Slides, "b".into()).unwrap();
        assert_eq!(host.store.get(OptionName::Slides), OptionValue::Text("#resolved".into()));

        set_with_hooks(&mut host, OptionName::Layout, default_layouts().into()).unwrap();
        assert!(host.store.get(OptionName::Layout).is_unset());
    }

    #[test]
    fn wrong_kind_is_rejected_before_the_hook() {
        let mut host = Host::default();
        let err = set_with_hooks(&mut host, OptionName::Slides, 5u64.into()).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { name: OptionName::Slides, .. }));
        assert!(host.calls.is_empty());
    }

    #[test]
    fn lenient_option_reaches_its_hook_with_any_kind() {
        let mut host = Host::default();
        set_with_hooks(&mut host, OptionName::Layout, "not a list".into()).unwrap();
        assert_eq!(host.calls, vec![OptionName::Layout]);
    }

    #[test]
    fn batches_follow_default_order_and_skip_non_default_keys() {
        let mut host = Host::default();
        let patch = SettingsPatch::new()
            .with(OptionName::Layout, default_layouts())
            .with(OptionName::SlideLayout, OptionValue::Unset)
            .with(OptionName::Slides, ".s");
        let errors = set_many_with_hooks(&mut host, &patch);
        assert!(errors.is_empty());
        assert_eq!(host.calls, vec![OptionName::Slides, OptionName::Layout]);
    }

    #[test]
    fn batch_collects_errors_and_keeps_going() {
        let mut host = Host::default();
        let patch = SettingsPatch::new()
            .with(OptionName::Debug, 3u64)
            .with(OptionName::WatchElementInterval, 50u64);
        let errors = set_many_with_hooks(&mut host, &patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(host.store.get(OptionName::WatchElementInterval), OptionValue::Millis(50));
    }
}
