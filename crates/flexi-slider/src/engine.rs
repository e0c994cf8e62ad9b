#![forbid(unsafe_code)]

//! The slide engine: settings, breakpoints, geometry, and position wired
//! together behind one owner.
//!
//! # Signal flow
//!
//! ```text
//! resize (poll tick | native event) ─▶ resize gate ─▶ measure width
//!     ─▶ breakpoint tracker ─▶ set(slideLayout) ─▶ hook
//!     ─▶ slide width/margin formulas ─▶ offset for current index ─▶ Surface
//!
//! click(prev|next) ─▶ click gate ─▶ PositionController ─▶ offset ─▶ Surface
//! ```
//!
//! # Time
//!
//! The engine never sleeps. Cooldowns are deadlines checked when a signal
//! arrives; the resize poll and the transition restore after an unanimated
//! move are entries in a [`TimerQueue`] drained by [`SlideEngine::tick`].
//! The host calls `tick` from its frame or timer loop.
//!
//! # Failure Modes
//!
//! Every configuration problem is logged and answered with an `Err`; the
//! engine keeps its last good state. Nothing here panics on bad input.

use crate::error::ConfigError;
use crate::position::{PositionChanged, PositionController, PositionState};
use crate::settings::{
    Change, HookOutcome, OptionName, OptionValue, Settings, SettingsHooks, SettingsPatch,
    SettingsStore, Tier, default_layouts, set_many_with_hooks, set_with_hooks,
};
use crate::surface::{NavAction, Surface, SurfaceUpdate};
use flexi_core::clock::{Clock, SystemClock};
use flexi_core::debounce::{DebounceGate, Gate};
use flexi_core::length::Length;
use flexi_core::timer::TimerQueue;
use flexi_layout::breakpoint::{
    BreakpointTracker, LayoutRule, LayoutRuleSpec, Transition, resolve,
};
use flexi_layout::geometry::{Offset, WidthFormula, container_offset, slide_width};
use std::str::FromStr;
use std::time::Duration;

/// Delay before transitions are re-enabled after an unanimated move.
///
/// Long enough for the surface to paint the new transform without a
/// transition in between.
pub const REPAINT_DELAY: Duration = Duration::from_millis(142);

/// Debug-level diagnostics that only appear when the `debug` option is on.
macro_rules! verbose {
    ($engine:expr, $($arg:tt)+) => {
        if $engine.verbose {
            tracing::debug!($($arg)+);
        }
    };
}

/// Deferred continuations owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineTimer {
    /// Periodic width check in poll mode.
    ResizePoll,
    /// Re-enable the container transition after an unanimated move.
    RestoreTransition,
}

/// Where resize signals come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Not configured yet.
    Detached,
    /// Fixed-interval width polling.
    Poll,
    /// Native resize events forwarded through [`SlideEngine::notify_resize`].
    Event,
}

/// String commands accepted by [`SlideEngine::invoke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
}

impl FromStr for Command {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            other => Err(ConfigError::UnknownCommand(other.to_string())),
        }
    }
}

/// A responsive slider bound to one [`Surface`].
pub struct SlideEngine<S: Surface, C: Clock = SystemClock> {
    surface: S,
    clock: C,
    store: SettingsStore,
    position: PositionController,
    layouts: Vec<LayoutRule>,
    tracker: BreakpointTracker,
    /// Last measured container width; 0 while unknown or hidden.
    container_width: u32,
    margin: Length,
    /// Width formula of the active layout, reused for every offset.
    slide_width: Option<WidthFormula>,
    slides_found: bool,
    navigation_bound: bool,
    resize_gate: DebounceGate,
    click_gate: DebounceGate,
    timers: TimerQueue<EngineTimer>,
    resize_mode: ResizeMode,
    verbose: bool,
    init_errors: Vec<ConfigError>,
}

impl<S: Surface + std::fmt::Debug, C: Clock> std::fmt::Debug for SlideEngine<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideEngine")
            .field("surface", &self.surface)
            .field("position", &self.position.state())
            .field("layouts", &self.layouts.len())
            .field("container_width", &self.container_width)
            .field("resize_mode", &self.resize_mode)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> SlideEngine<S, SystemClock> {
    /// Initialize against the wall clock.
    pub fn new(surface: S, overrides: SettingsPatch) -> Self {
        Self::initialize(surface, SystemClock, overrides)
    }
}

impl<S: Surface, C: Clock> SlideEngine<S, C> {
    /// Build an engine and apply init defaults, runtime defaults, then
    /// `overrides`, in [`OptionName::DEFAULT_ORDER`].
    ///
    /// Problems are logged and kept in
    /// [`initialization_errors`](Self::initialization_errors); the engine
    /// is usable either way.
    pub fn initialize(surface: S, clock: C, overrides: SettingsPatch) -> Self {
        let mut engine = Self {
            surface,
            clock,
            store: SettingsStore::new(),
            position: PositionController::new(),
            layouts: Vec::new(),
            tracker: BreakpointTracker::new(),
            container_width: 0,
            margin: Length::ZERO,
            slide_width: None,
            slides_found: false,
            navigation_bound: false,
            resize_gate: DebounceGate::from_millis(crate::settings::DEFAULT_RESIZE_DEBOUNCE_MS),
            click_gate: DebounceGate::from_millis(crate::settings::DEFAULT_CLICK_DEBOUNCE_MS),
            timers: TimerQueue::new(),
            resize_mode: ResizeMode::Detached,
            verbose: false,
            init_errors: Vec::new(),
        };
        let settings = SettingsPatch::merge(
            SettingsPatch::init_defaults(),
            SettingsPatch::runtime_defaults(),
            overrides,
        );
        let _span = tracing::debug_span!("flexi.initialize", options = settings.len()).entered();
        engine.init_errors = set_many_with_hooks(&mut engine, &settings);
        verbose!(
            engine,
            errors = engine.init_errors.len(),
            slides = engine.position.state().slide_count,
            "slider initialized"
        );
        engine
    }

    /// Errors hit while applying the initial settings.
    #[must_use]
    pub fn initialization_errors(&self) -> &[ConfigError] {
        &self.init_errors
    }

    // -----------------------------------------------------------------------
    // Options
    // -----------------------------------------------------------------------

    /// Set a runtime option.
    ///
    /// Options outside the runtime tier are rejected with
    /// [`ConfigError::Protected`].
    pub fn set(&mut self, name: OptionName, value: impl Into<OptionValue>) -> Result<(), ConfigError> {
        if name.tier() != Tier::Runtime {
            tracing::warn!(option = %name, "the option cannot be set");
            return Err(ConfigError::Protected(name));
        }
        let _span = tracing::debug_span!("flexi.set", option = %name).entered();
        set_with_hooks(self, name, value.into())
    }

    /// Set a runtime option by its configuration key.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<(), ConfigError> {
        let name = name.parse::<OptionName>().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected option");
        })?;
        self.set(name, value)
    }

    /// Set several runtime options in default order.
    ///
    /// Options outside the runtime tier are reported and skipped; the rest
    /// are still applied. Returns every error encountered.
    pub fn set_many(&mut self, patch: &SettingsPatch) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut allowed = SettingsPatch::new();
        for (name, value) in patch.iter() {
            if name.tier() == Tier::Runtime {
                allowed.insert(name, value.clone());
            } else {
                tracing::warn!(option = %name, "the option cannot be set");
                errors.push(ConfigError::Protected(name));
            }
        }
        errors.extend(set_many_with_hooks(self, &allowed));
        errors
    }

    /// Stored value of `name`, or [`OptionValue::Unset`].
    #[must_use]
    pub fn get(&self, name: OptionName) -> OptionValue {
        self.store.get(name)
    }

    /// Stored value of `name`, or `fallback` when unset.
    #[must_use]
    pub fn get_or(&self, name: OptionName, fallback: impl Into<OptionValue>) -> OptionValue {
        self.store.get_or(name, fallback)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Show the next slide, wrapping to the first.
    pub fn next(&mut self, animate: bool) -> PositionChanged {
        let change = self.position.next(animate);
        verbose!(self, index = change.index, animate, "next");
        self.update_position(change.animate);
        change
    }

    /// Show the previous slide, wrapping to the last.
    pub fn prev(&mut self, animate: bool) -> PositionChanged {
        let change = self.position.prev(animate);
        verbose!(self, index = change.index, animate, "prev");
        self.update_position(change.animate);
        change
    }

    /// Show slide `index` first, clamped to the last valid index.
    pub fn go_to(&mut self, index: usize, animate: bool) -> PositionChanged {
        let change = self.position.go_to(index, animate);
        verbose!(self, index = change.index, animate, "go_to");
        self.update_position(change.animate);
        change
    }

    /// Run a command by name (`"next"`, `"prev"`), animated.
    pub fn invoke(&mut self, command: &str) -> Result<PositionChanged, ConfigError> {
        let command = command.parse::<Command>().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected command");
        })?;
        Ok(match command {
            Command::Next => self.next(true),
            Command::Prev => self.prev(true),
        })
    }

    /// A navigation control was activated. Debounced on the click channel.
    pub fn click(&mut self, action: NavAction) -> Gate {
        let gate = self.click_gate.signal(self.clock.now());
        match gate {
            Gate::Pass => {
                match action {
                    NavAction::Next => self.next(true),
                    NavAction::Prev => self.prev(true),
                };
            }
            Gate::Drop => verbose!(self, action = action.name(), "click debounced"),
        }
        gate
    }

    // -----------------------------------------------------------------------
    // Resize and time
    // -----------------------------------------------------------------------

    /// A native resize event arrived. Only honoured in [`ResizeMode::Event`].
    pub fn notify_resize(&mut self) -> Gate {
        if self.resize_mode != ResizeMode::Event {
            verbose!(self, mode = ?self.resize_mode, "resize event ignored");
            return Gate::Drop;
        }
        let gate = self.resize_gate.signal(self.clock.now());
        if gate.passed() {
            self.resize_tick();
        } else {
            verbose!(self, "resize debounced");
        }
        gate
    }

    /// Run every continuation that has come due.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        for timer in self.timers.drain_due(now) {
            match timer {
                EngineTimer::ResizePoll => self.poll_width(),
                EngineTimer::RestoreTransition => self.restore_transition(),
            }
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<web_time::Instant> {
        self.timers.next_deadline()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn position(&self) -> PositionState {
        self.position.state()
    }

    /// Resolved layout rules, sorted by width.
    #[must_use]
    pub fn layouts(&self) -> &[LayoutRule] {
        &self.layouts
    }

    /// Rule currently applied, if the container has been measured.
    #[must_use]
    pub fn active_layout(&self) -> Option<&LayoutRule> {
        self.tracker.last_index().and_then(|i| self.layouts.get(i))
    }

    #[must_use]
    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    #[must_use]
    pub fn slide_width(&self) -> Option<WidthFormula> {
        self.slide_width
    }

    /// Container offset for the current index.
    #[must_use]
    pub fn offset(&self) -> Option<Offset> {
        self.slide_width
            .map(|width| container_offset(self.position.index(), &width, self.margin))
    }

    #[must_use]
    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Forward a resize only when the measured width moved.
    fn resize_tick(&mut self) {
        if self.surface.container_width() != self.container_width {
            self.update_resize();
        }
    }

    fn poll_width(&mut self) {
        if self.surface.container_width() == self.container_width {
            return;
        }
        if self.resize_gate.sample(self.clock.now()).passed() {
            self.update_resize();
        } else {
            verbose!(self, "polled resize debounced");
        }
    }

    /// Measure and apply the matching layout if it changed.
    fn update_resize(&mut self) {
        let was_hidden = self.container_width == 0;
        self.container_width = self.surface.container_width();
        match self.tracker.observe(self.container_width, &self.layouts) {
            Transition::Changed { index, rule } => {
                verbose!(self, index, width = self.container_width, "layout changed");
                if let Err(err) = set_with_hooks(self, OptionName::SlideLayout, rule.into()) {
                    tracing::error!(error = %err, "failed to apply layout");
                }
            }
            Transition::Unchanged => {
                verbose!(self, width = self.container_width, "layout unchanged");
                // Moves made while hidden were never painted.
                if was_hidden {
                    self.update_position(false);
                }
            }
            Transition::Unmeasured => {
                verbose!(self, "container has no width; layout skipped");
            }
        }
    }

    /// Recompute slide geometry for the active layout.
    fn update_slides(&mut self) {
        if self.container_width == 0 {
            return;
        }
        let group = u32::try_from(self.position.state().group).unwrap_or(u32::MAX);
        let width = slide_width(group, self.margin);
        self.slide_width = Some(width);
        self.surface.apply(SurfaceUpdate::SlideWidth(width));
        self.surface.apply(SurfaceUpdate::SlideMargin(self.margin));
        self.update_position(false);
        self.surface.apply(SurfaceUpdate::Reveal);
    }

    /// Push the offset for the current index to the surface.
    fn update_position(&mut self, animate: bool) {
        if self.surface.container_width() == 0 {
            return;
        }
        let Some(offset) = self.offset() else {
            return;
        };
        if animate {
            if self.timers.cancel(EngineTimer::RestoreTransition) {
                self.restore_transition();
            }
            self.surface.apply(SurfaceUpdate::Transform(offset));
        } else {
            self.surface.apply(SurfaceUpdate::Transition(None));
            self.surface.apply(SurfaceUpdate::Transform(offset));
            self.timers
                .schedule_in(EngineTimer::RestoreTransition, self.clock.now(), REPAINT_DELAY);
        }
    }

    fn restore_transition(&mut self) {
        let timing = self.store.settings().scroll_transition().to_string();
        self.surface.apply(SurfaceUpdate::Transition(Some(timing)));
    }

    fn set_resize_mode(&mut self, poll: bool) {
        self.timers.cancel(EngineTimer::ResizePoll);
        self.resize_gate.cancel();
        if poll {
            self.surface.watch_resize(false);
            let interval = Duration::from_millis(self.store.settings().watch_element_interval());
            self.timers
                .schedule_every(EngineTimer::ResizePoll, self.clock.now(), interval);
            self.resize_mode = ResizeMode::Poll;
        } else {
            self.surface.watch_resize(true);
            self.resize_mode = ResizeMode::Event;
            self.resize_tick();
        }
        verbose!(self, mode = ?self.resize_mode, "resize detection switched");
    }

    // -----------------------------------------------------------------------
    // Hooks
    // -----------------------------------------------------------------------

    fn on_navigation_template(&mut self, change: &Change) -> HookOutcome {
        if !self.navigation_bound || change.old != change.new {
            if self.navigation_bound {
                self.surface.unbind_navigation();
                self.navigation_bound = false;
            }
            if let Some(template) = change.new.as_text() {
                self.surface.bind_navigation(template);
                self.navigation_bound = true;
                if self.position.is_navigable() {
                    self.surface.show_navigation();
                }
            }
        }
        HookOutcome::Store
    }

    fn on_slides(&mut self, change: &Change) -> Result<HookOutcome, ConfigError> {
        if !change.old.is_unset() {
            verbose!(self, "slides container is already set");
            return Ok(HookOutcome::Handled);
        }
        let Some(selector) = change.new.as_text() else {
            return Ok(HookOutcome::Store);
        };
        if self.surface.find_slides(selector) {
            self.slides_found = true;
            Ok(HookOutcome::Store)
        } else {
            self.slides_found = false;
            let err = ConfigError::SelectorNotFound {
                option: OptionName::Slides,
                selector: selector.to_string(),
            };
            tracing::error!(error = %err, "slides container not found");
            Err(err)
        }
    }

    fn on_slide(&mut self, change: &Change) -> HookOutcome {
        let count = match change.new.as_text() {
            Some(selector) if self.slides_found => self.surface.count_slides(selector),
            Some(selector) => {
                tracing::warn!(selector, "no slides container; slides not counted");
                0
            }
            None => 0,
        };
        self.position.set_slide_count(count);
        if self.position.is_navigable() && self.navigation_bound {
            self.surface.show_navigation();
        }
        verbose!(self, count, "slides counted");
        self.update_position(false);
        HookOutcome::Store
    }

    fn on_layout(&mut self, change: &Change) -> Result<HookOutcome, ConfigError> {
        let (specs, fallback): (Vec<LayoutRuleSpec>, bool) = match &change.new {
            OptionValue::Layouts(specs) if !specs.is_empty() => (specs.clone(), false),
            other => {
                tracing::error!(value = ?other, "wrong layouts set, falling back to defaults");
                (default_layouts(), true)
            }
        };
        match resolve(&specs) {
            Ok(rules) => {
                verbose!(self, rules = rules.len(), "layouts replaced");
                self.layouts = rules;
                self.update_resize();
            }
            Err(err) => {
                tracing::error!(error = %err, "layouts rejected; keeping previous layouts");
                return Err(err.into());
            }
        }
        if fallback {
            Err(ConfigError::InvalidLayoutList)
        } else {
            Ok(HookOutcome::Handled)
        }
    }

    fn on_slide_layout(&mut self, change: &Change) -> HookOutcome {
        let Some(rule) = change.new.as_rule().copied() else {
            return HookOutcome::Handled;
        };
        self.margin = rule.margin;
        self.position.set_group(rule.group as usize);
        self.position.set_scroll(rule.scroll as usize);
        self.update_slides();
        HookOutcome::Store
    }

    fn on_scroll_transition(&mut self, change: &Change) -> HookOutcome {
        // A pending restore applies the stored value when it fires.
        if !self.timers.is_scheduled(EngineTimer::RestoreTransition) {
            let timing = change
                .new
                .as_text()
                .unwrap_or(crate::settings::DEFAULT_SCROLL_TRANSITION);
            self.surface
                .apply(SurfaceUpdate::Transition(Some(timing.to_string())));
        }
        HookOutcome::Store
    }

    fn on_watch_element_interval(&mut self, change: &Change) -> HookOutcome {
        if self.resize_mode == ResizeMode::Poll && change.old != change.new {
            let interval = change
                .new
                .as_millis()
                .unwrap_or(crate::settings::DEFAULT_WATCH_INTERVAL_MS);
            self.timers.schedule_every(
                EngineTimer::ResizePoll,
                self.clock.now(),
                Duration::from_millis(interval),
            );
        }
        HookOutcome::Store
    }
}

impl<S: Surface, C: Clock> SettingsHooks for SlideEngine<S, C> {
    fn store(&self) -> &SettingsStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    fn on_set(&mut self, change: &mut Change) -> Option<Result<HookOutcome, ConfigError>> {
        verbose!(self, option = %change.name, old = ?change.old, new = ?change.new, "set");
        let outcome = match change.name {
            OptionName::NavigationTemplate => Ok(self.on_navigation_template(change)),
            OptionName::Slides => self.on_slides(change),
            OptionName::Slide => Ok(self.on_slide(change)),
            OptionName::Debug => {
                self.verbose = change.new.as_bool().unwrap_or(false);
                Ok(HookOutcome::Store)
            }
            OptionName::ClickDebounceTimeout => {
                let ms = change
                    .new
                    .as_millis()
                    .unwrap_or(crate::settings::DEFAULT_CLICK_DEBOUNCE_MS);
                self.click_gate.set_cooldown(Duration::from_millis(ms));
                Ok(HookOutcome::Store)
            }
            OptionName::ResizeDebounceTimeout => {
                let ms = change
                    .new
                    .as_millis()
                    .unwrap_or(crate::settings::DEFAULT_RESIZE_DEBOUNCE_MS);
                self.resize_gate.set_cooldown(Duration::from_millis(ms));
                Ok(HookOutcome::Store)
            }
            OptionName::Layout => self.on_layout(change),
            OptionName::SlideLayout => Ok(self.on_slide_layout(change)),
            OptionName::ScrollTransition => Ok(self.on_scroll_transition(change)),
            OptionName::WatchElementInterval => Ok(self.on_watch_element_interval(change)),
            OptionName::WatchElementResize => {
                if change.old != change.new {
                    self.set_resize_mode(change.new.as_bool().unwrap_or(false));
                }
                Ok(HookOutcome::Store)
            }
            OptionName::Slider => return None,
        };
        Some(outcome)
    }
}
