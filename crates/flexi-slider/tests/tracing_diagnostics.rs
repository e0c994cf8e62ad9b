#![forbid(unsafe_code)]

//! Diagnostics emitted by the engine.
//!
//! Errors and warnings are always emitted; per-option activity only appears
//! at debug level once the `debug` option is on.
//!
//! Run:
//!   cargo test -p flexi-slider --test tracing_diagnostics

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use flexi_core::ManualClock;
use flexi_slider::{HeadlessSurface, OptionName, SettingsPatch, SlideEngine};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    fn at(&self, level: tracing::Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { events, spans }
}

fn engine(overrides: SettingsPatch) -> SlideEngine<HeadlessSurface, ManualClock> {
    SlideEngine::initialize(HeadlessSurface::new(640, 3), ManualClock::new(), overrides)
}

#[test]
fn missing_container_is_logged_as_error() {
    let handle = with_captured(|| {
        let _engine = engine(SettingsPatch::new().with(OptionName::Slides, ".nowhere"));
    });
    let errors = handle.at(tracing::Level::ERROR);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].message, "slides container not found");
    assert!(errors[0].fields["error"].contains(".nowhere"));
    assert!(handle.spans().iter().any(|s| s == "flexi.initialize"));
}

#[test]
fn protected_write_is_logged_as_warning() {
    let handle = with_captured(|| {
        let mut engine = engine(SettingsPatch::new());
        let _ = engine.set(OptionName::Slide, ".other");
    });
    let warnings = handle.at(tracing::Level::WARN);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert_eq!(warnings[0].message, "the option cannot be set");
    assert_eq!(warnings[0].fields["option"], "slide");
}

#[test]
fn bad_layout_list_is_logged_as_error() {
    let handle = with_captured(|| {
        let mut engine = engine(SettingsPatch::new());
        let _ = engine.set(OptionName::Layout, "nope");
    });
    assert!(
        handle
            .at(tracing::Level::ERROR)
            .iter()
            .any(|e| e.message == "wrong layouts set, falling back to defaults")
    );
}

#[test]
fn option_activity_is_silent_without_debug() {
    let handle = with_captured(|| {
        let mut engine = engine(SettingsPatch::new());
        engine.set(OptionName::ScrollTransition, "1s").unwrap();
        engine.next(true);
    });
    assert!(
        handle
            .at(tracing::Level::DEBUG)
            .iter()
            .all(|e| e.message != "set" && e.message != "next"),
    );
}

#[test]
fn debug_option_turns_on_option_activity() {
    let handle = with_captured(|| {
        let mut engine = engine(SettingsPatch::new().with(OptionName::Debug, true));
        engine.set(OptionName::ScrollTransition, "1s").unwrap();
        engine.next(true);
    });
    let debug = handle.at(tracing::Level::DEBUG);
    let transition_sets: Vec<_> = debug
        .iter()
        .filter(|e| e.message == "set")
        .filter(|e| e.fields.get("option").map(String::as_str) == Some("scrollTransition"))
        .map(|e| e.parent_span_name.as_deref())
        .collect();
    assert_eq!(
        transition_sets,
        vec![Some("flexi.initialize"), Some("flexi.set")]
    );
    assert!(debug.iter().any(|e| e.message == "next"));
    assert!(debug.iter().any(|e| e.message == "slider initialized"));
}
