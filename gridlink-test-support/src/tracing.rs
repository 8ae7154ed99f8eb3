//! Capture spans and events emitted while a closure runs.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use ::tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
};

/// A closed span with its recorded fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedSpan {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Fields recorded at creation or later via `Span::record`.
    pub fields: HashMap<String, String>,
}

/// An emitted event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Fields attached to the event, including `message`.
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Returns the rendered `message` field, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

/// Everything captured by [`capture`].
#[derive(Clone, Debug, Default)]
pub struct Captured {
    /// Spans in close order.
    pub spans: Vec<CapturedSpan>,
    /// Events in emission order.
    pub events: Vec<CapturedEvent>,
}

impl Captured {
    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<&CapturedSpan> {
        self.spans.iter().find(|span| span.name == name)
    }

    /// Returns the names of every closed span.
    #[must_use]
    pub fn span_names(&self) -> Vec<&str> {
        self.spans.iter().map(|span| span.name.as_str()).collect()
    }

    /// Returns every event emitted at `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<&CapturedEvent> {
        self.events
            .iter()
            .filter(|event| event.level == level)
            .collect()
    }
}

/// Runs `body` with a capturing subscriber installed for the current thread.
///
/// # Examples
/// ```
/// use gridlink_test_support::tracing::capture;
///
/// let (value, captured) = capture(|| {
///     tracing::info_span!("demo").in_scope(|| tracing::info!("hello"));
///     7
/// });
/// assert_eq!(value, 7);
/// assert_eq!(captured.span_names(), vec!["demo"]);
/// assert_eq!(captured.events[0].message(), Some("hello"));
/// ```
pub fn capture<R>(body: impl FnOnce() -> R) -> (R, Captured) {
    let layer = CaptureLayer::default();
    let store = Arc::clone(&layer.store);
    let subscriber = tracing_subscriber::registry().with(layer);
    let value = ::tracing::subscriber::with_default(subscriber, body);
    let captured = store
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
    (value, captured)
}

#[derive(Clone, Default)]
struct CaptureLayer {
    store: Arc<Mutex<Captured>>,
}

struct OpenSpan(CapturedSpan);

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut FieldMap(&mut fields));
        span.extensions_mut().insert(OpenSpan(CapturedSpan {
            name: attrs.metadata().name().to_owned(),
            fields,
        }));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
            values.record(&mut FieldMap(&mut open.0.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(OpenSpan(closed)) = span.extensions_mut().remove::<OpenSpan>() else {
            return;
        };
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spans
            .push(closed);
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldMap(&mut fields));
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .push(CapturedEvent {
                level: *event.metadata().level(),
                fields,
            });
    }
}

struct FieldMap<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldMap<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }
}
