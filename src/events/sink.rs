//! Event sinks.
//!
//! Games and tournaments never print. They hand every [`Event`] to an
//! injected [`EventSink`]; what happens next is up to the caller.

use rustc_hash::FxHashSet;

use super::event::{Event, EventClass};

/// Receiver of game and tournament events.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &Event) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events of one class.
    pub fn of_class(&self, class: EventClass) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.class() == class)
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

macro_rules! log_at {
    ($target:literal, $class:expr, $turn:expr, $event:expr) => {
        match $class {
            EventClass::Error => tracing::error!(target: $target, turn = $turn, class = ?$class, "{}", $event),
            EventClass::Bad | EventClass::Warning => {
                tracing::warn!(target: $target, turn = $turn, class = ?$class, "{}", $event)
            }
            EventClass::Debug => tracing::debug!(target: $target, turn = $turn, class = ?$class, "{}", $event),
            _ => tracing::info!(target: $target, turn = $turn, class = ?$class, "{}", $event),
        }
    };
}

/// Forwards events to `tracing`.
///
/// Game events go to target `ruins::game`, tournament events to
/// `ruins::tournament`. Errors log at `ERROR`, bad news and warnings at
/// `WARN`, debug chatter at `DEBUG` and the rest at `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &Event) {
        let class = event.class();
        let turn = event.turn().unwrap_or(0);
        if event.is_tournament() {
            log_at!("ruins::tournament", class, turn, event);
        } else {
            log_at!("ruins::game", class, turn, event);
        }
    }
}

/// Drops events of the suppressed classes before they reach `inner`.
///
/// ```
/// use ruins::events::{ClassFilter, Event, EventClass, EventSink, RecordingSink};
///
/// let mut sink = ClassFilter::new(RecordingSink::new()).suppress(EventClass::Minor);
/// sink.emit(&Event::TurnBegan { turn: 1 });
/// sink.emit(&Event::GameEnded { turns: 1 });
/// assert_eq!(sink.inner().events().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ClassFilter<S> {
    inner: S,
    suppressed: FxHashSet<EventClass>,
}

impl<S: EventSink> ClassFilter<S> {
    /// Pass everything through to `inner` until told otherwise.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            suppressed: FxHashSet::default(),
        }
    }

    /// Stop forwarding `class`.
    #[must_use]
    pub fn suppress(mut self, class: EventClass) -> Self {
        self.suppressed.insert(class);
        self
    }

    /// Forward only the given classes.
    #[must_use]
    pub fn only(mut self, classes: &[EventClass]) -> Self {
        self.suppressed = EventClass::ALL
            .into_iter()
            .filter(|c| !classes.contains(c))
            .collect();
        self
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for ClassFilter<S> {
    fn emit(&mut self, event: &Event) {
        if !self.suppressed.contains(&event.class()) {
            self.inner.emit(event);
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &Event) {
        (**self).emit(event);
    }
}
