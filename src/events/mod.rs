//! Events and the sinks that receive them.

pub mod event;
pub mod sink;

pub use event::{Actor, Event, EventClass};
pub use sink::{ClassFilter, EventSink, NullSink, RecordingSink, TracingSink};
