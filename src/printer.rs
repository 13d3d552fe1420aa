//! Message routing for non-fatal conditions.
//!
//! Components never fail on recoverable conditions such as a collapsed prior
//! range or a clipped fraction. They report a [`Message`] through a shared
//! [`Printer`] and carry on. The default printer forwards everything to
//! `tracing`.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A non-fatal condition reported by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// `min_value` and `max_value` were equal, so the parameter was fixed.
    MinMaxSame { name: String },

    /// A fraction fell outside [0, 1] and was clipped.
    ParameterClipped { name: String },
}

impl Message {
    /// Name of the component the message refers to.
    pub fn subject(&self) -> &str {
        match self {
            Message::MinMaxSame { name } | Message::ParameterClipped { name } => name,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::MinMaxSame { name } => write!(
                f,
                "Minimum and maximum values of `{}` are the same, treating it as a constant",
                name
            ),
            Message::ParameterClipped { name } => write!(
                f,
                "Value of `{}` fell outside its prior range and was clipped",
                name
            ),
        }
    }
}

/// Sink for component messages.
pub trait Printer: fmt::Debug + Send + Sync {
    /// Report a message.
    fn message(&self, message: Message);
}

/// Printer that emits every message as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPrinter;

impl Printer for TracingPrinter {
    fn message(&self, message: Message) {
        tracing::warn!(subject = message.subject(), "{}", message);
    }
}

/// Printer that keeps every message in memory.
///
/// Handy for harnesses that want to inspect what a fit reported.
#[derive(Debug, Default)]
pub struct RecordingPrinter {
    messages: Mutex<Vec<Message>>,
}

impl RecordingPrinter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the messages received so far, in arrival order.
    pub fn messages(&self) -> Vec<Message> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Printer for RecordingPrinter {
    fn message(&self, message: Message) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
    }
}

/// Shared handle to the default printer.
pub fn default_printer() -> Arc<dyn Printer> {
    Arc::new(TracingPrinter)
}
