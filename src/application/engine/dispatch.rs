//! Fixed mapping from event kind to handler.
//!
//! The table is assembled once through [`HandlerTableBuilder`] and cannot be
//! changed afterwards. Resolving a kind with no registered handler is not an
//! error: it yields [`Resolved::Fallback`] and the engine decides what that
//! means.

use std::collections::HashMap;

use crate::domain::EventKind;
use crate::port::EventHandler;

/// Outcome of looking up a kind.
pub enum Resolved<'a> {
    Handler(&'a mut dyn EventHandler),
    Fallback,
}

/// Static event-kind → handler table.
pub struct HandlerTable {
    handlers: HashMap<EventKind, Box<dyn EventHandler>>,
}

impl HandlerTable {
    #[must_use]
    pub fn builder() -> HandlerTableBuilder {
        HandlerTableBuilder::default()
    }

    /// Find the handler for `kind`.
    pub fn resolve(&mut self, kind: EventKind) -> Resolved<'_> {
        match self.handlers.get_mut(&kind) {
            Some(handler) => Resolved::Handler(handler.as_mut()),
            None => Resolved::Fallback,
        }
    }

    /// Kinds with a registered handler, in pipeline order.
    #[must_use]
    pub fn registered(&self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| self.handlers.contains_key(kind))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Builder for [`HandlerTable`].
#[derive(Default)]
pub struct HandlerTableBuilder {
    handlers: HashMap<EventKind, Box<dyn EventHandler>>,
}

impl HandlerTableBuilder {
    /// Register `handler` for `kind`.
    ///
    /// Registering a kind twice keeps the last handler.
    #[must_use]
    pub fn on(mut self, kind: EventKind, handler: impl EventHandler + 'static) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    #[must_use]
    pub fn build(self) -> HandlerTable {
        HandlerTable {
            handlers: self.handlers,
        }
    }
}
