//! HandlerRegistry - action to handler lookup table

use std::collections::HashMap;

use contracts::{InboundEvent, Resource, TilgangerAction};

use crate::handlers::{GetAllIdentitetHandler, GetAllRettighetHandler};

/// Append-only view of a response event's payload
///
/// Handlers receive this instead of the event so they cannot touch status or
/// correlation identity.
pub struct ResponseData<'a> {
    records: &'a mut Vec<Resource>,
}

impl<'a> ResponseData<'a> {
    pub fn new(records: &'a mut Vec<Resource>) -> Self {
        Self { records }
    }

    /// Append one record
    pub fn add(&mut self, record: Resource) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Produces the payload for one action
pub trait ActionHandler: Send + Sync {
    /// Action served by this handler
    fn action(&self) -> TilgangerAction;

    /// Append the records answering `request`
    fn produce(&self, request: &InboundEvent, data: &mut ResponseData<'_>);
}

/// Lookup table from action to handler
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TilgangerAction, Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the bundled example handlers
    pub fn with_examples() -> Self {
        let mut registry = Self::new();
        registry.register(GetAllIdentitetHandler);
        registry.register(GetAllRettighetHandler);
        registry
    }

    /// Register a handler, returning the one it replaces
    pub fn register<H: ActionHandler + 'static>(
        &mut self,
        handler: H,
    ) -> Option<Box<dyn ActionHandler>> {
        self.handlers.insert(handler.action(), Box::new(handler))
    }

    pub fn get(&self, action: TilgangerAction) -> Option<&dyn ActionHandler> {
        self.handlers.get(&action).map(|h| h.as_ref())
    }

    /// Actions with a registered handler, sorted
    pub fn supported_actions(&self) -> Vec<TilgangerAction> {
        let mut actions: Vec<_> = self.handlers.keys().copied().collect();
        actions.sort();
        actions
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
