use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::event::{EventHandler, StudioEvent};

/// Broadcasts studio events to the registered feedback handlers.
///
/// Events emitted while a dispatch is already running are queued and
/// delivered once the current one finishes, in emission order.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
    queue: RefCell<VecDeque<StudioEvent>>,
    dispatching: Cell<bool>,
}

// Handlers are bound to one owner; a clone starts without any.
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handler_count()))
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.try_borrow().map_or(0, |handlers| handlers.len())
    }

    pub fn emit(&self, event: StudioEvent) {
        log::debug!("event: {:?}", event);
        self.queue.borrow_mut().push_back(event);
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            for handler in self.handlers.borrow_mut().iter_mut() {
                handler.handle_event(&event);
            }
        }
        self.dispatching.set(false);
    }
}
