use std::cell::RefCell;

use crate::event::{CanvasEvent, EventHandler};

/// A simple event bus for broadcasting canvas events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
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
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: &CanvasEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Counter(Rc<RefCell<usize>>);

    impl EventHandler for Counter {
        fn handle_event(&mut self, _event: &CanvasEvent) {
            *self.0.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_every_handler_receives_event() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(0));
        bus.subscribe(Box::new(Counter(seen.clone())));
        bus.subscribe(Box::new(Counter(seen.clone())));

        bus.emit(&CanvasEvent::Cleared { count: 2 });
        assert_eq!(*seen.borrow(), 2);
    }
}
