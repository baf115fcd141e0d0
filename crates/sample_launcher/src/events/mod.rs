//! UI event bus
//!
//! The launcher publishes everything the host UI must react to as events:
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queued delivery: events wait until the host calls `dispatch`

use std::collections::HashMap;

use crate::launcher::LauncherView;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventType {
    /// The active filter changed; visible rows must be recomputed
    FilterApplied,
    /// A transient message should be shown
    ToastPosted,
    /// The launcher switched between the sample list and the permission view
    ViewChanged,
    /// A command line was sent; the host should start the native activity
    LaunchRequested,
}

/// Variant for type-safe event arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEventArg {
    /// Message text
    Message(String),
    /// Tag set
    Tags(Vec<String>),
    /// Visible view
    View(LauncherView),
    /// Forwarded command line
    Arguments(Vec<String>),
    /// Request landscape orientation before launching
    Landscape(bool),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct UiEvent {
    /// Type of event
    pub event_type: UiEventType,
    /// Position in the stream of events sent by one bus
    pub sequence: u64,
    args: HashMap<&'static str, UiEventArg>,
}

impl UiEvent {
    /// Create a new event of the given type
    pub fn new(event_type: UiEventType) -> Self {
        Self {
            event_type,
            sequence: 0,
            args: HashMap::new(),
        }
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: UiEventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&UiEventArg> {
        self.args.get(key)
    }

    /// Get message argument if present
    pub fn get_message(&self) -> Option<&str> {
        if let Some(UiEventArg::Message(message)) = self.get_arg("message") {
            Some(message)
        } else {
            None
        }
    }

    /// Get tags argument if present
    pub fn get_tags(&self) -> Option<&[String]> {
        if let Some(UiEventArg::Tags(tags)) = self.get_arg("tags") {
            Some(tags)
        } else {
            None
        }
    }

    /// Get view argument if present
    pub fn get_view(&self) -> Option<LauncherView> {
        if let Some(UiEventArg::View(view)) = self.get_arg("view") {
            Some(*view)
        } else {
            None
        }
    }

    /// Get arguments argument if present
    pub fn get_arguments(&self) -> Option<&[String]> {
        if let Some(UiEventArg::Arguments(args)) = self.get_arg("arguments") {
            Some(args)
        } else {
            None
        }
    }

    /// Whether landscape orientation was requested
    pub fn wants_landscape(&self) -> bool {
        matches!(self.get_arg("landscape"), Some(UiEventArg::Landscape(true)))
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
pub trait UiEventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &UiEvent) -> bool;
}

/// Event system with registration and queuing
pub struct UiEventSystem {
    queue: Vec<UiEvent>,
    handlers: HashMap<UiEventType, Vec<Box<dyn UiEventHandler>>>,
    next_sequence: u64,
}

impl UiEventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            handlers: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Register a handler for a specific event type
    pub fn register_handler(&mut self, event_type: UiEventType, handler: Box<dyn UiEventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, mut event: UiEvent) {
        event.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(event);
    }

    /// Events waiting for dispatch, oldest first
    pub fn pending(&self) -> &[UiEvent] {
        &self.queue
    }

    /// Deliver all queued events in order
    pub fn dispatch(&mut self) {
        let queued = std::mem::take(&mut self.queue);
        for event in queued {
            self.dispatch_event(&event);
        }
    }

    /// Remove and return queued events without delivering them
    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Dispatch single event to registered handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &UiEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }
}

impl Default for UiEventSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestHandler {
        received: Rc<RefCell<Vec<u64>>>,
        consume: bool,
    }

    impl UiEventHandler for TestHandler {
        fn on_event(&mut self, event: &UiEvent) -> bool {
            self.received.borrow_mut().push(event.sequence);
            self.consume
        }
    }

    #[test]
    fn test_dispatch_in_order() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let mut system = UiEventSystem::new();
        system.register_handler(
            UiEventType::ToastPosted,
            Box::new(TestHandler { received: Rc::clone(&received), consume: false }),
        );

        system.send(UiEvent::new(UiEventType::ToastPosted));
        system.send(UiEvent::new(UiEventType::FilterApplied));
        system.send(UiEvent::new(UiEventType::ToastPosted));
        assert_eq!(system.pending().len(), 3);

        system.dispatch();
        assert_eq!(*received.borrow(), [0, 2]);
        assert!(system.pending().is_empty());
    }

    #[test]
    fn test_consumed_event_stops_forwarding() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let mut system = UiEventSystem::new();
        system.register_handler(
            UiEventType::FilterApplied,
            Box::new(TestHandler { received: Rc::clone(&first), consume: true }),
        );
        system.register_handler(
            UiEventType::FilterApplied,
            Box::new(TestHandler { received: Rc::clone(&second), consume: false }),
        );

        system.send(UiEvent::new(UiEventType::FilterApplied));
        system.dispatch();

        assert_eq!(first.borrow().len(), 1);
        assert!(second.borrow().is_empty());
    }

    #[test]
    fn test_typed_arguments() {
        let event = UiEvent::new(UiEventType::LaunchRequested)
            .with_arg("arguments", UiEventArg::Arguments(vec!["sample".into(), "a".into()]))
            .with_arg("landscape", UiEventArg::Landscape(true));

        assert_eq!(event.get_arguments().unwrap(), ["sample", "a"]);
        assert!(event.wants_landscape());
        assert!(event.get_message().is_none());
        assert!(event.get_view().is_none());
    }

    #[test]
    fn test_drain_skips_handlers() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let mut system = UiEventSystem::new();
        system.register_handler(
            UiEventType::ViewChanged,
            Box::new(TestHandler { received: Rc::clone(&received), consume: false }),
        );
        system.send(UiEvent::new(UiEventType::ViewChanged).with_arg("view", UiEventArg::View(LauncherView::Samples)));

        let drained = system.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].get_view(), Some(LauncherView::Samples));
        assert!(received.borrow().is_empty());
    }
}
