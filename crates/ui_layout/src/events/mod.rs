//! Element event system
//! Key principles:
//! - Typed event ids, one per kind of element change
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Immediate, synchronous delivery; nothing is queued

use crate::foundation::collections::ElementId;
use std::collections::HashMap;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Pixel size changed
    Sized,
    /// Screen position of the outer rect changed
    Moved,
    /// Horizontal alignment changed
    HorizontalAlignmentChanged,
    /// Vertical alignment changed
    VerticalAlignmentChanged,
    /// Rotation or pivot changed
    Rotated,
    /// A child was attached
    ChildAdded,
    /// A child was detached
    ChildRemoved,
    /// Children were reordered
    ChildOrderChanged,
    /// Client/non-client setting changed
    NonClientChanged,
    /// Width or height auto-sizing was switched on or off
    IsSizeAdjustedToContentChanged,
}

/// A fired element event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementEvent {
    /// Type of event
    pub event_type: EventType,
    /// Element whose event set fired
    pub source: ElementId,
    /// Element the event is about; the child for `ChildAdded`/`ChildRemoved`,
    /// otherwise the source itself
    pub element: ElementId,
}

impl ElementEvent {
    /// Event about the source element itself
    pub fn new(event_type: EventType, source: ElementId) -> Self {
        Self {
            event_type,
            source,
            element: source,
        }
    }

    /// Event fired by `source` about another element (a child)
    pub fn about(event_type: EventType, source: ElementId, element: ElementId) -> Self {
        Self {
            event_type,
            source,
            element,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &ElementEvent) -> bool;
}

impl<F> EventHandler for F
where
    F: FnMut(&ElementEvent) -> bool,
{
    fn on_event(&mut self, event: &ElementEvent) -> bool {
        self(event)
    }
}

/// Handle returned by subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    /// `None` listens to every element
    element: Option<ElementId>,
    handler: Box<dyn EventHandler>,
}

/// Event system with registration and synchronous delivery
/// Follows chain of responsibility pattern
#[derive(Default)]
pub struct EventSystem {
    handlers: HashMap<EventType, Vec<Subscription>>,
    next_id: u64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event type fired by any element
    pub fn subscribe(&mut self, event_type: EventType, handler: impl EventHandler + 'static) -> SubscriptionId {
        self.register(None, event_type, Box::new(handler))
    }

    /// Register a handler for an event type fired by one element
    pub fn subscribe_element(
        &mut self,
        element: ElementId,
        event_type: EventType,
        handler: impl EventHandler + 'static,
    ) -> SubscriptionId {
        self.register(Some(element), event_type, Box::new(handler))
    }

    fn register(
        &mut self,
        element: Option<ElementId>,
        event_type: EventType,
        handler: Box<dyn EventHandler>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Subscription { id, element, handler });
        id
    }

    /// Remove a subscription; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for subscriptions in self.handlers.values_mut() {
            if let Some(index) = subscriptions.iter().position(|s| s.id == id) {
                subscriptions.remove(index);
                return true;
            }
        }
        false
    }

    /// Drop every subscription bound to `element`
    pub fn remove_element(&mut self, element: ElementId) {
        for subscriptions in self.handlers.values_mut() {
            subscriptions.retain(|s| s.element != Some(element));
        }
    }

    /// Number of subscriptions for an event type
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }

    /// Deliver an event to its handlers in subscription order
    /// Stops on first handler that returns true (consumed); returns whether
    /// any handler consumed it
    pub fn fire(&mut self, event: ElementEvent) -> bool {
        log::trace!("{:?} fired by {:?}", event.event_type, event.source);
        if let Some(subscriptions) = self.handlers.get_mut(&event.event_type) {
            for subscription in subscriptions.iter_mut() {
                if subscription.element.map_or(true, |e| e == event.source)
                    && subscription.handler.on_event(&event)
                {
                    // Event consumed, stop forwarding
                    return true;
                }
            }
        }
        false
    }

    /// Clear all subscriptions
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<EventType, usize> =
            self.handlers.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventSystem").field("handlers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_ids() -> (ElementId, ElementId) {
        let mut map: SlotMap<ElementId, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    #[test]
    fn test_immediate_dispatch() {
        let (a, _) = two_ids();
        let mut system = EventSystem::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        system.subscribe(EventType::Sized, move |e: &ElementEvent| {
            sink.borrow_mut().push(*e);
            false
        });

        let handled = system.fire(ElementEvent::new(EventType::Sized, a));

        assert!(!handled);
        assert_eq!(*received.borrow(), vec![ElementEvent::new(EventType::Sized, a)]);
    }

    #[test]
    fn test_element_filter() {
        let (a, b) = two_ids();
        let mut system = EventSystem::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        system.subscribe_element(a, EventType::Moved, move |_: &ElementEvent| {
            *sink.borrow_mut() += 1;
            false
        });

        system.fire(ElementEvent::new(EventType::Moved, b));
        system.fire(ElementEvent::new(EventType::Moved, a));
        system.fire(ElementEvent::new(EventType::Sized, a));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_event_consumption() {
        let (a, _) = two_ids();
        let mut system = EventSystem::new();
        let second_called = Rc::new(RefCell::new(false));
        let sink = Rc::clone(&second_called);

        // First handler consumes
        system.subscribe(EventType::ChildAdded, |_: &ElementEvent| true);
        // Second handler should not receive
        system.subscribe(EventType::ChildAdded, move |_: &ElementEvent| {
            *sink.borrow_mut() = true;
            false
        });

        assert!(system.fire(ElementEvent::new(EventType::ChildAdded, a)));
        assert!(!*second_called.borrow());
        assert_eq!(system.handler_count(EventType::ChildAdded), 2);
    }

    #[test]
    fn test_unsubscribe_and_remove_element() {
        let (a, b) = two_ids();
        let mut system = EventSystem::new();
        let any = system.subscribe(EventType::Rotated, |_: &ElementEvent| false);
        system.subscribe_element(a, EventType::Rotated, |_: &ElementEvent| false);
        system.subscribe_element(b, EventType::Rotated, |_: &ElementEvent| false);

        assert!(system.unsubscribe(any));
        assert!(!system.unsubscribe(any));
        system.remove_element(a);
        assert_eq!(system.handler_count(EventType::Rotated), 1);
    }
}
