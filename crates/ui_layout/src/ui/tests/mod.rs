//! Layout scenarios exercising the element tree end to end

mod element_layout;

use crate::events::{ElementEvent, EventType};
use crate::foundation::math::Vec2;
use crate::ui::{ElementBehaviour, ElementTree, Rect, Size};
use std::cell::RefCell;
use std::rc::Rc;

/// Tree with the display size the scenarios assume
fn tree() -> ElementTree {
    ElementTree::new(Size::new(800.0, 600.0))
}

/// Record every event of the given types, in firing order
fn record(tree: &mut ElementTree, types: &[EventType]) -> Rc<RefCell<Vec<ElementEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for &event_type in types {
        let sink = Rc::clone(&log);
        tree.events_mut().subscribe(event_type, move |e: &ElementEvent| {
            sink.borrow_mut().push(*e);
            false
        });
    }
    log
}

/// Inner rect of fixed size, 10px in from the top-left corner
#[derive(Debug)]
struct FixedInner;

impl ElementBehaviour for FixedInner {
    fn inner_rect(&self, outer: Rect) -> Rect {
        Rect::from_position_size(outer.min + Vec2::new(10.0, 10.0), Size::new(50.0, 50.0))
    }
}
