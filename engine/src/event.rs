//! Engine Events
//!
//! The normalized event stream a device produces. Each event is built
//! fresh inside a native callback and handed to an [`EventSink`] right
//! away; nothing here is retained by the device.

use std::collections::VecDeque;

use glam::IVec2;

use crate::input::{ButtonMask, KeyCode, MouseButton};

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Moved,
    Pressed(MouseButton),
    Released(MouseButton),
    Wheel,
    /// Synthetic, posted right after the second press of a run
    DoubleClick(MouseButton),
    /// Synthetic, posted right after the third press of a run
    TripleClick(MouseButton),
}

/// A mouse event with the cursor position and held buttons at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseEventKind,
    pub position: IVec2,
    /// +1.0 or -1.0 for wheel events, 0.0 otherwise
    pub wheel: f32,
    pub buttons: ButtonMask,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Engine key, [`KeyCode::Unknown`] when the native key is unmapped
    pub key: KeyCode,
    /// Character produced by the key, if any
    pub character: Option<char>,
    pub pressed: bool,
    pub shift: bool,
    pub control: bool,
}

/// Normalized engine event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Mouse(MouseInput),
    Key(KeyInput),
}

impl Event {
    pub fn as_mouse(&self) -> Option<&MouseInput> {
        match self {
            Event::Mouse(mouse) => Some(mouse),
            Event::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyInput> {
        match self {
            Event::Key(key) => Some(key),
            Event::Mouse(_) => None,
        }
    }
}

/// The engine's ingestion point for device events.
///
/// Implementations must keep events in the order they are posted.
pub trait EventSink {
    fn post_event(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn post_event(&mut self, event: Event) {
        self.push(event);
    }
}

impl EventSink for VecDeque<Event> {
    fn post_event(&mut self, event: Event) {
        self.push_back(event);
    }
}

/// FIFO event queue drained by the engine during its update.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Take every pending event in delivery order.
    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventQueue {
    fn post_event(&mut self, event: Event) {
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: KeyCode) -> Event {
        Event::Key(KeyInput {
            key,
            character: None,
            pressed: true,
            shift: false,
            control: false,
        })
    }

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = EventQueue::new();
        queue.post_event(key(KeyCode::KeyA));
        queue.post_event(key(KeyCode::KeyB));
        queue.post_event(key(KeyCode::KeyC));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(key(KeyCode::KeyA)));

        let rest: Vec<_> = queue.drain().collect();
        assert_eq!(rest, vec![key(KeyCode::KeyB), key(KeyCode::KeyC)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_accessors() {
        let mouse = Event::Mouse(MouseInput {
            kind: MouseEventKind::Moved,
            position: IVec2::new(3, 4),
            wheel: 0.0,
            buttons: ButtonMask::empty(),
        });
        assert!(mouse.as_mouse().is_some());
        assert!(mouse.as_key().is_none());
        assert_eq!(key(KeyCode::Space).as_key().map(|k| k.key), Some(KeyCode::Space));
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Event> = Vec::new();
        sink.post_event(key(KeyCode::Escape));
        assert_eq!(sink.len(), 1);
    }
}
