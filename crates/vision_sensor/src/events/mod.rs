//! Sensor event queue
//!
//! The sensor never calls out to observers directly. It queues events while
//! it works and the host drains them once per step, handing each one to the
//! handlers it cares about. Handlers return `true` to consume an event and
//! stop it reaching later handlers.

use crate::ecs::Entity;
use crate::error::CollaboratorError;
use crate::geometry::WedgeShape;
use std::collections::VecDeque;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorEventType {
    /// A new configuration was accepted
    ConfigChanged,
    /// A scan cycle replaced the visible set
    ScanCompleted,
    /// A scan cycle was abandoned, visible set unchanged
    ScanSkipped,
    /// An entity entered the visible set
    VisibilityGained,
    /// An entity left the visible set
    VisibilityLost,
}

/// Something the sensor wants observers to know about
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// A new configuration was accepted
    ConfigChanged {
        /// Wedge parameters of the new configuration
        shape: WedgeShape,
        /// Seconds between scan cycles
        scan_interval: f32,
    },
    /// A scan cycle replaced the visible set
    ScanCompleted {
        /// Candidates examined (at most the buffer capacity)
        candidates: usize,
        /// Entities that passed the field-of-view test
        visible: usize,
        /// Index results dropped because the candidate buffer was full
        dropped: usize,
    },
    /// A scan cycle was abandoned
    ScanSkipped {
        /// Collaborator failure that caused it
        reason: CollaboratorError,
    },
    /// An entity entered the visible set
    VisibilityGained(Entity),
    /// An entity left the visible set
    VisibilityLost(Entity),
}

impl SensorEvent {
    /// Type tag of this event
    pub fn event_type(&self) -> SensorEventType {
        match self {
            SensorEvent::ConfigChanged { .. } => SensorEventType::ConfigChanged,
            SensorEvent::ScanCompleted { .. } => SensorEventType::ScanCompleted,
            SensorEvent::ScanSkipped { .. } => SensorEventType::ScanSkipped,
            SensorEvent::VisibilityGained(_) => SensorEventType::VisibilityGained,
            SensorEvent::VisibilityLost(_) => SensorEventType::VisibilityLost,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
pub trait SensorEventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &SensorEvent) -> bool;
}

/// Pending events kept when the host does not drain the queue
pub const MAX_PENDING_EVENTS: usize = 256;

/// Bounded FIFO of pending sensor events
///
/// Once full, sending drops the oldest pending event. Hosts that only poll
/// the visible set never drain, so the queue must not grow with uptime.
#[derive(Debug, Clone)]
pub struct EventQueue {
    pending: VecDeque<SensorEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    /// Create an empty queue holding at most [`MAX_PENDING_EVENTS`]
    pub fn new() -> Self {
        Self::with_capacity(MAX_PENDING_EVENTS)
    }

    /// Create an empty queue with a custom bound (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Queue an event, evicting the oldest one if the queue is full
    pub fn send(&mut self, event: SensorEvent) {
        if self.pending.len() >= self.capacity {
            self.pending.pop_front();
            self.dropped += 1;
            if self.dropped == 1 || self.dropped % self.capacity as u64 == 0 {
                log::debug!("Sensor event queue full, {} events dropped so far", self.dropped);
            }
        }
        self.pending.push_back(event);
    }

    /// Take all pending events in the order they were sent
    pub fn drain(&mut self) -> Vec<SensorEvent> {
        self.pending.drain(..).collect()
    }

    /// Pending events without removing them, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &SensorEvent> + '_ {
        self.pending.iter()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Maximum number of pending events
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events evicted since creation because nobody drained them
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Drop all pending events
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Deliver each event to the handlers in order
/// Stops forwarding an event at the first handler that consumes it
pub fn dispatch(events: &[SensorEvent], handlers: &mut [&mut dyn SensorEventHandler]) {
    for event in events {
        for handler in handlers.iter_mut() {
            if handler.on_event(event) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestHandler {
        events_received: Vec<SensorEventType>,
        consume: bool,
    }

    impl TestHandler {
        fn new(consume: bool) -> Self {
            Self {
                events_received: Vec::new(),
                consume,
            }
        }
    }

    impl SensorEventHandler for TestHandler {
        fn on_event(&mut self, event: &SensorEvent) -> bool {
            self.events_received.push(event.event_type());
            self.consume
        }
    }

    #[test]
    fn test_drain_preserves_order_and_empties_queue() {
        let mut queue = EventQueue::new();
        queue.send(SensorEvent::VisibilityGained(Entity::new(1)));
        queue.send(SensorEvent::VisibilityLost(Entity::new(2)));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event_type(), SensorEventType::VisibilityGained);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_evicts_oldest() {
        let mut queue = EventQueue::with_capacity(3);
        for id in 0..5 {
            queue.send(SensorEvent::VisibilityGained(Entity::new(id)));
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dropped(), 2);
        assert_eq!(queue.pending().next(), Some(&SensorEvent::VisibilityGained(Entity::new(2))));

        let drained = queue.drain();
        assert_eq!(drained.last(), Some(&SensorEvent::VisibilityGained(Entity::new(4))));
        assert!(queue.is_empty());
        assert_eq!(queue.dropped(), 2);
    }

    #[test]
    fn test_event_consumption() {
        let mut first = TestHandler::new(true);
        let mut second = TestHandler::new(false);

        let events = [SensorEvent::VisibilityGained(Entity::new(3))];
        let mut handlers: [&mut dyn SensorEventHandler; 2] = [&mut first, &mut second];
        dispatch(&events, &mut handlers);

        assert_eq!(first.events_received, vec![SensorEventType::VisibilityGained]);
        assert!(second.events_received.is_empty());
    }

    #[test]
    fn test_unconsumed_events_reach_every_handler() {
        let mut first = TestHandler::new(false);
        let mut second = TestHandler::new(false);

        let events = [
            SensorEvent::VisibilityGained(Entity::new(3)),
            SensorEvent::VisibilityLost(Entity::new(3)),
        ];
        let mut handlers: [&mut dyn SensorEventHandler; 2] = [&mut first, &mut second];
        dispatch(&events, &mut handlers);

        assert_eq!(first.events_received.len(), 2);
        assert_eq!(second.events_received.len(), 2);
    }
}
