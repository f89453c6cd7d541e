//! Button events and the queue carrying them to the lamp.

use heapless::Deque;

/// A debounced button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Advance to the next palette color.
    ColorPressed,
    /// Step the brightness ramp.
    BrightnessPressed,
}

/// Fixed-capacity FIFO of button events.
///
/// Filled by edge detection (typically an interrupt handler or a polling
/// loop) and drained by [`Lamp::dispatch`](crate::lamp::Lamp::dispatch),
/// which handles events strictly in arrival order.
///
/// # Type Parameters
/// * `N` - Maximum number of pending events
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    events: Deque<ButtonEvent, N>,
}

impl<const N: usize> EventQueue<N> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Appends an event.
    ///
    /// # Errors
    /// Returns the event back if the queue is full; it is not recorded.
    pub fn push(&mut self, event: ButtonEvent) -> Result<(), ButtonEvent> {
        self.events.push_back(event).inspect_err(|_| {
            warn!("event queue full, dropping {}", event);
        })
    }

    /// Removes the oldest event.
    pub fn pop(&mut self) -> Option<ButtonEvent> {
        self.events.pop_front()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns true if another push would be dropped.
    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    /// Discards all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
