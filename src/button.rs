//! Button debouncing.
//!
//! The lamp has two active-low push buttons. Each has its own lockout: a
//! press is accepted on the first low reading after the button was released,
//! provided the button's debounce duration has passed since its previous
//! accepted press. Contact bounce inside that window is ignored.

use crate::event::{ButtonEvent, EventQueue};
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Lockout after a color button press, in milliseconds.
pub const COLOR_DEBOUNCE_MS: u64 = 50;

/// Lockout after a brightness button press, in milliseconds.
pub const BRIGHTNESS_DEBOUNCE_MS: u64 = 2;

/// The two physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Color,
    Brightness,
}

impl Button {
    /// Debounce lockout tuned to the button's switch.
    pub const fn debounce_ms(self) -> u64 {
        match self {
            Button::Color => COLOR_DEBOUNCE_MS,
            Button::Brightness => BRIGHTNESS_DEBOUNCE_MS,
        }
    }

    /// The event a press of this button produces.
    pub const fn event(self) -> ButtonEvent {
        match self {
            Button::Color => ButtonEvent::ColorPressed,
            Button::Brightness => ButtonEvent::BrightnessPressed,
        }
    }
}

/// Debouncer for a single button.
pub struct ButtonDebouncer<I: TimeInstant> {
    button: Button,
    pressed: bool,
    last_press: Option<I>,
    debounce: I::Duration,
}

impl<I: TimeInstant> ButtonDebouncer<I> {
    /// Creates a debouncer using the button's own lockout.
    pub fn new(button: Button) -> Self {
        Self::with_debounce(button, I::Duration::from_millis(button.debounce_ms()))
    }

    /// Creates a debouncer with a custom lockout.
    pub fn with_debounce(button: Button, debounce: I::Duration) -> Self {
        Self {
            button,
            pressed: false,
            last_press: None,
            debounce,
        }
    }

    /// Feeds the current pin level and returns an event on an accepted press.
    ///
    /// # Arguments
    /// * `is_low` - True while the button is held (active low)
    /// * `now` - Time of the reading
    pub fn check_press(&mut self, is_low: bool, now: I) -> Option<ButtonEvent> {
        if is_low && !self.pressed {
            let settled = match self.last_press {
                None => true,
                Some(last) => now.duration_since(last).as_millis() >= self.debounce.as_millis(),
            };

            if settled {
                self.pressed = true;
                self.last_press = Some(now);
                return Some(self.button.event());
            }
        } else if !is_low && self.pressed {
            self.pressed = false;
        }

        None
    }

    /// Returns which button this debouncer watches.
    pub fn button(&self) -> Button {
        self.button
    }

    /// Returns true while a held press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Both lamp buttons, polled together.
pub struct ButtonPanel<I: TimeInstant> {
    color: ButtonDebouncer<I>,
    brightness: ButtonDebouncer<I>,
}

impl<I: TimeInstant> ButtonPanel<I> {
    /// Creates a panel with the default lockouts.
    pub fn new() -> Self {
        Self {
            color: ButtonDebouncer::new(Button::Color),
            brightness: ButtonDebouncer::new(Button::Brightness),
        }
    }

    /// Samples both pins and queues any accepted presses.
    ///
    /// The color button is checked before the brightness button. Presses
    /// that do not fit in `queue` are dropped.
    ///
    /// Returns the number of events queued.
    pub fn poll<T: TimeSource<I>, const N: usize>(
        &mut self,
        color_is_low: bool,
        brightness_is_low: bool,
        time_source: &T,
        queue: &mut EventQueue<N>,
    ) -> usize {
        let now = time_source.now();
        let mut queued = 0;

        for event in [
            self.color.check_press(color_is_low, now),
            self.brightness.check_press(brightness_is_low, now),
        ]
        .into_iter()
        .flatten()
        {
            if queue.push(event).is_ok() {
                queued += 1;
            }
        }

        queued
    }
}

impl<I: TimeInstant> Default for ButtonPanel<I> {
    fn default() -> Self {
        Self::new()
    }
}
