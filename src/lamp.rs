//! Lamp controller tying state, palette, output and persistence together.
//!
//! Provides [`Lamp`], which owns the LED output and the persistence bridge
//! and runs the two button-driven transitions to completion. Also defines
//! the [`RgbLed`] trait for hardware abstraction.

use crate::colors::{Color, Palette};
use crate::config::LampConfig;
use crate::event::{ButtonEvent, EventQueue};
use crate::state::InteractionState;
use crate::storage::PersistenceBridge;
use embedded_storage::Storage;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your output stage (three PWM channels, a single
/// serial LED, etc.) to allow the lamp to drive it.
pub trait RgbLed {
    /// Sets the LED to the specified 8-bit color.
    ///
    /// Handle any hardware errors internally - this method cannot fail.
    fn set_color(&mut self, color: Color);
}

/// Two-button RGB lamp.
///
/// Owns the LED and the storage bridge. Every transition recomputes the
/// output color from the palette, hands it to the LED and, depending on the
/// configured [`SavePolicy`](crate::config::SavePolicy), persists the state.
///
/// # Type Parameters
/// * `L` - LED implementation type
/// * `S` - Storage driver type
/// * `N` - Number of palette colors
pub struct Lamp<L: RgbLed, S: Storage, const N: usize> {
    led: L,
    persistence: PersistenceBridge<S>,
    palette: Palette<N>,
    config: LampConfig,
    state: InteractionState,
    current_color: Color,
}

impl<L: RgbLed, S: Storage, const N: usize> Lamp<L, S, N> {
    /// Restores the last session and shows it.
    ///
    /// Reads the persisted record unless persistence is disabled, falling
    /// back to the first color at full brightness, then performs a
    /// refresh-only render.
    pub fn new(led: L, mut persistence: PersistenceBridge<S>, palette: Palette<N>, config: LampConfig) -> Self {
        let record = if config.save_policy.restores() {
            persistence.load()
        } else {
            None
        };
        let state = InteractionState::restore(record, palette.len());

        debug!(
            "lamp starting at index {} brightness {}",
            state.selected_index(),
            state.brightness()
        );

        let mut lamp = Self {
            led,
            persistence,
            palette,
            config,
            state,
            current_color: crate::colors::BLACK,
        };
        lamp.advance_color(true);
        lamp
    }

    /// Moves to the next palette color, or only re-renders when `only_refresh` is set.
    ///
    /// Returns the color sent to the LED.
    pub fn advance_color(&mut self, only_refresh: bool) -> Color {
        self.state.advance(only_refresh, self.palette.len());

        let color = self.state.output(&self.palette);
        self.led.set_color(color);
        self.current_color = color;

        trace!(
            "render index {} -> ({}, {}, {})",
            self.state.selected_index(),
            color.red,
            color.green,
            color.blue
        );

        if self.config.save_policy.saves_on(only_refresh) {
            self.save();
        }

        color
    }

    /// Steps the brightness ramp and re-renders the current color.
    ///
    /// Returns the color sent to the LED.
    pub fn adjust_brightness(&mut self) -> Color {
        self.state.step_brightness(&self.config.ramp);

        trace!(
            "brightness {} ({})",
            self.state.brightness(),
            self.state.ramp_direction()
        );

        self.advance_color(true)
    }

    /// Runs the transition bound to a button event.
    pub fn handle_event(&mut self, event: ButtonEvent) -> Color {
        match event {
            ButtonEvent::ColorPressed => self.advance_color(false),
            ButtonEvent::BrightnessPressed => self.adjust_brightness(),
        }
    }

    /// Handles every queued event in arrival order.
    ///
    /// Returns the number of events handled.
    pub fn dispatch<const Q: usize>(&mut self, queue: &mut EventQueue<Q>) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.pop() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Returns the current session state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Returns the color last sent to the LED.
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// Returns the palette.
    pub fn palette(&self) -> &Palette<N> {
        &self.palette
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LampConfig {
        &self.config
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns a reference to the persistence bridge.
    pub fn persistence(&self) -> &PersistenceBridge<S> {
        &self.persistence
    }

    /// Consumes the lamp and returns the LED and the persistence bridge.
    pub fn into_parts(self) -> (L, PersistenceBridge<S>) {
        (self.led, self.persistence)
    }

    fn save(&mut self) {
        if self.persistence.save(&self.state.record()).is_err() {
            warn!("failed to persist lamp state");
        }
    }
}
