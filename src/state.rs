//! Owned interaction state and its two transitions.
//!
//! [`InteractionState`] is the whole session: which palette entry is
//! selected, how bright it is shown, and which way the brightness ramp is
//! heading. The transitions here only mutate the state; rendering and
//! persistence are done by [`crate::lamp::Lamp`].

use crate::colors::{Color, Palette, scale_color};
use crate::config::RampConfig;
use crate::storage::PersistedRecord;
use crate::types::RampDirection;

/// Brightness used when no valid record is restored.
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// Mutable session state of the lamp.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InteractionState {
    selected_index: u8,
    brightness: f32,
    ramp_direction: RampDirection,
}

impl InteractionState {
    /// Creates the default state: first color, full brightness, ramp heading down.
    pub const fn new() -> Self {
        Self {
            selected_index: 0,
            brightness: DEFAULT_BRIGHTNESS,
            ramp_direction: RampDirection::Decreasing,
        }
    }

    /// Rebuilds state from a persisted record.
    ///
    /// An index equal to `palette_len` wraps to the first color and keeps
    /// the stored brightness. Falls back to [`InteractionState::new`] when
    /// there is no record, when the stored index is past `palette_len`, or
    /// when the stored brightness is not finite. The ramp direction is not
    /// persisted and always starts out decreasing.
    pub fn restore(record: Option<PersistedRecord>, palette_len: u8) -> Self {
        match record {
            Some(record)
                if record.selected_index <= palette_len && record.brightness.is_finite() =>
            {
                let selected_index = if record.selected_index == palette_len {
                    0
                } else {
                    record.selected_index
                };

                Self {
                    selected_index,
                    brightness: record.brightness,
                    ramp_direction: RampDirection::Decreasing,
                }
            }
            _ => Self::new(),
        }
    }

    /// Advances to the next palette entry unless `only_refresh` is set.
    ///
    /// Increment and wraparound are two separate checks: the index is only
    /// incremented while below `palette_len`, and it is reset to zero when it
    /// equals `palette_len` afterwards.
    pub fn advance(&mut self, only_refresh: bool, palette_len: u8) {
        if !only_refresh && self.selected_index < palette_len {
            self.selected_index += 1;
        }

        if self.selected_index == palette_len {
            self.selected_index = 0;
        }
    }

    /// Moves brightness one step along the triangle-wave ramp.
    ///
    /// The direction turns upward when brightness is below `ramp.minimum`
    /// and downward when it equals `ramp.maximum`. Brightness itself is not
    /// clamped, so it may end up one step past either threshold.
    #[allow(clippy::float_cmp)]
    pub fn step_brightness(&mut self, ramp: &RampConfig) {
        if self.brightness < ramp.minimum {
            self.ramp_direction = RampDirection::Increasing;
        }

        // Exact comparison: the default constants land on 1.0 exactly.
        if self.brightness == ramp.maximum {
            self.ramp_direction = RampDirection::Decreasing;
        }

        if self.ramp_direction.is_increasing() {
            self.brightness += ramp.step;
        } else {
            self.brightness -= ramp.step;
        }
    }

    /// Computes the output color for the current selection and brightness.
    pub fn output<const N: usize>(&self, palette: &Palette<N>) -> Color {
        let index = usize::from(self.selected_index) % N;
        scale_color(palette.color_at(index), self.brightness)
    }

    /// Projects the durable part of the state.
    pub fn record(&self) -> PersistedRecord {
        PersistedRecord {
            selected_index: self.selected_index,
            brightness: self.brightness,
        }
    }

    /// Returns the selected palette index.
    pub fn selected_index(&self) -> u8 {
        self.selected_index
    }

    /// Returns the current brightness fraction.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Returns the current ramp direction.
    pub fn ramp_direction(&self) -> RampDirection {
        self.ramp_direction
    }

    /// Overrides the selected index without bounds checking.
    ///
    /// Only meant for driving the state into unusual positions, e.g. when
    /// swapping to a shorter palette.
    pub fn set_selected_index(&mut self, index: u8) {
        self.selected_index = index;
    }

    /// Overrides brightness and ramp direction.
    pub fn set_brightness(&mut self, brightness: f32, direction: RampDirection) {
        self.brightness = brightness;
        self.ramp_direction = direction;
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLUE, GREEN, RED};
    use palette::Srgb;

    const RGB_PALETTE: Palette<3> = Palette::new([RED, GREEN, BLUE]);

    #[test]
    fn advance_walks_and_wraps() {
        let mut state = InteractionState::new();

        state.advance(false, 3);
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.output(&RGB_PALETTE), GREEN);

        state.advance(false, 3);
        assert_eq!(state.selected_index(), 2);
        assert_eq!(state.output(&RGB_PALETTE), BLUE);

        state.advance(false, 3);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.output(&RGB_PALETTE), RED);
    }

    #[test]
    fn n_advances_land_on_i_plus_n_mod_len() {
        for start in 0..7u8 {
            for n in 0..20u32 {
                let mut state = InteractionState::new();
                state.set_selected_index(start);
                for _ in 0..n {
                    state.advance(false, 7);
                }
                assert_eq!(u32::from(state.selected_index()), (u32::from(start) + n) % 7);
            }
        }
    }

    #[test]
    fn refresh_keeps_index() {
        let mut state = InteractionState::new();
        state.set_selected_index(2);
        state.advance(true, 3);
        assert_eq!(state.selected_index(), 2);
    }

    #[test]
    fn index_at_length_resets_without_advancing() {
        let mut state = InteractionState::new();
        state.set_selected_index(3);
        state.advance(false, 3);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn index_past_length_is_left_alone() {
        let mut state = InteractionState::new();
        state.set_selected_index(5);
        state.advance(false, 3);
        assert_eq!(state.selected_index(), 5);
        // Rendering reduces modulo the palette length.
        assert_eq!(state.output(&RGB_PALETTE), BLUE);
    }

    #[test]
    fn output_scales_with_brightness() {
        let mut state = InteractionState::new();
        state.set_brightness(0.5, RampDirection::Decreasing);
        assert_eq!(state.output(&RGB_PALETTE), Srgb::new(128, 0, 0));
    }

    #[test]
    fn first_tick_from_full_goes_down() {
        let mut state = InteractionState::new();
        state.step_brightness(&RampConfig::default());
        assert_eq!(state.brightness(), 1.0 - 0.05);
        assert_eq!(state.ramp_direction(), RampDirection::Decreasing);
    }

    #[test]
    fn below_minimum_turns_upward() {
        let mut state = InteractionState::new();
        state.set_brightness(0.01, RampDirection::Decreasing);
        state.step_brightness(&RampConfig::default());
        assert_eq!(state.ramp_direction(), RampDirection::Increasing);
        assert_eq!(state.brightness(), 0.01 + 0.05);
    }

    #[test]
    fn near_maximum_without_exact_match_keeps_climbing() {
        let mut state = InteractionState::new();
        state.set_brightness(0.999, RampDirection::Increasing);
        state.step_brightness(&RampConfig::default());
        assert_eq!(state.ramp_direction(), RampDirection::Increasing);
        assert!(state.brightness() > 1.0);
    }

    #[test]
    fn restore_accepts_valid_record() {
        let record = PersistedRecord {
            selected_index: 4,
            brightness: 0.25,
        };
        let state = InteractionState::restore(Some(record), 7);
        assert_eq!(state.selected_index(), 4);
        assert_eq!(state.brightness(), 0.25);
        assert_eq!(state.ramp_direction(), RampDirection::Decreasing);
        assert_eq!(state.record(), record);
    }

    #[test]
    fn restore_wraps_index_at_length_and_keeps_brightness() {
        let record = PersistedRecord {
            selected_index: 7,
            brightness: 0.3,
        };
        let state = InteractionState::restore(Some(record), 7);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.brightness(), 0.3);
    }

    #[test]
    fn restore_rejects_unusable_records() {
        assert_eq!(InteractionState::restore(None, 7), InteractionState::new());

        let out_of_range = PersistedRecord {
            selected_index: 8,
            brightness: 0.5,
        };
        assert_eq!(
            InteractionState::restore(Some(out_of_range), 7),
            InteractionState::new()
        );

        let nan = PersistedRecord {
            selected_index: 1,
            brightness: f32::NAN,
        };
        assert_eq!(InteractionState::restore(Some(nan), 7), InteractionState::new());
    }
}
