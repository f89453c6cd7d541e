//! Fixed color palette and brightness scaling.
//!
//! Colors are 8-bit `palette::Srgb<u8>` values, matching the width of the
//! raw output the lamp drives. A [`Palette`] is an ordered, compile-time set
//! of colors; the order defines the cycle the color button steps through.

use palette::Srgb;

/// An 8-bit RGB color as sent to the output stage.
pub type Color = Srgb<u8>;

pub const RED: Color = Srgb::new(255, 0, 0);
pub const GREEN: Color = Srgb::new(0, 255, 0);
pub const BLUE: Color = Srgb::new(0, 0, 255);
pub const MAGENTA: Color = Srgb::new(255, 0, 255);
pub const CYAN: Color = Srgb::new(0, 255, 255);
pub const YELLOW: Color = Srgb::new(255, 255, 0);
pub const WHITE: Color = Srgb::new(255, 255, 255);
pub const BLACK: Color = Srgb::new(0, 0, 0);

/// Number of entries in [`DEFAULT_PALETTE`].
pub const DEFAULT_PALETTE_LEN: usize = 7;

/// The palette shipped on the lamp, in button cycle order.
pub const DEFAULT_PALETTE: Palette<DEFAULT_PALETTE_LEN> =
    Palette::new([RED, GREEN, BLUE, MAGENTA, CYAN, YELLOW, WHITE]);

/// Added before flooring so channel scaling rounds half up.
pub const ROUNDING_OFFSET: f32 = 0.5;

/// An ordered, fixed set of selectable colors.
///
/// # Type Parameters
/// * `N` - Number of colors. Must be between 1 and 255 so any index fits in
///   the one-byte persisted slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<const N: usize> {
    colors: [Color; N],
}

impl<const N: usize> Palette<N> {
    /// Creates a palette from colors in cycle order.
    pub const fn new(colors: [Color; N]) -> Self {
        const {
            assert!(N > 0, "palette must hold at least one color");
            assert!(N <= u8::MAX as usize, "palette index must fit in one byte");
        }
        Self { colors }
    }

    /// Returns the color at `index`.
    ///
    /// The caller reduces `index` modulo [`Palette::len`] first.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index]
    }

    /// Number of colors, as the one-byte index type.
    #[inline]
    pub const fn len(&self) -> u8 {
        N as u8
    }

    /// Always false: a palette holds at least one color.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the colors in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }
}

impl Default for Palette<DEFAULT_PALETTE_LEN> {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

/// Scales one 8-bit channel by `brightness`, rounding half up.
///
/// No clamp is applied to `brightness`; the float-to-`u8` conversion
/// saturates, so a transient overshoot past 1.0 yields 255 and a value
/// below zero yields 0.
#[inline]
pub fn scale_channel(channel: u8, brightness: f32) -> u8 {
    libm::floorf(f32::from(channel) * brightness + ROUNDING_OFFSET) as u8
}

/// Scales every channel of `color` by `brightness`.
#[inline]
pub fn scale_color(color: Color, brightness: f32) -> Color {
    Srgb::new(
        scale_channel(color.red, brightness),
        scale_channel(color.green, brightness),
        scale_channel(color.blue, brightness),
    )
}
