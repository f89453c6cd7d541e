#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Palette`**: Fixed, ordered set of colors the color button cycles through
//! - **`InteractionState`**: Selected index, brightness and ramp direction
//! - **`Lamp`**: Runs the color-advance and brightness-ramp transitions and drives the LED
//! - **`RgbLed`**: Trait to implement for your LED hardware
//! - **`PersistenceBridge`**: Saves and restores state through any `embedded_storage::Storage`
//! - **`ButtonPanel`** / **`EventQueue`**: Debounced button presses delivered in arrival order
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Output colors are `Srgb<u8>`: palette entries scaled by brightness with
//! round-half-up, ready for PWM duty cycles or a serial LED.

mod fmt;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod colors;
pub mod config;
pub mod event;
pub mod lamp;
pub mod state;
pub mod storage;
pub mod time;
pub mod types;

pub use button::{Button, ButtonDebouncer, ButtonPanel};
pub use colors::{Color, DEFAULT_PALETTE, Palette, scale_color};
pub use colors::{BLACK, BLUE, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW};
pub use config::{LampConfig, LampConfigBuilder, RampConfig, SavePolicy};
pub use event::{ButtonEvent, EventQueue};
pub use lamp::{Lamp, RgbLed};
pub use state::InteractionState;
pub use storage::{MAGIC_MARKER, PersistedRecord, PersistenceBridge};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ConfigError, PersistError, RampDirection};

/// A lamp using the shipped seven-color palette.
pub type DefaultLamp<L, S> = Lamp<L, S, { colors::DEFAULT_PALETTE_LEN }>;
