//! Lamp configuration: brightness ramp thresholds and save policy.

use crate::types::ConfigError;

/// Brightness below which the ramp turns upward.
pub const MINIMUM_BRIGHTNESS: f32 = 0.02;

/// Brightness at which the ramp turns downward (exact match).
pub const MAXIMUM_BRIGHTNESS: f32 = 1.0;

/// Brightness change per tick.
pub const BRIGHTNESS_STEP: f32 = 0.05;

/// When the lamp writes its state to persistent storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SavePolicy {
    /// Save after every render, including startup and brightness refreshes.
    #[default]
    EveryRender,

    /// Save only when the selected color actually advances.
    ColorChange,

    /// Never restore and never save.
    Disabled,
}

impl SavePolicy {
    /// Whether a render of the given kind should be followed by a save.
    #[inline]
    pub fn saves_on(self, only_refresh: bool) -> bool {
        match self {
            SavePolicy::EveryRender => true,
            SavePolicy::ColorChange => !only_refresh,
            SavePolicy::Disabled => false,
        }
    }

    /// Whether persisted state is read back at startup.
    #[inline]
    pub fn restores(self) -> bool {
        self != SavePolicy::Disabled
    }
}

/// Brightness ramp parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampConfig {
    /// The ramp turns upward once brightness drops below this.
    pub minimum: f32,

    /// The ramp turns downward once brightness equals this exactly.
    pub maximum: f32,

    /// Amount added or subtracted per tick.
    pub step: f32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            minimum: MINIMUM_BRIGHTNESS,
            maximum: MAXIMUM_BRIGHTNESS,
            step: BRIGHTNESS_STEP,
        }
    }
}

/// Complete lamp configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampConfig {
    pub ramp: RampConfig,
    pub save_policy: SavePolicy,
}

impl LampConfig {
    /// Creates a configuration builder seeded with the default values.
    pub fn builder() -> LampConfigBuilder {
        LampConfigBuilder::new()
    }
}

/// Builder for validated lamp configurations.
#[derive(Debug, Clone, Copy)]
pub struct LampConfigBuilder {
    config: LampConfig,
}

impl LampConfigBuilder {
    /// Creates a builder with the default lamp constants.
    pub fn new() -> Self {
        Self {
            config: LampConfig::default(),
        }
    }

    /// Sets the threshold below which the ramp turns upward.
    pub fn minimum_brightness(mut self, minimum: f32) -> Self {
        self.config.ramp.minimum = minimum;
        self
    }

    /// Sets the value at which the ramp turns downward.
    ///
    /// The comparison is exact, so pick a maximum the step sequence lands on.
    pub fn maximum_brightness(mut self, maximum: f32) -> Self {
        self.config.ramp.maximum = maximum;
        self
    }

    /// Sets the per-tick brightness change.
    pub fn brightness_step(mut self, step: f32) -> Self {
        self.config.ramp.step = step;
        self
    }

    /// Sets when state is written to storage.
    pub fn save_policy(mut self, policy: SavePolicy) -> Self {
        self.config.save_policy = policy;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `NonFiniteValue` - A threshold or the step is NaN or infinite
    /// * `NonPositiveStep` - The step is zero or negative
    /// * `InvalidRange` - The minimum is not below the maximum
    pub fn build(self) -> Result<LampConfig, ConfigError> {
        let ramp = self.config.ramp;

        if !(ramp.minimum.is_finite() && ramp.maximum.is_finite() && ramp.step.is_finite()) {
            return Err(ConfigError::NonFiniteValue);
        }

        if ramp.step <= 0.0 {
            return Err(ConfigError::NonPositiveStep);
        }

        if ramp.minimum >= ramp.maximum {
            return Err(ConfigError::InvalidRange);
        }

        Ok(self.config)
    }
}

impl Default for LampConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
