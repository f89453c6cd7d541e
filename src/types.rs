//! Core types shared across the lamp state machine.

/// Direction of the brightness ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampDirection {
    /// Each brightness tick adds one step.
    Increasing,

    /// Each brightness tick subtracts one step.
    #[default]
    Decreasing,
}

impl RampDirection {
    /// Returns true when the ramp is climbing.
    #[inline]
    pub fn is_increasing(self) -> bool {
        self == RampDirection::Increasing
    }
}

/// Ramp configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Brightness step is zero or negative.
    NonPositiveStep,

    /// Minimum brightness threshold is not below the maximum.
    InvalidRange,

    /// A threshold or step is NaN or infinite.
    NonFiniteValue,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NonPositiveStep => {
                write!(f, "brightness step must be greater than zero")
            }
            ConfigError::InvalidRange => {
                write!(f, "minimum brightness must be below maximum brightness")
            }
            ConfigError::NonFiniteValue => {
                write!(f, "brightness thresholds and step must be finite")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Errors raised by the persistence bridge.
///
/// `E` is the error type of the underlying storage driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError<E> {
    /// The storage driver reported a failure.
    Storage(E),

    /// The storage is too small to hold a record at the configured offset.
    CapacityTooSmall {
        /// Bytes needed, including the base offset.
        required: usize,
        /// Bytes the storage reports.
        capacity: usize,
    },
}

impl<E: core::fmt::Debug> core::fmt::Display for PersistError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PersistError::Storage(err) => {
                write!(f, "storage error: {:?}", err)
            }
            PersistError::CapacityTooSmall { required, capacity } => {
                write!(
                    f,
                    "storage capacity of {} bytes cannot hold a record ending at byte {}",
                    capacity, required
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for PersistError<E> {}

impl<E> From<E> for PersistError<E> {
    fn from(err: E) -> Self {
        PersistError::Storage(err)
    }
}
