//! Persistence bridge between [`InteractionState`] and non-volatile storage.
//!
//! A record occupies six bytes starting at a base offset:
//!
//! | Offset | Size | Content                                   |
//! |--------|------|-------------------------------------------|
//! | +0     | 1    | validity marker, [`MAGIC_MARKER`]         |
//! | +1     | 1    | selected palette index                    |
//! | +2     | 4    | brightness, little-endian IEEE-754 `f32`  |
//!
//! Any driver implementing [`embedded_storage::Storage`] can back the
//! bridge: EEPROM, a flash page, or an in-memory array in tests.
//!
//! [`InteractionState`]: crate::state::InteractionState

use crate::types::PersistError;
use embedded_storage::Storage;

/// Marker byte identifying a previously written record.
pub const MAGIC_MARKER: u8 = 42;

/// Offset of the marker slot within a record.
pub const MAGIC_OFFSET: u32 = 0;

/// Offset of the selected index slot within a record.
pub const INDEX_OFFSET: u32 = 1;

/// Offset of the brightness slot within a record.
pub const BRIGHTNESS_OFFSET: u32 = 2;

/// Total record size in bytes.
pub const RECORD_LEN: usize = 6;

/// Durable projection of the interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedRecord {
    pub selected_index: u8,
    pub brightness: f32,
}

/// Loads and saves [`PersistedRecord`]s at a fixed location in storage.
pub struct PersistenceBridge<S: Storage> {
    storage: S,
    base_offset: u32,
}

impl<S: Storage> PersistenceBridge<S> {
    /// Creates a bridge with the record at the start of `storage`.
    ///
    /// # Errors
    /// Returns `CapacityTooSmall` if the storage cannot hold a record.
    pub fn new(storage: S) -> Result<Self, PersistError<S::Error>> {
        Self::with_base_offset(storage, 0)
    }

    /// Creates a bridge with the record starting at `base_offset`.
    ///
    /// # Errors
    /// Returns `CapacityTooSmall` if the record would extend past the end of
    /// the storage.
    pub fn with_base_offset(storage: S, base_offset: u32) -> Result<Self, PersistError<S::Error>> {
        let capacity = storage.capacity();
        let end = base_offset.checked_add(RECORD_LEN as u32);

        // Every slot address is computed in u32, so the record must end within u32 range.
        match end {
            Some(end) if end as usize <= capacity => {}
            _ => {
                return Err(PersistError::CapacityTooSmall {
                    required: (base_offset as usize).saturating_add(RECORD_LEN),
                    capacity,
                });
            }
        }

        Ok(Self {
            storage,
            base_offset,
        })
    }

    /// Writes `record`: marker first, then index, then brightness.
    ///
    /// The marker is written unconditionally. The value slots are only
    /// written when their stored bytes differ, to spare EEPROM and flash
    /// wear on the frequent saves a brightness ramp produces.
    ///
    /// # Errors
    /// Returns `Storage` if the driver fails; later slots are not written.
    pub fn save(&mut self, record: &PersistedRecord) -> Result<(), PersistError<S::Error>> {
        self.storage
            .write(self.base_offset + MAGIC_OFFSET, &[MAGIC_MARKER])?;
        self.update(INDEX_OFFSET, &[record.selected_index])?;
        self.update(BRIGHTNESS_OFFSET, &record.brightness.to_le_bytes())?;
        Ok(())
    }

    /// Reads the record back.
    ///
    /// Returns `None` when the marker slot does not hold [`MAGIC_MARKER`] or
    /// the driver fails to read.
    pub fn load(&mut self) -> Option<PersistedRecord> {
        let mut marker = [0u8; 1];
        if self
            .storage
            .read(self.base_offset + MAGIC_OFFSET, &mut marker)
            .is_err()
        {
            warn!("failed to read record marker");
            return None;
        }

        if marker[0] != MAGIC_MARKER {
            return None;
        }

        let mut index = [0u8; 1];
        let mut brightness = [0u8; 4];
        let read = self
            .storage
            .read(self.base_offset + INDEX_OFFSET, &mut index)
            .and_then(|()| {
                self.storage
                    .read(self.base_offset + BRIGHTNESS_OFFSET, &mut brightness)
            });

        if read.is_err() {
            warn!("failed to read record values");
            return None;
        }

        Some(PersistedRecord {
            selected_index: index[0],
            brightness: f32::from_le_bytes(brightness),
        })
    }

    /// Returns the byte offset where the record starts.
    pub fn base_offset(&self) -> u32 {
        self.base_offset
    }

    /// Returns a reference to the storage driver.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a mutable reference to the storage driver.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consumes the bridge and returns the storage driver.
    pub fn release(self) -> S {
        self.storage
    }

    fn update(&mut self, offset: u32, bytes: &[u8]) -> Result<(), S::Error> {
        let address = self.base_offset + offset;
        let mut current = [0u8; 4];
        let current = &mut current[..bytes.len()];

        if self.storage.read(address, current).is_ok() && current == bytes {
            return Ok(());
        }

        self.storage.write(address, bytes)
    }
}
