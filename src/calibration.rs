//! # Calibration
//!
//! The quantized output is produced by a PWM pin followed by a filter and an opamp, and the resulting voltage is not
//! a perfectly straight line. Instead of computing duty cycles, each semitone the module can play is looked up in a
//! table of measured PWM levels. The table spans three octaves plus one note, from the lowest C to the C three
//! octaves above it.
//!
//! The table is kept in non-volatile storage (EEPROM on the original hardware) as a small tagged record:
//!
//! ```text
//! | 'C' | 'V' | 'T' | '1' | level 0 | level 1 | ... | level 36 |
//! ```
//!
//! If the tag doesn't match, the stored bytes are ignored and the factory table is used instead. The module always
//! produces a plausible output, even with a blank or corrupt EEPROM.

use crate::quantizer::{Note, NOTES_PER_OCTAVE};

/// The number of calibrated notes, three octaves plus the top C
pub const NUM_NOTES: usize = 37;

/// The index of the highest calibrated note
pub const MAX_NOTE_INDEX: usize = NUM_NOTES - 1;

/// The tag written in front of the persisted table
pub const SIGNATURE: [u8; 4] = *b"CVT1";

/// The size of the persisted record in bytes
pub const BLOB_LEN: usize = SIGNATURE.len() + NUM_NOTES;

/// Measured PWM levels for the reference hardware, C to B over three octaves plus the top C
pub const FACTORY_LEVELS: [u8; NUM_NOTES] = [
    0, 11, 15, 19, 23, 27, 31, 35, 40, 44, 48, 53, // octave 1
    57, 61, 65, 69, 73, 77, 82, 86, 90, 94, 99, 103, // octave 2
    107, 112, 116, 120, 124, 128, 132, 137, 141, 145, 149, 153, // octave 3
    157, // top C
];

/// A table of calibrated PWM levels, one per semitone, is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationTable([u8; NUM_NOTES]);

impl CalibrationTable {
    /// `CalibrationTable::factory()` is a new table holding the factory default levels
    pub const fn factory() -> Self {
        Self(FACTORY_LEVELS)
    }

    /// `CalibrationTable::from_levels(ls)` is a new table holding levels `ls`
    pub const fn from_levels(levels: [u8; NUM_NOTES]) -> Self {
        Self(levels)
    }

    /// `table.get(i)` is the level for note index `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than `MAX_NOTE_INDEX`, note indices come from clamped musical math so this is a bug
    pub fn get(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// `table.set(i, l)` sets the level for note index `i` to `l`
    ///
    /// # Panics
    ///
    /// Panics if `i` is greater than `MAX_NOTE_INDEX`
    pub fn set(&mut self, index: usize, level: u8) {
        self.0[index] = level;
    }

    /// `table.levels()` is every level in the table, lowest note first
    pub fn levels(&self) -> &[u8; NUM_NOTES] {
        &self.0
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::factory()
    }
}

/// The persisted form of a calibration table is represented here.
pub struct PersistedCalibrationBlob;

impl PersistedCalibrationBlob {
    /// `PersistedCalibrationBlob::encode(t)` is table `t` serialized with its signature
    pub fn encode(table: &CalibrationTable) -> [u8; BLOB_LEN] {
        let mut bytes = [0; BLOB_LEN];
        bytes[..SIGNATURE.len()].copy_from_slice(&SIGNATURE);
        bytes[SIGNATURE.len()..].copy_from_slice(table.levels());
        bytes
    }

    /// `PersistedCalibrationBlob::decode(bs)` is the table stored in `bs`, or `None` if the signature doesn't match
    pub fn decode(bytes: &[u8; BLOB_LEN]) -> Option<CalibrationTable> {
        let (signature, levels) = bytes.split_at(SIGNATURE.len());
        if signature != SIGNATURE {
            return None;
        }

        let mut table = [0; NUM_NOTES];
        table.copy_from_slice(levels);
        Some(CalibrationTable(table))
    }
}

/// Errors from a non-volatile storage device are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("address range {address}..{end} is outside of the {capacity} byte storage")]
    OutOfBounds {
        address: usize,
        end: usize,
        capacity: usize,
    },
    #[error("storage device did not respond")]
    Device,
}

/// Errors from calibration persistence are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    #[error("could not write calibration: {0}")]
    Storage(#[from] StorageError),
}

/// Byte addressable non-volatile storage such as an EEPROM is represented here.
///
/// Writes are expected to be complete when `write` returns.
pub trait Storage {
    /// `s.read(a, buf)` fills `buf` with the bytes starting at address `a`
    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// `s.write(a, data)` writes `data` starting at address `a`
    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), StorageError>;
}

/// An EEPROM image held in RAM is represented here.
///
/// Starts out erased, with every byte `0xFF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStorage<const CAPACITY: usize> {
    bytes: [u8; CAPACITY],
}

impl<const CAPACITY: usize> MemoryStorage<CAPACITY> {
    /// `MemoryStorage::new()` is a new erased storage image
    pub fn new() -> Self {
        Self {
            bytes: [ERASED; CAPACITY],
        }
    }

    /// `ms.bytes()` is the raw contents of the storage
    pub fn bytes(&self) -> &[u8; CAPACITY] {
        &self.bytes
    }

    /// `ms.bytes_mut()` is the raw contents of the storage, for poking at directly
    pub fn bytes_mut(&mut self) -> &mut [u8; CAPACITY] {
        &mut self.bytes
    }

    fn range(&self, address: usize, len: usize) -> Result<core::ops::Range<usize>, StorageError> {
        let end = address.saturating_add(len);
        if CAPACITY < end {
            return Err(StorageError::OutOfBounds {
                address,
                end,
                capacity: CAPACITY,
            });
        }
        Ok(address..end)
    }
}

impl<const CAPACITY: usize> Default for MemoryStorage<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> Storage for MemoryStorage<CAPACITY> {
    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let range = self.range(address, buf.len())?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), StorageError> {
        let range = self.range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}

/// The result of trying to load a persisted calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid table was found and is now active
    Loaded,
    /// Nothing valid was stored, the factory table is now active
    NotFound,
}

/// Human readable details about one calibrated note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDescription {
    pub index: usize,
    pub name: &'static str,
    pub octave: u8,
    pub target_hz: f32,
    pub level: u8,
}

/// The active calibration table together with the storage it is persisted in is represented here.
pub struct Calibration<S: Storage> {
    table: CalibrationTable,
    storage: S,
    address: usize,
}

impl<S: Storage> Calibration<S> {
    /// `Calibration::new(s, a)` is a new calibration using the factory table, persisted to storage `s` at address `a`
    ///
    /// Nothing is read from storage until `load` is called.
    pub fn new(storage: S, address: usize) -> Self {
        Self {
            table: CalibrationTable::factory(),
            storage,
            address,
        }
    }

    /// `cal.load()` replaces the active table with the persisted one, or with the factory table if none is stored
    ///
    /// Never fails, a missing, corrupt, or unreadable record just means factory defaults.
    pub fn load(&mut self) -> LoadOutcome {
        let mut bytes = [0; BLOB_LEN];

        let decoded = match self.storage.read(self.address, &mut bytes) {
            Ok(()) => PersistedCalibrationBlob::decode(&bytes),
            Err(e) => {
                log::warn!("could not read calibration: {}", e);
                None
            }
        };

        match decoded {
            Some(table) => {
                log::info!("calibration loaded from address {}", self.address);
                self.table = table;
                LoadOutcome::Loaded
            }
            None => {
                log::warn!("no calibration found, using factory defaults");
                self.table = CalibrationTable::factory();
                LoadOutcome::NotFound
            }
        }
    }

    /// `cal.save()` writes the signature and the active table to storage
    pub fn save(&mut self) -> Result<(), CalibrationError> {
        let bytes = PersistedCalibrationBlob::encode(&self.table);
        self.storage.write(self.address, &bytes)?;
        log::info!("calibration saved to address {}", self.address);
        Ok(())
    }

    /// `cal.reset_to_factory()` replaces the active table with the factory table, storage is left untouched
    pub fn reset_to_factory(&mut self) {
        log::info!("calibration reset to factory defaults");
        self.table = CalibrationTable::factory();
    }

    /// `cal.get(i)` is the active level for note index `i`, see `CalibrationTable::get`
    pub fn get(&self, index: usize) -> u8 {
        self.table.get(index)
    }

    /// `cal.set(i, l)` sets the active level for note index `i` to `l`, see `CalibrationTable::set`
    pub fn set(&mut self, index: usize, level: u8) {
        self.table.set(index, level)
    }

    /// `cal.table()` is the active table
    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// `cal.storage()` is the storage the table is persisted in
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// `cal.storage_mut()` is the storage the table is persisted in
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// `cal.describe_note(i)` is the name, target frequency, and active level of note index `i`
    pub fn describe_note(&self, index: usize) -> NoteDescription {
        let semitone = (index % NOTES_PER_OCTAVE as usize) as u8;
        let octave = index / NOTES_PER_OCTAVE as usize;

        NoteDescription {
            index,
            name: Note::new(semitone).name(),
            octave: LOWEST_OCTAVE + octave as u8,
            target_hz: target_frequency(index),
            level: self.get(index),
        }
    }
}

/// `target_frequency(i)` is the equal tempered frequency in Hertz of note index `i`
pub fn target_frequency(index: usize) -> f32 {
    let octave = index / NOTES_PER_OCTAVE as usize;
    let semitone = index % NOTES_PER_OCTAVE as usize;

    let mut hz = LOWEST_NOTE_HZ;
    for _ in 0..octave {
        hz *= 2.0_f32;
    }
    for _ in 0..semitone {
        hz *= SEMITONE_RATIO;
    }
    hz
}

/// The frequency of note index zero, a C2
const LOWEST_NOTE_HZ: f32 = 65.406_39_f32;

/// The octave number of note index zero
const LOWEST_OCTAVE: u8 = 2;

/// The twelfth root of two
const SEMITONE_RATIO: f32 = 1.059_463_1_f32;

/// Bytes in a freshly erased EEPROM
const ERASED: u8 = 0xFF;
