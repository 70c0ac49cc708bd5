//! # Quantizer
//!
//! Quantizers are used to force the stepped output of the sequencer onto musical notes.
//!
//! The input is a chromatic note index counted in semitones from the lowest calibrated note. It is split into an
//! octave and a semitone within that octave, and the semitone is rounded UP to the nearest degree of the selected
//! scale. The resulting note index is looked up in the calibration table to find the PWM level which produces that
//! pitch on the real hardware.
//!
//! Quantizing is a pure function of the input, the scale, and the calibration table.

use crate::calibration::{CalibrationTable, MAX_NOTE_INDEX};

/// The scales available to the quantizer are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Major,
    Minor,
    Phrygian,
}

impl Scale {
    /// Every scale, in the order the scale button cycles through them
    pub const ALL: [Scale; 3] = [Scale::Major, Scale::Minor, Scale::Phrygian];

    /// `scale.degrees()` is the ascending list of notes allowed in the scale, relative to C
    pub fn degrees(&self) -> &'static [Note] {
        match self {
            Scale::Major => &MAJOR_DEGREES,
            Scale::Minor => &MINOR_DEGREES,
            Scale::Phrygian => &PHRYGIAN_DEGREES,
        }
    }

    /// `scale.fallback()` is the degree used when no degree is at or above the input semitone
    pub fn fallback(&self) -> Note {
        // every scale has at least one degree
        self.degrees()[self.degrees().len() - 1]
    }

    /// `scale.next()` is the scale after this one, wrapping around to the first
    pub fn next(&self) -> Self {
        match self {
            Scale::Major => Scale::Minor,
            Scale::Minor => Scale::Phrygian,
            Scale::Phrygian => Scale::Major,
        }
    }

    /// `scale.name()` is the human readable name of the scale
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Phrygian => "phrygian",
        }
    }

    /// `scale.note_index(n)` is chromatic note index `n` rounded up to the nearest degree of the scale
    ///
    /// The result is clamped to the highest calibrated note.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mod1_turing::quantizer::Scale;
    /// // C# is not in C major, so it rounds up to D
    /// assert_eq!(Scale::Major.note_index(1), 2);
    ///
    /// // but it is in phrygian
    /// assert_eq!(Scale::Phrygian.note_index(13), 13);
    /// ```
    pub fn note_index(&self, raw: u16) -> usize {
        let octave = (raw / NOTES_PER_OCTAVE) as usize;
        let semitone = (raw % NOTES_PER_OCTAVE) as u8;

        let degree = self
            .degrees()
            .iter()
            .copied()
            .find(|&d| semitone <= u8::from(d))
            .unwrap_or_else(|| self.fallback());

        (octave * NOTES_PER_OCTAVE as usize + u8::from(degree) as usize).min(MAX_NOTE_INDEX)
    }

    /// `scale.quantize(n, t)` is the calibrated output level for chromatic note index `n` quantized to the scale
    pub fn quantize(&self, raw: u16, table: &CalibrationTable) -> u8 {
        table.get(self.note_index(raw))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Major
    }
}

/// `quantize(n, s, t)` is the calibrated output level for chromatic note index `n` quantized to scale `s`
pub fn quantize(raw: u16, scale: Scale, table: &CalibrationTable) -> u8 {
    scale.quantize(raw, table)
}

/// Note names are represented here, scales are built out of lists of notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note(u8);

impl Note {
    pub const C: Self = Self::new(0);
    pub const CSHARP: Self = Self::new(1);
    pub const D: Self = Self::new(2);
    pub const DSHARP: Self = Self::new(3);
    pub const E: Self = Self::new(4);
    pub const F: Self = Self::new(5);
    pub const FSHARP: Self = Self::new(6);
    pub const G: Self = Self::new(7);
    pub const GSHARP: Self = Self::new(8);
    pub const A: Self = Self::new(9);
    pub const ASHARP: Self = Self::new(10);
    pub const B: Self = Self::new(11);

    /// `Note::new(n)` is a new note from `n` clamped to `[0..11]`
    pub const fn new(n: u8) -> Self {
        Self(if n <= 11 { n } else { 11 })
    }

    /// `note.name()` is the name of the note, using sharps
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }
}

impl From<u8> for Note {
    fn from(n: u8) -> Self {
        Self::new(n)
    }
}

impl From<Note> for u8 {
    fn from(n: Note) -> Self {
        n.0
    }
}

pub const NOTES_PER_OCTAVE: u16 = 12;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const MAJOR_DEGREES: [Note; 7] = [
    Note::C,
    Note::D,
    Note::E,
    Note::F,
    Note::G,
    Note::A,
    Note::B,
];

const MINOR_DEGREES: [Note; 7] = [
    Note::C,
    Note::D,
    Note::DSHARP,
    Note::F,
    Note::G,
    Note::GSHARP,
    Note::ASHARP,
];

const PHRYGIAN_DEGREES: [Note; 7] = [
    Note::C,
    Note::CSHARP,
    Note::DSHARP,
    Note::F,
    Note::G,
    Note::GSHARP,
    Note::ASHARP,
];
