//! # Output stage
//!
//! Converts the sequencer value into the two PWM duty cycles of the module:
//!
//! - The raw CV output is the sequencer byte scaled by the gain control.
//! - The quantized CV output maps the same byte onto the calibrated note range, scales the note index by the gain
//!   control, snaps it to the selected scale and looks the pitch up in the calibration table.
//!
//! Gain is applied to the note index and not to the PWM level, so turning the gain down narrows the pitch range while
//! every output stays in tune.

use crate::{
    calibration::{CalibrationTable, MAX_NOTE_INDEX},
    quantizer::Scale,
    sequencer::ADC_MAX,
};

/// The duty cycles for both outputs are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CvOut {
    /// Duty cycle for the raw CV output
    pub raw: u8,
    /// Duty cycle for the quantized CV output
    pub quantized: u8,
    /// The chromatic note index fed to the quantizer, before snapping to the scale
    pub note_index: u16,
}

/// `scale_by_gain(v, g)` is `v` multiplied by gain control reading `g` in `[0..ADC_MAX]`, truncated
pub fn scale_by_gain(val: u16, gain: u16) -> u16 {
    let gain = gain.min(ADC_MAX) as u32;
    (val as u32 * gain / ADC_MAX as u32) as u16
}

/// `raw_cv(v, g)` is the raw CV duty cycle for sequencer value `v` and gain control reading `g`
pub fn raw_cv(value: u8, gain: u16) -> u8 {
    scale_by_gain(value as u16, gain).min(u8::MAX as u16) as u8
}

/// `note_index(v, g)` is sequencer value `v` mapped onto the chromatic note range and scaled by gain control `g`
pub fn note_index(value: u8, gain: u16) -> u16 {
    let unscaled = value as u16 * MAX_NOTE_INDEX as u16 / u8::MAX as u16;
    scale_by_gain(unscaled, gain).min(MAX_NOTE_INDEX as u16)
}

/// `render(v, g, s, t)` is both output duty cycles for sequencer value `v`, gain control `g`, scale `s` and table `t`
///
/// # Examples
///
/// ```
/// # use mod1_turing::{calibration::CalibrationTable, output, quantizer::Scale};
/// let table = CalibrationTable::factory();
///
/// // full gain, top of the range is the top C
/// let out = output::render(255, 1023, Scale::Major, &table);
/// assert_eq!(out.raw, 255);
/// assert_eq!(out.quantized, 157);
/// ```
pub fn render(value: u8, gain: u16, scale: Scale, table: &CalibrationTable) -> CvOut {
    let note_index = note_index(value, gain);
    CvOut {
        raw: raw_cv(value, gain),
        quantized: scale.quantize(note_index, table),
        note_index,
    }
}
