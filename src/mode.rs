//! # Sequencer modes
//!
//! A single knob sweeps the sequencer between locked loops and pure randomness:
//!
//! ```text
//! 0        40           400          630          950       1023
//! | double |  slip low  |   random   | slip high  | locked  |
//! ```
//!
//! In the slip regions the chance of a random bit grows towards the random region, from 10% at the outer edge to
//! 50% next to it. There is no hysteresis, the mode is recomputed from scratch on every trigger so a control sitting
//! right on a boundary may flip between the two neighbouring modes from one step to the next.

use crate::utils::{fraction_between, linear_interp};

/// The behaviour of the sequencer for one step is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerMode {
    /// Repeat a loop twice the selected length
    DoubleLock,
    /// Mostly repeat, occasionally slip in a random bit
    SlipLow,
    /// Every bit is random, the loop length is fixed
    FullyRandom,
    /// Mostly repeat, occasionally slip in a random bit
    SlipHigh,
    /// Repeat a loop of the selected length forever
    Locked,
}

impl SequencerMode {
    /// `SequencerMode::from_control(r)` is the mode selected by randomness control reading `r` in `[0..1023]`
    ///
    /// # Examples
    ///
    /// ```
    /// # use mod1_turing::mode::SequencerMode;
    /// assert_eq!(SequencerMode::from_control(0), SequencerMode::DoubleLock);
    /// assert_eq!(SequencerMode::from_control(512), SequencerMode::FullyRandom);
    /// assert_eq!(SequencerMode::from_control(1023), SequencerMode::Locked);
    /// ```
    pub fn from_control(randomness: u16) -> Self {
        if randomness < SLIP_LOW_START {
            SequencerMode::DoubleLock
        } else if randomness < FULLY_RANDOM_START {
            SequencerMode::SlipLow
        } else if randomness < SLIP_HIGH_START {
            SequencerMode::FullyRandom
        } else if randomness < LOCKED_START {
            SequencerMode::SlipHigh
        } else {
            SequencerMode::Locked
        }
    }

    /// `mode.slip_chance(r)` is the probability of a random bit in a slip mode for randomness reading `r`
    ///
    /// Is `None` for modes which don't slip.
    pub fn slip_chance(&self, randomness: u16) -> Option<f32> {
        match self {
            SequencerMode::SlipLow => Some(linear_interp(
                MIN_SLIP_CHANCE,
                MAX_SLIP_CHANCE,
                fraction_between(randomness, SLIP_LOW_START, FULLY_RANDOM_START),
            )),
            SequencerMode::SlipHigh => Some(linear_interp(
                MAX_SLIP_CHANCE,
                MIN_SLIP_CHANCE,
                fraction_between(randomness, SLIP_HIGH_START, LOCKED_START),
            )),
            SequencerMode::DoubleLock | SequencerMode::FullyRandom | SequencerMode::Locked => None,
        }
    }

    /// `mode.loop_length(l)` is the loop length for this mode with length control reading `l` in `[0..1023]`
    pub fn loop_length(&self, length: u16) -> u8 {
        match self {
            SequencerMode::FullyRandom => FULLY_RANDOM_LOOP_LENGTH,
            _ => loop_length_from_control(length),
        }
    }

    /// `mode.echo_position(l)` is the register position repeated for loop length `l`, or `None` for pure randomness
    ///
    /// `l` is expected to be one of `LOOP_LENGTHS`, a length of zero echoes the newest position.
    pub fn echo_position(&self, loop_length: u8) -> Option<usize> {
        let loop_length = loop_length as usize;
        match self {
            SequencerMode::FullyRandom => None,
            SequencerMode::DoubleLock => Some((loop_length * 2).saturating_sub(1).min(15)),
            SequencerMode::SlipLow | SequencerMode::SlipHigh | SequencerMode::Locked => {
                Some(loop_length.saturating_sub(1))
            }
        }
    }
}

/// `loop_length_from_control(l)` is length control reading `l` in `[0..1023]` bucketed into `LOOP_LENGTHS`
pub fn loop_length_from_control(length: u16) -> u8 {
    let length = length.min(crate::sequencer::ADC_MAX) as usize;
    let bucket = length * LOOP_LENGTHS.len() / (crate::sequencer::ADC_MAX as usize + 1);
    LOOP_LENGTHS[bucket]
}

/// The loop lengths available from the length control, shortest first
pub const LOOP_LENGTHS: [u8; 8] = [2, 3, 4, 5, 6, 8, 12, 16];

/// Fully random mode ignores the length control and always uses this
pub const FULLY_RANDOM_LOOP_LENGTH: u8 = 8;

/// Randomness readings below this are double locked, from here up they slip
pub const SLIP_LOW_START: u16 = 40;

/// First randomness reading of the fully random region
pub const FULLY_RANDOM_START: u16 = 400;

/// First randomness reading of the upper slip region
pub const SLIP_HIGH_START: u16 = 630;

/// Randomness readings from here up are locked
pub const LOCKED_START: u16 = 950;

const MIN_SLIP_CHANCE: f32 = 0.1_f32;
const MAX_SLIP_CHANCE: f32 = 0.5_f32;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_almost;

    #[test]
    fn mode_boundaries() {
        let expected = [
            (0, SequencerMode::DoubleLock),
            (39, SequencerMode::DoubleLock),
            (40, SequencerMode::SlipLow),
            (399, SequencerMode::SlipLow),
            (400, SequencerMode::FullyRandom),
            (629, SequencerMode::FullyRandom),
            (630, SequencerMode::SlipHigh),
            (949, SequencerMode::SlipHigh),
            (950, SequencerMode::Locked),
            (1023, SequencerMode::Locked),
        ];

        for (control, mode) in expected {
            assert_eq!(SequencerMode::from_control(control), mode);
        }
    }

    #[test]
    fn slip_low_chance_rises_towards_random() {
        let low = SequencerMode::SlipLow;
        assert!(is_almost(low.slip_chance(40).unwrap(), 0.1, 1E-6));
        assert!(is_almost(low.slip_chance(220).unwrap(), 0.3, 1E-6));
        assert!(is_almost(low.slip_chance(400).unwrap(), 0.5, 1E-6));
    }

    #[test]
    fn slip_high_chance_falls_towards_locked() {
        let high = SequencerMode::SlipHigh;
        assert!(is_almost(high.slip_chance(630).unwrap(), 0.5, 1E-6));
        assert!(is_almost(high.slip_chance(790).unwrap(), 0.3, 1E-6));
        assert!(is_almost(high.slip_chance(950).unwrap(), 0.1, 1E-6));
    }

    #[test]
    fn only_slip_modes_slip() {
        assert_eq!(SequencerMode::DoubleLock.slip_chance(10), None);
        assert_eq!(SequencerMode::FullyRandom.slip_chance(500), None);
        assert_eq!(SequencerMode::Locked.slip_chance(1000), None);
    }

    #[test]
    fn length_control_covers_every_loop_length() {
        assert_eq!(loop_length_from_control(0), 2);
        assert_eq!(loop_length_from_control(127), 2);
        assert_eq!(loop_length_from_control(128), 3);
        assert_eq!(loop_length_from_control(512), 6);
        assert_eq!(loop_length_from_control(895), 12);
        assert_eq!(loop_length_from_control(896), 16);
        assert_eq!(loop_length_from_control(1023), 16);
    }

    #[test]
    fn out_of_range_length_control_is_clamped() {
        assert_eq!(loop_length_from_control(u16::MAX), 16);
    }

    #[test]
    fn fully_random_forces_length_8() {
        assert_eq!(SequencerMode::FullyRandom.loop_length(0), 8);
        assert_eq!(SequencerMode::FullyRandom.loop_length(1023), 8);
        assert_eq!(SequencerMode::Locked.loop_length(0), 2);
    }

    #[test]
    fn echo_positions() {
        assert_eq!(SequencerMode::Locked.echo_position(4), Some(3));
        assert_eq!(SequencerMode::SlipLow.echo_position(16), Some(15));
        assert_eq!(SequencerMode::DoubleLock.echo_position(4), Some(7));
        assert_eq!(SequencerMode::DoubleLock.echo_position(12), Some(15));
        assert_eq!(SequencerMode::FullyRandom.echo_position(8), None);
    }

    #[test]
    fn zero_loop_length_echoes_the_newest_position() {
        assert_eq!(SequencerMode::Locked.echo_position(0), Some(0));
        assert_eq!(SequencerMode::SlipHigh.echo_position(0), Some(0));
        assert_eq!(SequencerMode::DoubleLock.echo_position(0), Some(0));
    }
}
