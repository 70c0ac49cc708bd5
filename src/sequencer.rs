//! # Shift-register sequencer
//!
//! A "Turing machine" style sequencer. Each trigger shifts a new bit into a 16 step shift register, and the newest 8
//! bits are read out as the sequencer value. Whether the new bit repeats an older one or is random is decided by the
//! randomness control, see the `mode` module. Repeating the bit at position `n - 1` makes the register cycle with a
//! period of `n` steps, so locked patterns loop.

use crate::{mode::SequencerMode, rng::Rng, shift_register::ShiftRegister};

/// The largest reading from the 10 bit ADCs
pub const ADC_MAX: u16 = 1023;

/// The control readings used for one step are represented here.
///
/// Every reading is in `[0..ADC_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    /// Sweeps between locked loops and randomness
    pub randomness: u16,
    /// Selects the loop length
    pub length: u16,
    /// Scales the outputs, full scale is unity gain
    pub gain: u16,
}

impl Controls {
    /// `Controls::new(r, l, g)` is a new set of control readings, each clamped to `[0..ADC_MAX]`
    pub fn new(randomness: u16, length: u16, gain: u16) -> Self {
        Self {
            randomness: randomness.min(ADC_MAX),
            length: length.min(ADC_MAX),
            gain: gain.min(ADC_MAX),
        }
    }

    /// `Controls::from_pots_and_cvs(ps, cvs)` is each pot reading summed with its CV jack reading
    ///
    /// Both arrays are ordered randomness, length, gain. Sums saturate at `ADC_MAX`.
    pub fn from_pots_and_cvs(pots: [u16; 3], cvs: [u16; 3]) -> Self {
        let sum = |i: usize| pots[i].saturating_add(cvs[i]);
        Self::new(sum(0), sum(1), sum(2))
    }
}

/// The outcome of one sequencer step is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// The mode picked by the randomness control for this step
    pub mode: SequencerMode,
    /// The loop length used for this step, one of `LOOP_LENGTHS`
    pub loop_length: u8,
    /// The bit that was shifted in
    pub bit: bool,
    /// The newest 8 register positions packed into a byte
    pub value: u8,
}

/// A shift-register sequencer is represented here.
pub struct Sequencer {
    register: ShiftRegister,
    rng: Rng,
}

impl Sequencer {
    /// `Sequencer::new(s)` is a new sequencer with an empty register and random numbers seeded with `s`
    pub fn new(seed: u64) -> Self {
        Self::with_register(ShiftRegister::new(), seed)
    }

    /// `Sequencer::with_register(sr, s)` is a new sequencer starting from register `sr`
    pub fn with_register(register: ShiftRegister, seed: u64) -> Self {
        Self {
            register,
            rng: Rng::new(seed),
        }
    }

    /// `seq.step(c)` advances the sequencer by one step using control readings `c`, call on every trigger edge
    ///
    /// The mode and loop length are worked out fresh every step, nothing is latched between steps.
    pub fn step(&mut self, controls: &Controls) -> Step {
        let mode = SequencerMode::from_control(controls.randomness);
        let loop_length = mode.loop_length(controls.length);
        let bit = self.next_bit(mode, loop_length, controls.randomness);

        self.register.shift_in(bit);

        let step = Step {
            mode,
            loop_length,
            bit,
            value: self.register.value(),
        };
        log::debug!(
            "step {:?} len {} bit {} value {:#04x}",
            step.mode,
            step.loop_length,
            step.bit as u8,
            step.value
        );
        step
    }

    /// `seq.register()` is the current shift register
    pub fn register(&self) -> &ShiftRegister {
        &self.register
    }

    /// `seq.value()` is the newest 8 register positions packed into a byte
    pub fn value(&self) -> u8 {
        self.register.value()
    }

    fn next_bit(&mut self, mode: SequencerMode, loop_length: u8, randomness: u16) -> bool {
        let slipped = match mode.slip_chance(randomness) {
            Some(chance) => self.rng.chance(chance),
            None => false,
        };

        match mode.echo_position(loop_length) {
            Some(position) if !slipped => self.register.get(position),
            _ => self.rng.bit(),
        }
    }
}
