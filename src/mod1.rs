//! # Mod1 Turing machine
//!
//! Ties everything together into the behaviour of the whole module. The firmware owns the hardware and calls into
//! this type from its main loop:
//!
//! - `poll` on every pass of the loop with the current pin and ADC readings, then writes the returned duty cycles to
//!   the PWM channels and the LED pin
//! - `receive` for every byte that arrives on the serial port
//!
//! The module is in one of two modes. In `Run` the sequencer steps on every rising edge of the trigger input. In
//! `Calibrate`, entered only by holding the scale button at power-on, the sequencer is frozen and the serial menu
//! edits the calibration table until it is told to exit.

use core::fmt::{self, Write};

use crate::{
    calibration::{Calibration, LoadOutcome, Storage},
    gate::EdgeDetector,
    menu::{CalibrationMenu, MenuAction, DEFAULT_SCAN_DWELL_MS},
    output,
    quantizer::Scale,
    rng,
    scale_selector::ScaleSelector,
    sequencer::{Controls, Sequencer},
};

/// Runtime settings for the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Changes of the scale button within this many milliseconds of the last accepted change are ignored
    pub debounce_ms: u32,
    /// How long each note plays during a calibration auto-scan
    pub scan_dwell_ms: u32,
    /// Seed for the random bits
    pub seed: u64,
    /// Where the calibration record lives in the EEPROM
    pub storage_address: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            scan_dwell_ms: DEFAULT_SCAN_DWELL_MS,
            seed: rng::DEFAULT_SEED,
            storage_address: 0,
        }
    }
}

/// The top level operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Calibrate,
}

/// The hardware inputs sampled on one pass of the main loop are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inputs {
    /// Level of the trigger input
    pub trigger: bool,
    /// Raw level of the scale button, true is pressed
    pub button: bool,
    /// Pot readings in `[0..1023]`, ordered randomness, length, gain
    pub pots: [u16; 3],
    /// CV jack readings in `[0..1023]`, ordered like `pots`
    pub cvs: [u16; 3],
}

/// The hardware outputs are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outputs {
    /// PWM duty cycle of the raw CV output
    pub raw_cv: u8,
    /// PWM duty cycle of the quantized CV output
    pub quantized_cv: u8,
    /// Status LED
    pub led: bool,
}

/// The Mod1 Turing machine module is represented here.
pub struct Mod1<S: Storage> {
    mode: Mode,
    calibration: Calibration<S>,
    sequencer: Sequencer,
    trigger: EdgeDetector,
    scale_selector: ScaleSelector,
    menu: CalibrationMenu,
    run_outputs: Outputs,
}

impl<S: Storage> Mod1<S> {
    /// `Mod1::boot(s, cfg, held)` is a freshly powered up module with calibration storage `s`
    ///
    /// The calibration is loaded from storage, falling back to factory defaults. If the scale button is `held` at
    /// power-on the module starts in calibration mode.
    pub fn boot(storage: S, config: &Config, calibrate_held: bool) -> Self {
        let mut calibration = Calibration::new(storage, config.storage_address);
        if calibration.load() == LoadOutcome::NotFound {
            log::info!("running with factory calibration");
        }

        let mode = if calibrate_held {
            Mode::Calibrate
        } else {
            Mode::Run
        };
        log::info!("booted into {:?} mode", mode);

        Self {
            mode,
            calibration,
            sequencer: Sequencer::new(config.seed),
            trigger: EdgeDetector::new(),
            scale_selector: ScaleSelector::new(config.debounce_ms),
            menu: CalibrationMenu::new(config.scan_dwell_ms),
            run_outputs: Outputs::default(),
        }
    }

    /// `m.poll(i, t)` updates the module with inputs `i` sampled at time `t` milliseconds, is the new outputs
    pub fn poll(&mut self, inputs: &Inputs, now_ms: u32) -> Outputs {
        match self.mode {
            Mode::Run => self.poll_run(inputs, now_ms),
            Mode::Calibrate => Outputs {
                raw_cv: 0,
                quantized_cv: self.menu.output_level(&self.calibration, now_ms),
                led: true,
            },
        }
    }

    fn poll_run(&mut self, inputs: &Inputs, now_ms: u32) -> Outputs {
        self.scale_selector.update(inputs.button, now_ms);

        if self.trigger.update(inputs.trigger) {
            let controls = Controls::from_pots_and_cvs(inputs.pots, inputs.cvs);
            let step = self.sequencer.step(&controls);
            let cv = output::render(
                step.value,
                controls.gain,
                self.scale_selector.scale(),
                self.calibration.table(),
            );

            self.run_outputs = Outputs {
                raw_cv: cv.raw,
                quantized_cv: cv.quantized,
                led: step.bit,
            };
        }

        self.run_outputs
    }

    /// `m.receive(b, t, out)` handles serial byte `b` received at time `t`, replies are written to `out`
    ///
    /// Serial input is only listened to in calibration mode.
    pub fn receive<W: Write>(&mut self, byte: u8, now_ms: u32, out: &mut W) -> fmt::Result {
        if self.mode != Mode::Calibrate {
            return Ok(());
        }

        if self.menu.receive(byte, &mut self.calibration, now_ms, out)? == MenuAction::Exit {
            log::info!("leaving calibration, back to sequencing");
            self.mode = Mode::Run;
        }
        Ok(())
    }

    /// `m.print_banner(out)` greets the user on the serial port, with the menu help if calibrating
    pub fn print_banner<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "mod1 turing machine")?;
        if self.mode == Mode::Calibrate {
            CalibrationMenu::print_help(out)?;
            self.menu.print_status(&self.calibration, out)?;
        }
        Ok(())
    }

    /// `m.mode()` is the current operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `m.scale()` is the currently selected quantizer scale
    pub fn scale(&self) -> Scale {
        self.scale_selector.scale()
    }

    /// `m.calibration()` is the active calibration
    pub fn calibration(&self) -> &Calibration<S> {
        &self.calibration
    }

    /// `m.sequencer()` is the shift-register sequencer
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }
}

const DEFAULT_DEBOUNCE_MS: u32 = 50;
