//! # Calibration menu
//!
//! A small line based command interpreter for tuning the calibration table by ear or with a tuner, typically over a
//! serial port. It is entered at power-on by holding the scale button, and while it runs the sequencer is stopped and
//! the quantized output plays the level of the note being calibrated.
//!
//! Commands are a single character, some followed by a number:
//!
//! | command      | action                                          |
//! |--------------|-------------------------------------------------|
//! | `h`          | print help                                      |
//! | `n` / `p`    | next / previous note                            |
//! | `i <0..36>`  | jump to note index                              |
//! | `+` / `-`    | raise / lower the level by the step size        |
//! | `S <1..16>`  | set the step size                               |
//! | `v <0..255>` | set the level directly                          |
//! | `a`          | sweep every note without changing anything      |
//! | `w`          | save to EEPROM                                  |
//! | `r`          | reload from EEPROM                              |
//! | `f`          | restore factory levels, not saved until `w`     |
//! | `t`          | print the current note                          |
//! | `x`          | exit back to sequencing                         |
//!
//! Bad input is reported and leaves everything as it was.

use core::fmt::{self, Write};

use heapless::String;

use crate::calibration::{Calibration, LoadOutcome, Storage, MAX_NOTE_INDEX, NUM_NOTES};

/// The longest accepted command line, in characters
pub const LINE_CAPACITY: usize = 32;

/// The largest step size for `+` and `-`
pub const MAX_STEP: u8 = 16;

/// The step size the menu starts with
pub const DEFAULT_STEP: u8 = 1;

/// How long each note plays during an auto-scan
pub const DEFAULT_SCAN_DWELL_MS: u32 = 1_500;

/// A parsed menu command is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Next,
    Prev,
    Jump(usize),
    Up,
    Down,
    SetStep(u8),
    SetLevel(u8),
    AutoScan,
    Save,
    Reload,
    FactoryReset,
    Status,
    Exit,
}

impl Command {
    /// `Command::parse(l)` is the command on line `l`
    ///
    /// # Examples
    ///
    /// ```
    /// # use mod1_turing::menu::{Command, MenuError};
    /// assert_eq!(Command::parse("i 12"), Ok(Command::Jump(12)));
    /// assert_eq!(Command::parse("v300"), Err(MenuError::OutOfRange { command: 'v', min: 0, max: 255 }));
    /// ```
    pub fn parse(line: &str) -> Result<Self, MenuError> {
        let mut chars = line.trim().chars();
        let command = chars.next().ok_or(MenuError::EmptyLine)?;
        let arg = chars.as_str();

        let parsed = match command {
            'i' => return Ok(Command::Jump(parse_arg(command, arg, 0, MAX_NOTE_INDEX as u32)? as usize)),
            'S' => return Ok(Command::SetStep(parse_arg(command, arg, 1, MAX_STEP as u32)? as u8)),
            'v' => return Ok(Command::SetLevel(parse_arg(command, arg, 0, u8::MAX as u32)? as u8)),
            'h' | '?' => Command::Help,
            'n' => Command::Next,
            'p' => Command::Prev,
            '+' => Command::Up,
            '-' => Command::Down,
            'a' => Command::AutoScan,
            'w' => Command::Save,
            'r' => Command::Reload,
            'f' => Command::FactoryReset,
            't' => Command::Status,
            'x' => Command::Exit,
            other => return Err(MenuError::UnknownCommand(other)),
        };

        // the rest take no argument, anything after them is a typo
        if !arg.trim().is_empty() {
            return Err(MenuError::UnexpectedArgument(command));
        }
        Ok(parsed)
    }
}

/// `parse_arg(c, a, lo, hi)` is the number in argument `a` of command `c`, which must be in `[lo..hi]`
fn parse_arg(command: char, arg: &str, min: u32, max: u32) -> Result<u32, MenuError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(MenuError::MissingArgument(command));
    }

    let val: u32 = arg
        .parse()
        .map_err(|_| MenuError::InvalidNumber(command))?;

    if val < min || max < val {
        return Err(MenuError::OutOfRange { command, min, max });
    }
    Ok(val)
}

/// Rejected menu input is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("empty command")]
    EmptyLine,
    #[error("unknown command '{0}', type h for help")]
    UnknownCommand(char),
    #[error("'{0}' needs a number")]
    MissingArgument(char),
    #[error("'{0}' needs a whole number")]
    InvalidNumber(char),
    #[error("'{0}' takes no argument")]
    UnexpectedArgument(char),
    #[error("'{command}' takes a value in {min}..={max}")]
    OutOfRange { command: char, min: u32, max: u32 },
    #[error("line longer than {0} characters")]
    LineTooLong(usize),
}

/// What the caller should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Keep running the menu
    Stay,
    /// Leave the menu and go back to sequencing
    Exit,
}

/// The calibration menu state is represented here.
///
/// The menu never owns the calibration, every call borrows it, so the table is shared with the rest of the module.
pub struct CalibrationMenu {
    active: usize,
    step: u8,
    scan_dwell_ms: u32,
    scan_started_ms: Option<u32>,
    line: String<LINE_CAPACITY>,
    line_overflowed: bool,
}

impl CalibrationMenu {
    /// `CalibrationMenu::new(d)` is a new menu at note 0 whose auto-scan plays each note for `d` milliseconds
    pub fn new(scan_dwell_ms: u32) -> Self {
        Self {
            active: 0,
            step: DEFAULT_STEP,
            scan_dwell_ms: scan_dwell_ms.max(1),
            scan_started_ms: None,
            line: String::new(),
            line_overflowed: false,
        }
    }

    /// `menu.active_note_index()` is the index of the note being calibrated
    pub fn active_note_index(&self) -> usize {
        self.active
    }

    /// `menu.set_active_note_index(i)` selects note index `i` for calibration
    pub fn set_active_note_index(&mut self, index: usize) -> Result<(), MenuError> {
        if MAX_NOTE_INDEX < index {
            return Err(MenuError::OutOfRange {
                command: 'i',
                min: 0,
                max: MAX_NOTE_INDEX as u32,
            });
        }
        self.active = index;
        Ok(())
    }

    /// `menu.step()` is the amount `+` and `-` change the level by
    pub fn step(&self) -> u8 {
        self.step
    }

    /// `menu.set_step(s)` sets the amount `+` and `-` change the level by, must be in `[1..MAX_STEP]`
    pub fn set_step(&mut self, step: u8) -> Result<(), MenuError> {
        if step < 1 || MAX_STEP < step {
            return Err(MenuError::OutOfRange {
                command: 'S',
                min: 1,
                max: MAX_STEP as u32,
            });
        }
        self.step = step;
        Ok(())
    }

    /// `menu.adjust_active_level(c, d)` changes the level of the active note by `d`, saturating, and is the new level
    pub fn adjust_active_level<S: Storage>(&self, cal: &mut Calibration<S>, delta: i16) -> u8 {
        let level = (cal.get(self.active) as i16)
            .saturating_add(delta)
            .clamp(0, u8::MAX as i16) as u8;
        cal.set(self.active, level);
        level
    }

    /// `menu.set_active_level(c, l)` sets the level of the active note to `l`
    pub fn set_active_level<S: Storage>(&self, cal: &mut Calibration<S>, level: u8) {
        cal.set(self.active, level)
    }

    /// `menu.scanning_note(t)` is the note an auto-scan is playing at time `t`, or `None` if no scan is running
    pub fn scanning_note(&self, now_ms: u32) -> Option<usize> {
        self.scan_started_ms
            .map(|start| (now_ms.wrapping_sub(start) / self.scan_dwell_ms) as usize)
            .filter(|note| *note < NUM_NOTES)
    }

    /// `menu.output_level(c, t)` is the PWM level the quantized output should play at time `t`
    pub fn output_level<S: Storage>(&self, cal: &Calibration<S>, now_ms: u32) -> u8 {
        cal.get(self.scanning_note(now_ms).unwrap_or(self.active))
    }

    /// `menu.receive(b, c, t, out)` feeds one byte of serial input received at time `t`
    ///
    /// A carriage return or line feed ends the line and runs it. Backspace removes the last character.
    pub fn receive<S: Storage, W: Write>(
        &mut self,
        byte: u8,
        cal: &mut Calibration<S>,
        now_ms: u32,
        out: &mut W,
    ) -> Result<MenuAction, fmt::Error> {
        match byte {
            b'\r' | b'\n' => {
                let line = core::mem::take(&mut self.line);
                if self.line_overflowed {
                    self.line_overflowed = false;
                    writeln!(out, "error: {}", MenuError::LineTooLong(LINE_CAPACITY))?;
                    return Ok(MenuAction::Stay);
                }
                self.execute(&line, cal, now_ms, out)
            }
            BACKSPACE | DELETE => {
                self.line.pop();
                Ok(MenuAction::Stay)
            }
            b if b.is_ascii() && !b.is_ascii_control() => {
                if self.line.push(b as char).is_err() {
                    self.line_overflowed = true;
                }
                Ok(MenuAction::Stay)
            }
            _ => Ok(MenuAction::Stay),
        }
    }

    /// `menu.execute(l, c, t, out)` parses and runs command line `l`, blank lines are ignored
    pub fn execute<S: Storage, W: Write>(
        &mut self,
        line: &str,
        cal: &mut Calibration<S>,
        now_ms: u32,
        out: &mut W,
    ) -> Result<MenuAction, fmt::Error> {
        if line.trim().is_empty() {
            return Ok(MenuAction::Stay);
        }

        match Command::parse(line) {
            Ok(command) => self.apply(command, cal, now_ms, out),
            Err(e) => {
                log::trace!("rejected menu input: {}", e);
                writeln!(out, "error: {}", e)?;
                Ok(MenuAction::Stay)
            }
        }
    }

    /// `menu.apply(cmd, c, t, out)` runs command `cmd` at time `t`, any command stops a running auto-scan
    pub fn apply<S: Storage, W: Write>(
        &mut self,
        command: Command,
        cal: &mut Calibration<S>,
        now_ms: u32,
        out: &mut W,
    ) -> Result<MenuAction, fmt::Error> {
        log::trace!("menu command {:?}", command);
        self.scan_started_ms = None;

        match command {
            Command::Help => out.write_str(HELP)?,
            Command::Next => {
                self.active = (self.active + 1) % NUM_NOTES;
                self.print_status(cal, out)?;
            }
            Command::Prev => {
                self.active = (self.active + NUM_NOTES - 1) % NUM_NOTES;
                self.print_status(cal, out)?;
            }
            Command::Jump(index) => match self.set_active_note_index(index) {
                Ok(()) => self.print_status(cal, out)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::Up => {
                self.adjust_active_level(cal, self.step as i16);
                self.print_status(cal, out)?;
            }
            Command::Down => {
                self.adjust_active_level(cal, -(self.step as i16));
                self.print_status(cal, out)?;
            }
            Command::SetStep(step) => match self.set_step(step) {
                Ok(()) => writeln!(out, "step {}", self.step)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::SetLevel(level) => {
                self.set_active_level(cal, level);
                self.print_status(cal, out)?;
            }
            Command::AutoScan => {
                self.scan_started_ms = Some(now_ms);
                writeln!(
                    out,
                    "scanning {} notes, {} ms each, any command stops",
                    NUM_NOTES, self.scan_dwell_ms
                )?;
            }
            Command::Save => match cal.save() {
                Ok(()) => writeln!(out, "saved")?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::Reload => {
                match cal.load() {
                    LoadOutcome::Loaded => writeln!(out, "loaded")?,
                    LoadOutcome::NotFound => writeln!(out, "no calibration found, factory defaults")?,
                }
                self.print_status(cal, out)?;
            }
            Command::FactoryReset => {
                cal.reset_to_factory();
                writeln!(out, "factory defaults restored, w to save")?;
                self.print_status(cal, out)?;
            }
            Command::Status => self.print_status(cal, out)?,
            Command::Exit => {
                writeln!(out, "back to sequencing")?;
                return Ok(MenuAction::Exit);
            }
        }

        Ok(MenuAction::Stay)
    }

    /// `menu.print_status(c, out)` prints the name, target pitch, and level of the active note
    pub fn print_status<S: Storage, W: Write>(&self, cal: &Calibration<S>, out: &mut W) -> fmt::Result {
        let note = cal.describe_note(self.active);
        writeln!(
            out,
            "note {} {}{} target {:.2} Hz level {}",
            note.index, note.name, note.octave, note.target_hz, note.level
        )
    }

    /// `CalibrationMenu::print_help(out)` prints the list of commands
    pub fn print_help<W: Write>(out: &mut W) -> fmt::Result {
        out.write_str(HELP)
    }
}

impl Default for CalibrationMenu {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_DWELL_MS)
    }
}

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

const HELP: &str = "\
calibration commands:
  h          help
  n / p      next / previous note
  i <0..36>  jump to note
  + / -      level up / down by step
  S <1..16>  set step size
  v <0..255> set level
  a          auto-scan all notes
  w          save to EEPROM
  r          reload from EEPROM
  f          factory defaults (w to save)
  t          show current note
  x          exit to sequencer
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationTable, MemoryStorage, FACTORY_LEVELS};

    type TestCalibration = Calibration<MemoryStorage<64>>;
    type Console = String<1024>;

    fn setup() -> (CalibrationMenu, TestCalibration, Console) {
        (
            CalibrationMenu::new(100),
            Calibration::new(MemoryStorage::new(), 0),
            Console::new(),
        )
    }

    /// `send(m, c, text, out)` types `text` into the menu at time zero, is `Exit` iff any line asked to exit
    fn send(
        menu: &mut CalibrationMenu,
        cal: &mut TestCalibration,
        text: &str,
        out: &mut Console,
    ) -> MenuAction {
        out.clear();
        let mut action = MenuAction::Stay;
        for b in text.bytes() {
            if menu.receive(b, cal, 0, out).unwrap() == MenuAction::Exit {
                action = MenuAction::Exit;
            }
        }
        action
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("h"), Ok(Command::Help));
        assert_eq!(Command::parse("n"), Ok(Command::Next));
        assert_eq!(Command::parse("p"), Ok(Command::Prev));
        assert_eq!(Command::parse("+"), Ok(Command::Up));
        assert_eq!(Command::parse("-"), Ok(Command::Down));
        assert_eq!(Command::parse("a"), Ok(Command::AutoScan));
        assert_eq!(Command::parse("w"), Ok(Command::Save));
        assert_eq!(Command::parse("r"), Ok(Command::Reload));
        assert_eq!(Command::parse("f"), Ok(Command::FactoryReset));
        assert_eq!(Command::parse("t"), Ok(Command::Status));
        assert_eq!(Command::parse("  x  "), Ok(Command::Exit));
    }

    #[test]
    fn parse_commands_with_numbers() {
        assert_eq!(Command::parse("i 36"), Ok(Command::Jump(36)));
        assert_eq!(Command::parse("i0"), Ok(Command::Jump(0)));
        assert_eq!(Command::parse("S 16"), Ok(Command::SetStep(16)));
        assert_eq!(Command::parse("v   255"), Ok(Command::SetLevel(255)));
    }

    #[test]
    fn parse_rejects_bad_numbers() {
        assert_eq!(Command::parse("i"), Err(MenuError::MissingArgument('i')));
        assert_eq!(Command::parse("v abc"), Err(MenuError::InvalidNumber('v')));
        assert_eq!(Command::parse("v -3"), Err(MenuError::InvalidNumber('v')));
        assert_eq!(
            Command::parse("i 37"),
            Err(MenuError::OutOfRange {
                command: 'i',
                min: 0,
                max: 36
            })
        );
        assert_eq!(
            Command::parse("S 0"),
            Err(MenuError::OutOfRange {
                command: 'S',
                min: 1,
                max: 16
            })
        );
        assert_eq!(
            Command::parse("v 99999999999"),
            Err(MenuError::InvalidNumber('v'))
        );
    }

    #[test]
    fn parse_rejects_trailing_text_after_plain_commands() {
        assert_eq!(Command::parse("+ 5"), Err(MenuError::UnexpectedArgument('+')));
        assert_eq!(Command::parse("xyz"), Err(MenuError::UnexpectedArgument('x')));
        assert_eq!(Command::parse("w please"), Err(MenuError::UnexpectedArgument('w')));

        // trailing whitespace is fine
        assert_eq!(Command::parse("x \t"), Ok(Command::Exit));
    }

    #[test]
    fn typo_after_a_plain_command_changes_nothing() {
        let (mut menu, mut cal, mut out) = setup();

        assert_eq!(send(&mut menu, &mut cal, "xyz\n", &mut out), MenuAction::Stay);
        assert_eq!(out.as_str(), "error: 'x' takes no argument\n");

        send(&mut menu, &mut cal, "+ 5\n", &mut out);
        assert_eq!(cal.table(), &CalibrationTable::factory());

        send(&mut menu, &mut cal, "w please\n", &mut out);
        assert!(cal.storage().bytes().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn adjust_level_saturates_for_huge_deltas() {
        let (menu, mut cal, _) = setup();
        cal.set(0, 200);

        assert_eq!(menu.adjust_active_level(&mut cal, i16::MAX), 255);
        assert_eq!(cal.get(0), 255);

        assert_eq!(menu.adjust_active_level(&mut cal, i16::MIN), 0);
        assert_eq!(cal.get(0), 0);
    }

    #[test]
    fn parse_rejects_unknown_commands() {
        assert_eq!(Command::parse("q"), Err(MenuError::UnknownCommand('q')));
        assert_eq!(Command::parse("s 3"), Err(MenuError::UnknownCommand('s')));
        assert_eq!(Command::parse(""), Err(MenuError::EmptyLine));
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let (mut menu, mut cal, mut out) = setup();

        send(&mut menu, &mut cal, "p\n", &mut out);
        assert_eq!(menu.active_note_index(), MAX_NOTE_INDEX);

        send(&mut menu, &mut cal, "n\n", &mut out);
        assert_eq!(menu.active_note_index(), 0);
    }

    #[test]
    fn jump_prints_the_note() {
        let (mut menu, mut cal, mut out) = setup();

        send(&mut menu, &mut cal, "i 21\n", &mut out);
        assert_eq!(menu.active_note_index(), 21);
        assert_eq!(out.as_str(), "note 21 A3 target 220.00 Hz level 94\n");
    }

    #[test]
    fn bad_input_changes_nothing() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "i 5\n", &mut out);

        for line in ["i 99\n", "v 256\n", "S 17\n", "v\n", "z\n"] {
            let action = send(&mut menu, &mut cal, line, &mut out);
            assert_eq!(action, MenuAction::Stay);
            assert!(out.starts_with("error: "));
        }

        assert_eq!(menu.active_note_index(), 5);
        assert_eq!(menu.step(), DEFAULT_STEP);
        assert_eq!(cal.table(), &CalibrationTable::factory());
    }

    #[test]
    fn plus_and_minus_move_by_the_step() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "i 1\n", &mut out);

        send(&mut menu, &mut cal, "+\n", &mut out);
        assert_eq!(cal.get(1), FACTORY_LEVELS[1] + 1);

        send(&mut menu, &mut cal, "S 4\n", &mut out);
        assert_eq!(out.as_str(), "step 4\n");
        send(&mut menu, &mut cal, "-\n", &mut out);
        send(&mut menu, &mut cal, "-\n", &mut out);
        assert_eq!(cal.get(1), FACTORY_LEVELS[1] + 1 - 8);
    }

    #[test]
    fn levels_saturate() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "S 16\n", &mut out);

        // note 0 starts at level 0
        send(&mut menu, &mut cal, "-\n", &mut out);
        assert_eq!(cal.get(0), 0);

        send(&mut menu, &mut cal, "v 250\n", &mut out);
        send(&mut menu, &mut cal, "+\n", &mut out);
        assert_eq!(cal.get(0), 255);
    }

    #[test]
    fn save_reload_and_factory_reset() {
        let (mut menu, mut cal, mut out) = setup();

        send(&mut menu, &mut cal, "v 42\n", &mut out);
        send(&mut menu, &mut cal, "w\n", &mut out);
        assert_eq!(out.as_str(), "saved\n");

        send(&mut menu, &mut cal, "f\n", &mut out);
        assert_eq!(cal.get(0), FACTORY_LEVELS[0]);

        send(&mut menu, &mut cal, "r\n", &mut out);
        assert!(out.starts_with("loaded\n"));
        assert_eq!(cal.get(0), 42);
    }

    #[test]
    fn reload_with_nothing_saved_reports_factory() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "v 42\n", &mut out);

        send(&mut menu, &mut cal, "r\n", &mut out);
        assert!(out.starts_with("no calibration found"));
        assert_eq!(cal.get(0), FACTORY_LEVELS[0]);
    }

    #[test]
    fn save_failure_is_reported() {
        let mut menu = CalibrationMenu::default();
        let mut cal = Calibration::new(MemoryStorage::<16>::new(), 0);
        let mut out = Console::new();

        menu.apply(Command::Save, &mut cal, 0, &mut out).unwrap();
        assert!(out.starts_with("error: could not write calibration"));
    }

    #[test]
    fn exit_leaves_the_menu() {
        let (mut menu, mut cal, mut out) = setup();
        assert_eq!(send(&mut menu, &mut cal, "x\r\n", &mut out), MenuAction::Exit);
        assert_eq!(out.as_str(), "back to sequencing\n");

        assert_eq!(send(&mut menu, &mut cal, "t\n", &mut out), MenuAction::Stay);
    }

    #[test]
    fn help_lists_every_command() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "h\n", &mut out);
        for cmd in ["h ", "n / p", "i <", "+ / -", "S <", "v <", "a ", "w ", "r ", "f ", "t ", "x "] {
            assert!(out.contains(cmd));
        }
    }

    #[test]
    fn backspace_edits_the_line() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "i 12\x08\x083\n", &mut out);
        assert_eq!(menu.active_note_index(), 3);
    }

    #[test]
    fn long_lines_are_rejected() {
        let (mut menu, mut cal, mut out) = setup();
        send(
            &mut menu,
            &mut cal,
            "v 1                                        \n",
            &mut out,
        );
        assert_eq!(out.as_str(), "error: line longer than 32 characters\n");
        assert_eq!(cal.get(0), FACTORY_LEVELS[0]);

        // the next line works again
        send(&mut menu, &mut cal, "v 1\n", &mut out);
        assert_eq!(cal.get(0), 1);
    }

    #[test]
    fn auto_scan_sweeps_every_note_and_changes_nothing() {
        let (mut menu, mut cal, mut out) = setup();
        menu.apply(Command::AutoScan, &mut cal, 1_000, &mut out).unwrap();

        assert_eq!(menu.scanning_note(1_000), Some(0));
        assert_eq!(menu.scanning_note(1_099), Some(0));
        assert_eq!(menu.scanning_note(1_100), Some(1));
        assert_eq!(menu.output_level(&cal, 1_100), FACTORY_LEVELS[1]);
        assert_eq!(menu.scanning_note(1_000 + 36 * 100), Some(MAX_NOTE_INDEX));

        // finished, back to the active note
        assert_eq!(menu.scanning_note(1_000 + 37 * 100), None);
        assert_eq!(menu.output_level(&cal, 1_000 + 37 * 100), FACTORY_LEVELS[0]);

        assert_eq!(cal.table(), &CalibrationTable::factory());
    }

    #[test]
    fn any_command_stops_the_scan() {
        let (mut menu, mut cal, mut out) = setup();
        menu.apply(Command::AutoScan, &mut cal, 0, &mut out).unwrap();
        assert!(menu.scanning_note(500).is_some());

        menu.apply(Command::Status, &mut cal, 500, &mut out).unwrap();
        assert_eq!(menu.scanning_note(500), None);
    }

    #[test]
    fn output_plays_the_active_note() {
        let (mut menu, mut cal, mut out) = setup();
        send(&mut menu, &mut cal, "i 12\n", &mut out);
        assert_eq!(menu.output_level(&cal, 0), FACTORY_LEVELS[12]);
    }
}
