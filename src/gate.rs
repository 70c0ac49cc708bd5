//! Digital input helpers.
//!
//! The trigger input is not debounced: every LOW to HIGH transition between two polls is exactly one edge, no matter
//! how long the signal stays high. The front panel button is a mechanical switch and is debounced.

/// A rising edge detector is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeDetector {
    last: bool,
}

impl EdgeDetector {
    /// `EdgeDetector::new()` is a new edge detector which assumes the input starts out low
    pub fn new() -> Self {
        Self::default()
    }

    /// `ed.update(l)` is true iff level `l` is high and the previous level was low
    pub fn update(&mut self, level: bool) -> bool {
        let rising = level && !self.last;
        self.last = level;
        rising
    }
}

/// A debounced push button is represented here.
///
/// Once a change of level is accepted, further changes are ignored until the cooldown window has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncedButton {
    cooldown_ms: u32,
    pressed: bool,
    last_change_ms: Option<u32>,
}

impl DebouncedButton {
    /// `DebouncedButton::new(c)` is a new released button which ignores changes within `c` milliseconds of the last one
    pub fn new(cooldown_ms: u32) -> Self {
        Self {
            cooldown_ms,
            pressed: false,
            last_change_ms: None,
        }
    }

    /// `btn.update(l, t)` feeds raw level `l` sampled at time `t` milliseconds, is true iff a press was just accepted
    ///
    /// The millisecond clock may wrap around.
    pub fn update(&mut self, level: bool, now_ms: u32) -> bool {
        if level == self.pressed {
            return false;
        }

        if let Some(last) = self.last_change_ms {
            if now_ms.wrapping_sub(last) < self.cooldown_ms {
                return false;
            }
        }

        self.pressed = level;
        self.last_change_ms = Some(now_ms);
        level
    }

    /// `btn.is_pressed()` is the debounced state of the button
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
