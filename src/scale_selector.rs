use crate::{gate::DebouncedButton, quantizer::Scale};

/// A front panel button which steps through the available scales is represented here.
///
/// The selection always starts at `Scale::Major` and is not persisted.
pub struct ScaleSelector {
    button: DebouncedButton,
    scale: Scale,
}

impl ScaleSelector {
    /// `ScaleSelector::new(c)` is a new scale selector whose button ignores changes within `c` milliseconds
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            button: DebouncedButton::new(debounce_ms),
            scale: Scale::default(),
        }
    }

    /// `ss.update(l, t)` feeds raw button level `l` sampled at time `t`, is true iff the scale just changed
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> bool {
        if self.button.update(pressed, now_ms) {
            self.scale = self.scale.next();
            log::info!("scale changed to {}", self.scale.name());
            true
        } else {
            false
        }
    }

    /// `ss.scale()` is the currently selected scale
    pub fn scale(&self) -> Scale {
        self.scale
    }
}
