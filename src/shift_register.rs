/// A 16 step binary shift register is represented here.
///
/// Position 0 holds the most recently inserted bit, position 15 the oldest. Internally position `i` lives in bit
/// `15 - i`, so the 8 newest positions are also the most significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftRegister {
    bits: u16,
}

impl ShiftRegister {
    /// `ShiftRegister::new()` is a new shift register with every position cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// `ShiftRegister::from_bits(b)` is a new shift register holding the raw bit pattern `b`, position 0 is the MSB
    pub fn from_bits(bits: u16) -> Self {
        Self { bits }
    }

    /// `sr.shift_in(b)` moves every position one step older, dropping the oldest, and inserts `b` at position 0
    pub fn shift_in(&mut self, bit: bool) {
        self.bits = (self.bits >> 1) | ((bit as u16) << (LEN - 1));
    }

    /// `sr.get(p)` is the bit at position `p`, positions past the end are clamped to the oldest position
    pub fn get(&self, position: usize) -> bool {
        let position = position.min(LEN - 1);
        (self.bits >> (LEN - 1 - position)) & 1 == 1
    }

    /// `sr.value()` is the 8 newest positions packed into a byte, position 0 is the most significant bit
    pub fn value(&self) -> u8 {
        (self.bits >> 8) as u8
    }

    /// `sr.bits()` is the raw bit pattern of the whole register, position 0 is the MSB
    pub fn bits(&self) -> u16 {
        self.bits
    }
}

/// The number of positions in the shift register
pub const LEN: usize = 16;
