//! Standard 8-button pads readable through `$4016/$4017`.
//!
//! The live button state is owned by the presentation side (see
//! [`crate::control::Controls`]); this module only models the strobe latch
//! and the two shift registers the program reads bit by bit.

/// Button ordering follows the NES shift register bit layout (A first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Bit mask of this button inside a pad state byte.
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Number of controller ports.
pub const PORTS: usize = 2;

/// Shared strobe plus one shift register per port.
///
/// While the strobe is high every read reloads the registers from the live
/// state; once it drops, reads shift one button out per access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controllers {
    strobe: bool,
    registers: [u8; PORTS],
}

impl Controllers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Reads the next button bit of `port`.
    pub fn read(&mut self, port: usize, live: [u8; PORTS]) -> u8 {
        if self.strobe {
            self.reload(live);
        }
        let Some(register) = self.registers.get_mut(port) else {
            return 0;
        };
        let bit = *register & 1;
        if !self.strobe {
            *register >>= 1;
        }
        bit
    }

    /// Writes to the `$4016` strobe bit, shared by both ports.
    pub fn write_strobe(&mut self, data: u8, live: [u8; PORTS]) {
        let strobe = data & 1 != 0;
        // Falling edge latches the buttons for sequential reads.
        if self.strobe && !strobe {
            self.reload(live);
        }
        self.strobe = strobe;
    }

    pub fn strobe(&self) -> bool {
        self.strobe
    }

    fn reload(&mut self, live: [u8; PORTS]) {
        self.registers = live;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(pads: &mut Controllers, port: usize, live: [u8; PORTS]) -> Vec<u8> {
        (0..8).map(|_| pads.read(port, live)).collect()
    }

    #[test]
    fn strobe_falling_edge_latches_and_shifts() {
        let live = [
            Button::A.mask() | Button::Start.mask() | Button::Right.mask(),
            0,
        ];
        let mut pads = Controllers::new();
        pads.write_strobe(1, live);
        pads.write_strobe(0, live);
        assert_eq!(read_all(&mut pads, 0, live), vec![1, 0, 0, 1, 0, 0, 0, 1]);
        // Shifted out completely.
        assert_eq!(pads.read(0, live), 0);
    }

    #[test]
    fn strobe_high_reports_live_a_button() {
        let mut pads = Controllers::new();
        pads.write_strobe(1, [0, 0]);
        assert_eq!(pads.read(0, [Button::A.mask(), 0]), 1);
        assert_eq!(pads.read(0, [Button::A.mask(), 0]), 1);
        assert_eq!(pads.read(0, [Button::B.mask(), 0]), 0);
    }

    #[test]
    fn ports_shift_independently() {
        let live = [Button::B.mask(), Button::A.mask() | Button::Up.mask()];
        let mut pads = Controllers::new();
        pads.write_strobe(1, live);
        pads.write_strobe(0, live);
        assert_eq!(read_all(&mut pads, 1, live), vec![1, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(read_all(&mut pads, 0, live), vec![0, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn live_changes_after_latch_are_not_seen() {
        let mut pads = Controllers::new();
        pads.write_strobe(1, [0, 0]);
        pads.write_strobe(0, [0, 0]);
        assert_eq!(pads.read(0, [0xFF, 0xFF]), 0);
    }

    #[test]
    fn rising_edge_alone_does_not_latch() {
        let mut pads = Controllers::new();
        pads.write_strobe(1, [0xFF, 0]);
        // Still strobed: reads reload from the state passed at read time.
        assert_eq!(pads.read(0, [0, 0]), 0);
    }
}
