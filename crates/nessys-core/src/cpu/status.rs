use bitflags::bitflags;

pub(crate) const BIT_6: u8 = 0b0100_0000;
pub(crate) const BIT_7: u8 = 0b1000_0000;

bitflags! {
    /// Represents the 8-bit processor status register (P) of the NES CPU.
    ///
    /// Bit layout:
    /// 7 6 5 4 3 2 1 0
    /// N V _ B D I Z C
    ///
    /// The unused bit reads back as set after every whole-byte write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry flag (C)
        const CARRY     = 0b0000_0001;

        /// Zero flag (Z)
        const ZERO      = 0b0000_0010;

        /// Interrupt Disable flag (I)
        /// When set, BRK does not raise an IRQ request.
        const INTERRUPT = 0b0000_0100;

        /// Decimal Mode flag (D)
        /// Has no effect on the NES CPU but can still be set and cleared.
        const DECIMAL   = 0b0000_1000;

        /// Break Command flag (B)
        const BREAK     = 0b0001_0000;

        /// Unused bit, always 1.
        const UNUSED    = 0b0010_0000;

        /// Overflow flag (V)
        const OVERFLOW  = 0b0100_0000;

        /// Negative flag (N)
        /// Reflects the sign bit (bit 7) of the result of the last operation.
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::UNUSED
    }
}

impl Status {
    /// Power-on state: every flag clear except the unused bit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load flags from a byte value, forcing the unused bit.
    pub fn from_byte(byte: u8) -> Self {
        Status::from_bits_retain(byte) | Status::UNUSED
    }

    /// Convert the flags to a byte.
    pub fn to_byte(self) -> u8 {
        self.bits()
    }

    pub fn c(self) -> bool {
        self.contains(Status::CARRY)
    }

    pub fn z(self) -> bool {
        self.contains(Status::ZERO)
    }

    pub fn i(self) -> bool {
        self.contains(Status::INTERRUPT)
    }

    pub fn d(self) -> bool {
        self.contains(Status::DECIMAL)
    }

    pub fn b(self) -> bool {
        self.contains(Status::BREAK)
    }

    pub fn v(self) -> bool {
        self.contains(Status::OVERFLOW)
    }

    pub fn n(self) -> bool {
        self.contains(Status::NEGATIVE)
    }

    pub fn set_c(&mut self, value: bool) {
        self.set(Status::CARRY, value);
    }

    pub fn set_z(&mut self, value: bool) {
        self.set(Status::ZERO, value);
    }

    pub fn set_i(&mut self, value: bool) {
        self.set(Status::INTERRUPT, value);
    }

    pub fn set_d(&mut self, value: bool) {
        self.set(Status::DECIMAL, value);
    }

    pub fn set_b(&mut self, value: bool) {
        self.set(Status::BREAK, value);
    }

    pub fn set_v(&mut self, value: bool) {
        self.set(Status::OVERFLOW, value);
    }

    pub fn set_n(&mut self, value: bool) {
        self.set(Status::NEGATIVE, value);
    }

    /// Updates Z and N from a result byte.
    pub fn set_zn(&mut self, value: u8) {
        self.set_z(value == 0);
        self.set_n(value & BIT_7 != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_bit_survives_byte_writes() {
        assert_eq!(Status::from_byte(0x00).to_byte(), 0x20);
        assert_eq!(Status::from_byte(0xDF).to_byte(), 0xFF);
        assert_eq!(Status::new().to_byte(), 0x20);
    }

    #[test]
    fn set_zn_tracks_result() {
        let mut p = Status::new();
        p.set_zn(0);
        assert!(p.z() && !p.n());
        p.set_zn(0x80);
        assert!(!p.z() && p.n());
        p.set_zn(0x7F);
        assert!(!p.z() && !p.n());
    }
}
