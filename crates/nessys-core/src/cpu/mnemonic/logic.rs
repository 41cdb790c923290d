use crate::cpu::{
    Cpu,
    status::{BIT_6, BIT_7},
};

impl Cpu {
    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// AND - "AND" Memory with Accumulator
    /// Operation: A ∧ M → A
    pub fn and(&mut self, m: u8) {
        self.a &= m;
        self.p.set_zn(self.a);
    }

    /// NV-BDIZC
    /// ✓✓----✓-
    ///
    /// BIT - Test Bits in Memory with Accumulator
    /// Operation: A ∧ M, M7 → N, M6 → V
    ///
    /// The accumulator is left untouched.
    pub fn bit(&mut self, m: u8) {
        self.p.set_v(m & BIT_6 != 0);
        self.p.set_z(m & self.a == 0);
        self.p.set_n(m & BIT_7 != 0);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// EOR - "Exclusive OR" Memory with Accumulator
    /// Operation: A ⊻ M → A
    pub fn eor(&mut self, m: u8) {
        self.a ^= m;
        self.p.set_zn(self.a);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// ORA - "OR" Memory with Accumulator
    /// Operation: A ∨ M → A
    pub fn ora(&mut self, m: u8) {
        self.a |= m;
        self.p.set_zn(self.a);
    }
}
