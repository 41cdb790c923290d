use crate::cpu::Cpu;

impl Cpu {
    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// LDA - Load Accumulator with Memory
    /// Operation: M → A
    pub fn lda(&mut self, m: u8) {
        self.a = m;
        self.p.set_zn(self.a);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// LDX - Load Index Register X From Memory
    /// Operation: M → X
    pub fn ldx(&mut self, m: u8) {
        self.x = m;
        self.p.set_zn(self.x);
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// LDY - Load Index Register Y From Memory
    /// Operation: M → Y
    pub fn ldy(&mut self, m: u8) {
        self.y = m;
        self.p.set_zn(self.y);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    #[test]
    fn loads_set_zero_and_negative() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.lda(0x80);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.p().n());
        cpu.ldx(0x00);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.p().z() && !cpu.p().n());
        cpu.ldy(0x7F);
        assert_eq!(cpu.y(), 0x7F);
        assert!(!cpu.p().z() && !cpu.p().n());
    }
}
