use crate::cpu::Cpu;

impl Cpu {
    /// NV-BDIZC
    /// --------
    ///
    /// PHA - Push Accumulator On Stack
    pub fn pha(&mut self) {
        self.push(self.a);
    }

    /// NV-BDIZC
    /// --------
    ///
    /// PHP - Push Processor Status On Stack
    pub fn php(&mut self) {
        self.push(self.p.to_byte());
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// PLA - Pull Accumulator From Stack
    pub fn pla(&mut self) {
        self.a = self.pop();
        self.p.set_zn(self.a);
    }

    /// NV-BDIZC
    /// ✓✓--✓✓✓✓
    ///
    /// PLP - Pull Processor Status From Stack
    pub fn plp(&mut self) {
        let flags = self.pop();
        self.set_p(flags);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    #[test]
    fn pha_pla_round_trip() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.lda(0x80);
        cpu.pha();
        assert_eq!(cpu.s(), 0xFE);
        cpu.lda(0x00);
        cpu.pla();
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.p().n() && !cpu.p().z());
        assert_eq!(cpu.s(), 0xFF);
    }

    #[test]
    fn plp_keeps_unused_bit() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.push(0x00);
        cpu.plp();
        assert_eq!(cpu.p().to_byte(), 0x20);

        cpu.sec();
        cpu.php();
        cpu.clc();
        cpu.plp();
        assert!(cpu.p().c());
    }
}
