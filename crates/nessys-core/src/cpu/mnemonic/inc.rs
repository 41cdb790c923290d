use crate::cpu::Cpu;

impl Cpu {
    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// INC - Increment Memory By One
    /// Operation: M + 1 → M
    pub fn inc(&mut self, m: u8) -> u8 {
        let result = m.wrapping_add(1);
        self.p.set_zn(result);
        result
    }

    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// DEC - Decrement Memory By One
    /// Operation: M - 1 → M
    pub fn dec(&mut self, m: u8) -> u8 {
        let result = m.wrapping_sub(1);
        self.p.set_zn(result);
        result
    }

    /// INX - Increment Index Register X By One
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.p.set_zn(self.x);
    }

    /// INY - Increment Index Register Y By One
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.p.set_zn(self.y);
    }

    /// DEX - Decrement Index Register X By One
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.p.set_zn(self.x);
    }

    /// DEY - Decrement Index Register Y By One
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.p.set_zn(self.y);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    #[test]
    fn memory_inc_dec_wrap() {
        let mut cpu = Cpu::new(Vec::new());
        assert_eq!(cpu.inc(0xFF), 0x00);
        assert!(cpu.p().z());
        assert_eq!(cpu.dec(0x00), 0xFF);
        assert!(cpu.p().n());
    }

    #[test]
    fn index_inc_dec_wrap() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.dex();
        assert_eq!(cpu.x(), 0xFF);
        cpu.inx();
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.p().z());
        cpu.iny();
        cpu.dey();
        cpu.dey();
        assert_eq!(cpu.y(), 0xFF);
        assert!(cpu.p().n());
    }
}
