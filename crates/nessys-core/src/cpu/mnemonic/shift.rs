use crate::cpu::{Cpu, status::BIT_7};

impl Cpu {
    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// ASL - Arithmetic Shift Left
    /// Operation: C ← /M7...M0/ ← 0
    pub fn asl(&mut self, m: u8) -> u8 {
        self.p.set_c(m & BIT_7 != 0);
        let result = m << 1;
        self.p.set_zn(result);
        result
    }

    /// NV-BDIZC
    /// 0-----✓✓
    ///
    /// LSR - Logical Shift Right
    /// Operation: 0 → /M7...M0/ → C
    pub fn lsr(&mut self, m: u8) -> u8 {
        self.p.set_c(m & 0x01 != 0);
        let result = m >> 1;
        self.p.set_zn(result);
        result
    }

    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// ROL - Rotate Left
    /// Operation: C ← /M7...M0/ ← C
    pub fn rol(&mut self, m: u8) -> u8 {
        let wide = ((m as u16) << 1) | self.p.c() as u16;
        self.p.set_c(wide > 0xFF);
        let result = wide as u8;
        self.p.set_zn(result);
        result
    }

    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// ROR - Rotate Right
    /// Operation: C → /M7...M0/ → C
    pub fn ror(&mut self, m: u8) -> u8 {
        let wide = m as u16 | ((self.p.c() as u16) << 8);
        self.p.set_c(wide & 0x01 != 0);
        let result = (wide >> 1) as u8;
        self.p.set_zn(result);
        result
    }

    /// ASL A
    pub fn asl_a(&mut self) {
        self.a = self.asl(self.a);
    }

    /// LSR A
    pub fn lsr_a(&mut self) {
        self.a = self.lsr(self.a);
    }

    /// ROL A
    pub fn rol_a(&mut self) {
        self.a = self.rol(self.a);
    }

    /// ROR A
    pub fn ror_a(&mut self) {
        self.a = self.ror(self.a);
    }
}
