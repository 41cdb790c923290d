use crate::cpu::{Cpu, status::BIT_7};

impl Cpu {
    /// NV-BDIZC
    /// ✓✓----✓✓
    ///
    /// ADC - Add Memory to Accumulator with Carry
    /// Operation: A + M + C → A, C
    ///
    /// Decimal mode is ignored, as on the 2A03.
    pub fn adc(&mut self, m: u8) {
        let sum = self.a as u16 + m as u16 + self.p.c() as u16;
        let result = sum as u8;
        self.p.set_c(sum > 0xFF);
        self.p.set_v((!(self.a ^ m) & (self.a ^ result) & BIT_7) != 0);
        self.a = result;
        self.p.set_zn(result);
    }

    /// NV-BDIZC
    /// ✓✓----✓✓
    ///
    /// SBC - Subtract Memory from Accumulator with Borrow
    /// Operation: A - M - ~C → A
    ///
    /// Carry ends up set when the subtraction did not borrow.
    pub fn sbc(&mut self, m: u8) {
        let diff = self.a as i16 - m as i16 - (1 - self.p.c() as i16);
        let result = diff as u8;
        self.p.set_c(diff >= 0);
        self.p.set_v(((self.a ^ m) & (self.a ^ result) & BIT_7) != 0);
        self.a = result;
        self.p.set_zn(result);
    }

    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// CMP - Compare Memory and Accumulator
    /// Operation: A - M
    pub fn cmp(&mut self, m: u8) {
        self.compare(self.a, m);
    }

    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// CPX - Compare Index Register X To Memory
    /// Operation: X - M
    pub fn cpx(&mut self, m: u8) {
        self.compare(self.x, m);
    }

    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// CPY - Compare Index Register Y To Memory
    /// Operation: Y - M
    pub fn cpy(&mut self, m: u8) {
        self.compare(self.y, m);
    }

    fn compare(&mut self, register: u8, m: u8) {
        self.p.set_c(register >= m);
        self.p.set_zn(register.wrapping_sub(m));
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    fn cpu_with(a: u8, carry: bool) -> Cpu {
        let mut cpu = Cpu::new(Vec::new());
        cpu.lda(a);
        cpu.p.set_c(carry);
        cpu
    }

    #[test]
    fn adc_matches_reference_for_every_input() {
        for a in 0..=0xFFu8 {
            for m in 0..=0xFFu8 {
                for carry in [false, true] {
                    let mut cpu = cpu_with(a, carry);
                    cpu.adc(m);

                    let sum = a as u32 + m as u32 + carry as u32;
                    let result = (sum & 0xFF) as u8;
                    assert_eq!(cpu.a(), result, "a={a:#04x} m={m:#04x} c={carry}");
                    assert_eq!(cpu.p().c(), sum > 0xFF);
                    assert_eq!(cpu.p().z(), result == 0);
                    assert_eq!(cpu.p().n(), result & 0x80 != 0);
                    assert_eq!(cpu.p().v(), !(a ^ m) & (a ^ result) & 0x80 != 0);
                    assert!(cpu.p().contains(crate::cpu::Status::UNUSED));
                }
            }
        }
    }

    #[test]
    fn sbc_matches_reference_for_every_input() {
        for a in 0..=0xFFu8 {
            for m in 0..=0xFFu8 {
                for carry in [false, true] {
                    let mut cpu = cpu_with(a, carry);
                    cpu.sbc(m);

                    let wide = (a as u16)
                        .wrapping_sub(m as u16)
                        .wrapping_sub(1 - carry as u16);
                    let result = (wide & 0xFF) as u8;
                    assert_eq!(cpu.a(), result, "a={a:#04x} m={m:#04x} c={carry}");
                    assert_eq!(cpu.p().c(), wide <= 0xFF);
                    assert_eq!(cpu.p().z(), result == 0);
                    assert_eq!(cpu.p().n(), result & 0x80 != 0);
                    assert_eq!(cpu.p().v(), (a ^ m) & (a ^ result) & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn adc_signed_overflow_cases() {
        let mut cpu = cpu_with(0x50, false);
        cpu.adc(0x50);
        assert_eq!(cpu.a(), 0xA0);
        assert!(cpu.p().v() && cpu.p().n() && !cpu.p().c());

        let mut cpu = cpu_with(0xFF, true);
        cpu.adc(0x00);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.p().c() && cpu.p().z() && !cpu.p().v());
    }

    #[test]
    fn sbc_borrow_clears_carry() {
        let mut cpu = cpu_with(0x00, true);
        cpu.sbc(0x01);
        assert_eq!(cpu.a(), 0xFF);
        assert!(!cpu.p().c());

        let mut cpu = cpu_with(0x05, false);
        cpu.sbc(0x04);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.p().c() && cpu.p().z());
    }

    #[test]
    fn compare_family() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.lda(0x40);
        cpu.cmp(0x40);
        assert!(cpu.p().c() && cpu.p().z() && !cpu.p().n());
        cpu.cmp(0x41);
        assert!(!cpu.p().c() && !cpu.p().z() && cpu.p().n());

        cpu.ldx(0x10);
        cpu.cpx(0x01);
        assert!(cpu.p().c() && !cpu.p().z());

        cpu.ldy(0x00);
        cpu.cpy(0x80);
        // 0x00 - 0x80 = 0x80
        assert!(!cpu.p().c() && cpu.p().n());
        assert_eq!(cpu.y(), 0x00);
    }
}
