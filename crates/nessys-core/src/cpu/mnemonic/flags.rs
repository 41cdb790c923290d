use crate::cpu::Cpu;

impl Cpu {
    /// CLC - Clear Carry Flag
    pub fn clc(&mut self) {
        self.p.set_c(false);
    }

    /// CLD - Clear Decimal Mode
    pub fn cld(&mut self) {
        self.p.set_d(false);
    }

    /// CLI - Clear Interrupt Disable
    pub fn cli(&mut self) {
        self.p.set_i(false);
    }

    /// CLV - Clear Overflow Flag
    pub fn clv(&mut self) {
        self.p.set_v(false);
    }

    /// SEC - Set Carry Flag
    pub fn sec(&mut self) {
        self.p.set_c(true);
    }

    /// SED - Set Decimal Mode
    pub fn sed(&mut self) {
        self.p.set_d(true);
    }

    /// SEI - Set Interrupt Disable
    pub fn sei(&mut self) {
        self.p.set_i(true);
    }
}
