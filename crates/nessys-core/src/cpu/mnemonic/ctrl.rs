use crate::cpu::Cpu;

impl Cpu {
    /// NV-BDIZC
    /// --------
    ///
    /// BRK - Break Command
    ///
    /// Latches an IRQ request unless interrupts are disabled. The handler runs
    /// at the next sync checkpoint.
    pub fn brk(&mut self) {
        if !self.p.i() {
            self.interrupts.request_irq();
        }
    }

    /// NV-BDIZC
    /// ✓✓--✓✓✓✓
    ///
    /// RTI - Return From Interrupt
    ///
    /// Only the flag byte is restored; return addresses are native.
    pub fn rti(&mut self) {
        let flags = self.pop();
        self.set_p(flags);
    }

    /// NOP - No Operation
    pub fn nop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    #[test]
    fn brk_respects_interrupt_disable() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.sei();
        cpu.brk();
        assert!(!cpu.interrupts().irq_pending());
        cpu.cli();
        cpu.brk();
        assert!(cpu.interrupts().irq_pending());
        assert!(!cpu.interrupts().nmi_pending());
    }

    #[test]
    fn rti_restores_flags_with_unused_bit() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.push(0xC3);
        cpu.rti();
        assert_eq!(cpu.p().to_byte(), 0xE3);
        assert_eq!(cpu.s(), 0xFF);
    }
}
