use crate::cpu::Cpu;

impl Cpu {
    /// TAX - Transfer Accumulator To Index X
    pub fn tax(&mut self) {
        self.x = self.a;
        self.p.set_zn(self.x);
    }

    /// TAY - Transfer Accumulator To Index Y
    pub fn tay(&mut self) {
        self.y = self.a;
        self.p.set_zn(self.y);
    }

    /// TSX - Transfer Stack Pointer To Index X
    pub fn tsx(&mut self) {
        self.x = self.s;
        self.p.set_zn(self.x);
    }

    /// TXA - Transfer Index X To Accumulator
    pub fn txa(&mut self) {
        self.a = self.x;
        self.p.set_zn(self.a);
    }

    /// TXS - Transfer Index X To Stack Pointer
    ///
    /// Flags are not affected.
    pub fn txs(&mut self) {
        self.s = self.x;
    }

    /// TYA - Transfer Index Y To Accumulator
    pub fn tya(&mut self) {
        self.a = self.y;
        self.p.set_zn(self.a);
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::Cpu;

    #[test]
    fn transfers_copy_and_flag() {
        let mut cpu = Cpu::new(Vec::new());
        cpu.lda(0x90);
        cpu.tax();
        cpu.tay();
        assert_eq!((cpu.x(), cpu.y()), (0x90, 0x90));
        assert!(cpu.p().n());

        cpu.tsx();
        assert_eq!(cpu.x(), 0xFF);
        cpu.ldx(0x00);
        cpu.txs();
        // TXS leaves Z untouched from the LDX.
        assert!(cpu.p().z());
        assert_eq!(cpu.s(), 0x00);

        cpu.ldy(0x05);
        cpu.tya();
        assert_eq!(cpu.a(), 0x05);
        cpu.ldx(0x00);
        cpu.txa();
        assert!(cpu.p().z());
    }
}
