use std::fmt::Debug;

pub mod cpu;

pub use cpu::CpuBus;

/// Byte-addressed access to one address space.
///
/// 16-bit accesses are little endian and composed of two byte accesses, so
/// device side effects happen once per byte.
pub trait Bus: Debug {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, data: u8);

    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    fn write16(&mut self, addr: u16, data: u16) {
        let [lo, hi] = data.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }
}
