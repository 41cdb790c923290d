use core::ops::{Deref, DerefMut};

/// Fixed-size, zero-initialised byte block.
///
/// Storage lives on the heap so the large regions (the 64 KiB fallback
/// buffer in particular) never pass through the stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ram<const N: usize>(Box<[u8]>);

pub mod cpu {
    use crate::memory::{PAGE_SIZE, cpu as cpu_mem};

    pub type ZeroPage = super::Ram<PAGE_SIZE>;
    pub type StackPage = super::Ram<PAGE_SIZE>;
    pub type WorkRam = super::Ram<{ (cpu_mem::RAM_END - cpu_mem::RAM_START) as usize }>;
    pub type Sram = super::Ram<{ cpu_mem::SRAM_SIZE }>;
    pub type Unmapped = super::Ram<{ cpu_mem::UNMAPPED_SIZE }>;
}

pub mod ppu {
    use crate::memory::ppu as ppu_mem;

    pub type PatternTables = super::Ram<{ ppu_mem::CHR_SIZE }>;
    pub type Nametable = super::Ram<{ ppu_mem::NAMETABLE_SIZE }>;
    pub type Oam = super::Ram<{ ppu_mem::OAM_SIZE }>;
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self(vec![0; N].into_boxed_slice())
    }

    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for Ram<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<const N: usize> DerefMut for Ram<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}
