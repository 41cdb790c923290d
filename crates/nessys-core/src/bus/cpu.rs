use tracing::{debug, trace};

use crate::{
    bus::Bus,
    controller::{Controllers, PORTS},
    cpu::CpuMemory,
    memory::{apu as apu_mem, cpu as cpu_mem, ppu as ppu_mem},
    mtu::{Mtu, cpu_non_mirrored_addr},
    ppu::Ppu,
};

/// Processor-visible bus. Static regions resolve through the MTU; whatever
/// the MTU leaves unmapped is dispatched to device registers, and anything
/// left after that lands in the fallback buffer.
///
/// Borrows the hardware from the owning `Nes` for the duration of an access.
#[derive(Debug)]
pub struct CpuBus<'a> {
    mtu: &'a Mtu,
    memory: &'a mut CpuMemory,
    ppu: &'a mut Ppu,
    controllers: &'a mut Controllers,
    /// Live button state sampled when the bus was borrowed.
    pads: [u8; PORTS],
}

impl<'a> CpuBus<'a> {
    pub(crate) fn new(
        mtu: &'a Mtu,
        memory: &'a mut CpuMemory,
        ppu: &'a mut Ppu,
        controllers: &'a mut Controllers,
        pads: [u8; PORTS],
    ) -> Self {
        Self {
            mtu,
            memory,
            ppu,
            controllers,
            pads,
        }
    }

    /// `$4014`: copies `page * 256 .. page * 256 + 256` into OAM.
    ///
    /// The source bytes are read through the bus like any other access and
    /// the transfer takes no processor cycles.
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut data = [0u8; ppu_mem::OAM_SIZE];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.read(base.wrapping_add(i as u16));
        }
        self.ppu.oam_dma(&data);
    }

    fn read_unmapped(&self, addr: u16) -> u8 {
        debug!(target: "nessys_core::bus", "unmapped CPU read at {addr:#06x}");
        self.memory.unmapped(addr)
    }

    fn write_unmapped(&mut self, addr: u16, data: u8) {
        debug!(target: "nessys_core::bus", "unmapped CPU write of {data:#04x} at {addr:#06x}");
        self.memory.unmapped[addr as usize] = data;
    }
}

impl Bus for CpuBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        let folded = cpu_non_mirrored_addr(addr);
        if let Some(slot) = self.mtu.translate_cpu(folded) {
            return self.memory.region(slot.region)[slot.offset];
        }

        match ppu_mem::Register::from_cpu_addr(folded) {
            Some(ppu_mem::Register::Status) => return self.ppu.read_status(),
            Some(ppu_mem::Register::OamData) => return self.ppu.read_oam_data(),
            Some(ppu_mem::Register::Data) => return self.ppu.read_data(self.mtu),
            // Write-only registers read like any unmapped address.
            Some(_) | None => {}
        }

        match folded {
            cpu_mem::CONTROLLER_PORT_1 => self.controllers.read(0, self.pads),
            cpu_mem::CONTROLLER_PORT_2 => self.controllers.read(1, self.pads),
            apu_mem::STATUS => 0,
            _ => self.read_unmapped(addr),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        let folded = cpu_non_mirrored_addr(addr);
        if folded >= cpu_mem::PRG_ROM_START {
            trace!(target: "nessys_core::bus", "dropped ROM write at {addr:#06x}");
            return;
        }
        if let Some(slot) = self.mtu.translate_cpu(folded) {
            self.memory.region_mut(slot.region)[slot.offset] = data;
            return;
        }

        if let Some(register) = ppu_mem::Register::from_cpu_addr(folded) {
            match register {
                ppu_mem::Register::Control => self.ppu.write_control(data),
                ppu_mem::Register::Mask => self.ppu.write_mask(data),
                ppu_mem::Register::OamAddr => self.ppu.write_oam_addr(data),
                ppu_mem::Register::OamData => self.ppu.write_oam_data(data),
                ppu_mem::Register::Scroll => self.ppu.write_scroll(data),
                ppu_mem::Register::Addr => self.ppu.write_addr(data),
                ppu_mem::Register::Data => self.ppu.write_data(self.mtu, data),
                ppu_mem::Register::Status => self.write_unmapped(addr, data),
            }
            return;
        }

        match folded {
            ppu_mem::OAM_DMA => self.oam_dma(data),
            cpu_mem::CONTROLLER_PORT_1 => self.controllers.write_strobe(data, self.pads),
            // Audio registers (including the `$4017` frame counter) are inert.
            _ if apu_mem::is_register(folded) => {}
            _ => self.write_unmapped(addr, data),
        }
    }
}
