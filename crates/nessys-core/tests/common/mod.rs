#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use nessys_core::{
    Mirroring, Nes, Program,
    cartridge::Cartridge,
    control::{Controls, Speed},
    sync,
};

pub const PRG_LEN: usize = 0x4000;
pub const CHR_LEN: usize = 0x2000;

/// PRG filled with `i & 0xFF`, CHR filled with `!i & 0xFF`.
pub fn cartridge(mirroring: Mirroring) -> Cartridge {
    let prg: Vec<u8> = (0..PRG_LEN).map(|i| i as u8).collect();
    let chr: Vec<u8> = (0..CHR_LEN).map(|i| !(i as u8)).collect();
    Cartridge::new(prg, chr, mirroring)
}

/// A console with vertical mirroring, running unthrottled.
pub fn nes() -> Result<Nes> {
    nes_with(Mirroring::Vertical)
}

pub fn nes_with(mirroring: Mirroring) -> Result<Nes> {
    let controls = Arc::new(Controls::new());
    let nes = Nes::new(&cartridge(mirroring), controls).context("powering on")?;
    nes.controls().set_speed(Speed::Unbounded);
    Ok(nes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Reset,
    Nmi,
    Irq,
    /// A sync inside a handler asked it to stop.
    Aborted,
}

/// Test program whose handlers record what they saw.
#[derive(Debug, Default)]
pub struct Scripted {
    pub events: Vec<Event>,
    /// Flag byte on top of the stack when each handler was entered.
    pub pushed_flags: Vec<u8>,
    /// Syncs of one cycle each the reset entry runs before returning.
    pub reset_syncs: u32,
    /// Syncs of one cycle each the NMI handler runs.
    pub nmi_syncs: u32,
    /// Requests an IRQ from inside the NMI handler before its first sync.
    pub irq_inside_nmi: bool,
}

impl Scripted {
    pub fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    fn record_entry(&mut self, nes: &Nes, event: Event) {
        self.events.push(event);
        let top = nes.cpu.s().wrapping_add(1);
        self.pushed_flags.push(nes.cpu.stack_peek(top));
    }
}

impl Program for Scripted {
    fn reset(&mut self, nes: &mut Nes) -> bool {
        self.events.push(Event::Reset);
        for _ in 0..self.reset_syncs {
            sync!(nes, self, 1);
        }
        false
    }

    fn nmi(&mut self, nes: &mut Nes) -> bool {
        self.record_entry(nes, Event::Nmi);
        if self.irq_inside_nmi {
            nes.cpu.interrupts_mut().request_irq();
        }
        for _ in 0..self.nmi_syncs {
            if nes.sync(&mut *self, 1) {
                self.events.push(Event::Aborted);
                return true;
            }
        }
        false
    }

    fn irq(&mut self, nes: &mut Nes) -> bool {
        self.record_entry(nes, Event::Irq);
        false
    }
}
