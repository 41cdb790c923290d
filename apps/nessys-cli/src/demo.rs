//! A small hand-translated program: a scrolling checkerboard with a sprite
//! steered by pad 1.
//!
//! Written the way the translator emits code: one Rust statement per
//! original instruction, a `sync!` after each with that instruction's cycle
//! count, and branches turned into structured control flow.

use nessys_core::{Mirroring, Nes, Program, cartridge::Cartridge, sync};

const PPUCTRL: u16 = 0x2000;
const PPUMASK: u16 = 0x2001;
const PPUSTATUS: u16 = 0x2002;
const PPUSCROLL: u16 = 0x2005;
const PPUADDR: u16 = 0x2006;
const PPUDATA: u16 = 0x2007;
const OAMDMA: u16 = 0x4014;
const JOY1: u16 = 0x4016;

// Zero page
const FRAME: u16 = 0x0010;
const PAD: u16 = 0x0011;
const SCROLL: u16 = 0x0012;

const OAM_PAGE: u16 = 0x0200;
const SPRITE_Y: u16 = OAM_PAGE;
const SPRITE_X: u16 = OAM_PAGE + 3;

const PALETTE: [u8; 32] = [
    0x0F, 0x11, 0x21, 0x30, 0x0F, 0x16, 0x26, 0x36, 0x0F, 0x19, 0x29, 0x39, 0x0F, 0x13, 0x23,
    0x33, 0x0F, 0x27, 0x17, 0x07, 0x0F, 0x2A, 0x1A, 0x0A, 0x0F, 0x24, 0x14, 0x04, 0x0F, 0x2C,
    0x1C, 0x0C,
];

/// Tile 1: checker in colour 1. Tile 2: solid colour 3.
const TILES: [[u8; 16]; 2] = [
    [
        0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00,
    ],
    [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF,
    ],
];

// Pad bits after eight `ROL`s: A ends up in bit 7, Right in bit 0.
const PAD_UP: u8 = 0x08;
const PAD_DOWN: u8 = 0x04;
const PAD_LEFT: u8 = 0x02;
const PAD_RIGHT: u8 = 0x01;

/// Blank cartridge the demo runs from when no image is given.
pub fn cartridge() -> Cartridge {
    Cartridge::new(vec![0; 0x4000], vec![0; 0x2000], Mirroring::Vertical)
}

#[derive(Debug, Default)]
pub struct Demo;

impl Demo {
    /// `LDA #hi / STA $2006 / LDA #lo / STA $2006`
    fn set_ppu_addr(&mut self, nes: &mut Nes, addr: u16) -> bool {
        let [lo, hi] = addr.to_le_bytes();
        nes.cpu.lda(hi);
        sync!(nes, self, 2);
        nes.sta(PPUADDR);
        sync!(nes, self, 4);
        nes.cpu.lda(lo);
        sync!(nes, self, 2);
        nes.sta(PPUADDR);
        sync!(nes, self, 4);
        false
    }

    fn wait_vblank(&mut self, nes: &mut Nes) -> bool {
        loop {
            let status = nes.read8(PPUSTATUS);
            nes.cpu.bit(status);
            sync!(nes, self, 4);
            sync!(nes, self, 2);
            if nes.cpu.p().n() {
                return false;
            }
            sync!(nes, self, 1);
        }
    }

    fn upload_palette(&mut self, nes: &mut Nes) -> bool {
        if self.set_ppu_addr(nes, 0x3F00) {
            return true;
        }
        nes.cpu.ldx(0);
        sync!(nes, self, 2);
        loop {
            nes.cpu.lda(PALETTE[nes.cpu.x() as usize]);
            sync!(nes, self, 4);
            nes.sta(PPUDATA);
            sync!(nes, self, 4);
            nes.cpu.inx();
            sync!(nes, self, 2);
            nes.cpu.cpx(PALETTE.len() as u8);
            sync!(nes, self, 2);
            sync!(nes, self, 3);
            if nes.cpu.p().z() {
                return false;
            }
        }
    }

    fn upload_tiles(&mut self, nes: &mut Nes) -> bool {
        // Tiles 1 and 2 of the background pattern table.
        if self.set_ppu_addr(nes, 0x0010) {
            return true;
        }
        for byte in TILES.iter().flatten() {
            nes.cpu.lda(*byte);
            sync!(nes, self, 4);
            nes.sta(PPUDATA);
            sync!(nes, self, 4);
        }
        false
    }

    /// Checkerboard of tile 1 over the two horizontal nametables.
    fn fill_nametables(&mut self, nes: &mut Nes) -> bool {
        for base in [0x2000u16, 0x2400] {
            if self.set_ppu_addr(nes, base) {
                return true;
            }
            nes.cpu.ldy(30);
            sync!(nes, self, 2);
            loop {
                nes.cpu.ldx(32);
                sync!(nes, self, 2);
                loop {
                    nes.cpu.txa();
                    sync!(nes, self, 2);
                    nes.cpu.and(0x01);
                    sync!(nes, self, 2);
                    nes.sta(PPUDATA);
                    sync!(nes, self, 4);
                    nes.cpu.dex();
                    sync!(nes, self, 2);
                    sync!(nes, self, 3);
                    if nes.cpu.p().z() {
                        break;
                    }
                }
                nes.cpu.dey();
                sync!(nes, self, 2);
                sync!(nes, self, 3);
                if nes.cpu.p().z() {
                    break;
                }
            }
        }
        false
    }

    fn place_sprites(&mut self, nes: &mut Nes) -> bool {
        // Hide every sprite below the screen, then bring sprite 0 back.
        nes.cpu.lda(0xF0);
        sync!(nes, self, 2);
        nes.cpu.ldx(0);
        sync!(nes, self, 2);
        loop {
            nes.sta(OAM_PAGE + nes.cpu.x() as u16);
            sync!(nes, self, 5);
            nes.cpu.inx();
            sync!(nes, self, 2);
            sync!(nes, self, 3);
            if nes.cpu.p().z() {
                break;
            }
        }
        for (offset, value) in [112u8, 2, 0x00, 120].into_iter().enumerate() {
            nes.cpu.lda(value);
            sync!(nes, self, 2);
            nes.sta(OAM_PAGE + offset as u16);
            sync!(nes, self, 4);
        }
        false
    }

    fn read_pad(&mut self, nes: &mut Nes) -> bool {
        nes.cpu.lda(1);
        sync!(nes, self, 2);
        nes.sta(JOY1);
        sync!(nes, self, 4);
        nes.cpu.lda(0);
        sync!(nes, self, 2);
        nes.sta(JOY1);
        sync!(nes, self, 4);
        nes.cpu.ldx(8);
        sync!(nes, self, 2);
        loop {
            let bit = nes.read8(JOY1);
            nes.cpu.lda(bit);
            sync!(nes, self, 4);
            nes.cpu.lsr_a();
            sync!(nes, self, 2);
            nes.modify(PAD, |cpu, m| cpu.rol(m));
            sync!(nes, self, 5);
            nes.cpu.dex();
            sync!(nes, self, 2);
            sync!(nes, self, 3);
            if nes.cpu.p().z() {
                return false;
            }
        }
    }

    fn steer_sprite(&mut self, nes: &mut Nes) -> bool {
        for (mask, addr, step_up) in [
            (PAD_UP, SPRITE_Y, false),
            (PAD_DOWN, SPRITE_Y, true),
            (PAD_LEFT, SPRITE_X, false),
            (PAD_RIGHT, SPRITE_X, true),
        ] {
            let pad = nes.read8(PAD);
            nes.cpu.lda(pad);
            sync!(nes, self, 3);
            nes.cpu.and(mask);
            sync!(nes, self, 2);
            sync!(nes, self, 2);
            if nes.cpu.p().z() {
                continue;
            }
            if step_up {
                nes.modify(addr, |cpu, m| cpu.inc(m));
            } else {
                nes.modify(addr, |cpu, m| cpu.dec(m));
            }
            sync!(nes, self, 6);
        }
        false
    }
}

impl Program for Demo {
    fn reset(&mut self, nes: &mut Nes) -> bool {
        nes.cpu.sei();
        sync!(nes, self, 2);
        nes.cpu.cld();
        sync!(nes, self, 2);
        nes.cpu.ldx(0xFF);
        sync!(nes, self, 2);
        nes.cpu.txs();
        sync!(nes, self, 2);

        if self.wait_vblank(nes)
            || self.upload_palette(nes)
            || self.upload_tiles(nes)
            || self.fill_nametables(nes)
            || self.place_sprites(nes)
        {
            return true;
        }

        nes.cpu.lda(0x80);
        sync!(nes, self, 2);
        nes.sta(PPUCTRL);
        sync!(nes, self, 4);
        nes.cpu.lda(0x1E);
        sync!(nes, self, 2);
        nes.sta(PPUMASK);
        sync!(nes, self, 4);
        nes.cpu.cli();
        sync!(nes, self, 2);

        // Idle until the next NMI bumps the frame counter, forever.
        loop {
            let frame = nes.read8(FRAME);
            nes.cpu.lda(frame);
            sync!(nes, self, 3);
            loop {
                let now = nes.read8(FRAME);
                nes.cpu.cmp(now);
                sync!(nes, self, 3);
                sync!(nes, self, 3);
                if !nes.cpu.p().z() {
                    break;
                }
            }
        }
    }

    fn nmi(&mut self, nes: &mut Nes) -> bool {
        nes.cpu.pha();
        sync!(nes, self, 3);

        nes.cpu.lda(0x02);
        sync!(nes, self, 2);
        nes.sta(OAMDMA);
        sync!(nes, self, 4);

        nes.modify(SCROLL, |cpu, m| cpu.inc(m));
        sync!(nes, self, 5);
        let scroll = nes.read8(SCROLL);
        nes.cpu.lda(scroll);
        sync!(nes, self, 3);
        nes.sta(PPUSCROLL);
        sync!(nes, self, 4);
        nes.cpu.lda(0);
        sync!(nes, self, 2);
        nes.sta(PPUSCROLL);
        sync!(nes, self, 4);

        if self.read_pad(nes) || self.steer_sprite(nes) {
            return true;
        }

        nes.modify(FRAME, |cpu, m| cpu.inc(m));
        sync!(nes, self, 5);
        nes.cpu.pla();
        sync!(nes, self, 4);
        false
    }

    fn irq(&mut self, _nes: &mut Nes) -> bool {
        false
    }
}
