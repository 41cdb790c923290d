mod common;

use anyhow::Result;
use nessys_core::{
    Mirroring, Nes, cartridge::Cartridge, control::Controls, error::Error,
    ppu_non_mirrored_addr,
};
use std::sync::Arc;

#[test]
fn end_to_end_memory_and_oam_scenario() -> Result<()> {
    let mut nes = common::nes()?;

    nes.write8(0x0500, 0x07);
    assert_eq!(nes.read8(0x0500 + 0x0800), 0x07);
    assert_eq!(nes.read8(0x0500 + 0x1800), 0x07);

    nes.ppu_write8(0x3000, 0x05);
    assert_eq!(nes.ppu_read8(0x2000), 0x05);

    nes.write8(0x2003, 0x20);
    nes.write8(0x2004, 0x07);
    nes.write8(0x2004, 0x08);
    nes.write8(0x2003, 0x20);
    assert_eq!(nes.read8(0x2004), 0x07);
    assert_eq!(nes.read8(0x2004), 0x07);
    nes.write8(0x2003, 0x21);
    assert_eq!(nes.read8(0x2004), 0x08);
    Ok(())
}

#[test]
fn oam_address_wraps_at_eight_bits() -> Result<()> {
    let mut nes = common::nes()?;
    nes.write8(0x2003, 0xFF);
    nes.write8(0x2004, 0x01);
    nes.write8(0x2004, 0x02);
    nes.write8(0x2003, 0xFF);
    assert_eq!(nes.read8(0x2004), 0x01);
    assert_eq!(nes.read8(0x2004), 0x01);
    nes.write8(0x2003, 0x00);
    assert_eq!(nes.read8(0x2004), 0x02);
    Ok(())
}

#[test]
fn non_mirrored_ppu_addresses() {
    assert_eq!(ppu_non_mirrored_addr(0x4001), 0x0001);
    assert_eq!(ppu_non_mirrored_addr(0x6001), 0x2001);
    assert_eq!(ppu_non_mirrored_addr(0x3F14), 0x3F04);
    assert_eq!(ppu_non_mirrored_addr(0x3F1C + 0x8000), 0x3F0C);
    assert_eq!(ppu_non_mirrored_addr(0x3000), 0x2000);
    assert_eq!(ppu_non_mirrored_addr(0x3EFF), 0x2EFF);
}

#[test]
fn ppu_space_reads_and_writes() -> Result<()> {
    let mut nes = common::nes()?;
    nes.ppu_write8(0x6001, 0x07);
    assert_eq!(nes.ppu_read8(0x6001), 0x07);
    assert_eq!(nes.ppu_read8(0x2001), 0x07);
    nes.ppu_write8(0x3EFF, 0x05);
    assert_eq!(nes.ppu_read8(0x2EFF), 0x05);
    nes.ppu_write8(0x3F10 + 0x8000, 0x03);
    assert_eq!(nes.ppu_read8(0x3F00), 0x03);
    assert_eq!(nes.ppu_read8(0x3F20), 0x03);

    nes.ppu_write16(0x2100, 0x1234);
    assert_eq!(nes.ppu_read8(0x2100), 0x34);
    assert_eq!(nes.ppu_read16(0x6100), 0x1234);
    Ok(())
}

#[test]
fn interrupts_enabled_after_power_on() -> Result<()> {
    let nes = common::nes()?;
    assert!(!nes.cpu.p().i());
    assert_eq!(nes.cpu.s(), 0xFF);
    assert_eq!(nes.cpu.p().to_byte(), 0x20);
    Ok(())
}

#[test]
fn chr_is_copied_into_pattern_tables() -> Result<()> {
    let nes = common::nes()?;
    let chr = common::cartridge(Mirroring::Vertical).chr_rom().to_vec();
    assert_eq!(nes.ppu.vram().pattern_tables(), &chr[..]);
    for addr in [0x0000u16, 0x0FFF, 0x1000, 0x1FFF] {
        assert_eq!(nes.ppu_read8(addr), chr[addr as usize]);
    }
    Ok(())
}

#[test]
fn stores_and_read_modify_write_go_through_the_bus() -> Result<()> {
    let mut nes = common::nes()?;
    nes.cpu.lda(0x81);
    nes.sta(0x0042);
    assert_eq!(nes.read8(0x0842), 0x81);

    nes.modify(0x0042, |cpu, m| cpu.asl(m));
    assert_eq!(nes.read8(0x0042), 0x02);
    assert!(nes.cpu.p().c());

    nes.cpu.ldx(0x10);
    nes.stx(0x2006);
    nes.cpu.ldy(0x00);
    nes.sty(0x2006);
    nes.cpu.lda(0xEE);
    nes.sta(0x2007);
    assert_eq!(nes.ppu_read8(0x1000), 0xEE);

    nes.write16(0x0300, 0xCAFE);
    assert_eq!(nes.read16(0x0300), 0xCAFE);
    assert_eq!(nes.read16(0x8000), 0x0100);
    Ok(())
}

#[test]
fn unsupported_mirroring_is_rejected_at_power_on() {
    let cartridge = Cartridge::new(vec![0; 0x4000], Vec::new(), Mirroring::FourScreen);
    let err = Nes::new(&cartridge, Arc::new(Controls::new()))
        .expect_err("four-screen layout needs extra nametables");
    assert!(matches!(
        err,
        Error::UnsupportedMirroring(Mirroring::FourScreen)
    ));
}

#[test]
fn horizontal_mirroring_shares_the_top_pair() -> Result<()> {
    let mut nes = common::nes_with(Mirroring::Horizontal)?;
    nes.ppu_write8(0x2010, 0xAB);
    assert_eq!(nes.ppu_read8(0x2410), 0xAB);
    assert_ne!(nes.ppu_read8(0x2810), 0xAB);
    nes.ppu_write8(0x2C10, 0xCD);
    assert_eq!(nes.ppu_read8(0x2810), 0xCD);
    Ok(())
}
