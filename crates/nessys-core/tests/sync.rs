mod common;

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use anyhow::Result;
use common::{Event, Scripted};
use nessys_core::{
    control::Speed,
    cpu::InterruptContext,
    ppu::{CYCLES_PER_SCANLINE, SCANLINES_PER_FRAME, VBLANK_SCANLINE},
};

/// Processor cycles from power-on until the first vblank.
const CYCLES_TO_VBLANK: u32 = (VBLANK_SCANLINE as u32 * CYCLES_PER_SCANLINE as u32).div_ceil(3);
/// Processor cycles in a whole frame.
const CYCLES_PER_FRAME: u32 = (SCANLINES_PER_FRAME as u32 * CYCLES_PER_SCANLINE as u32).div_ceil(3);

#[test]
fn nmi_is_dispatched_at_vblank_and_flags_restored() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    nes.write8(0x2000, 0x80);
    nes.cpu.sec();

    assert!(!nes.sync(&mut program, CYCLES_TO_VBLANK - 1));
    assert!(program.events.is_empty());
    assert!(!nes.sync(&mut program, 1));
    assert_eq!(program.events, vec![Event::Nmi]);

    // Carry and the unused bit were pushed; I is restored on exit.
    assert_eq!(program.pushed_flags, vec![0x21]);
    assert!(!nes.cpu.p().i());
    assert!(nes.cpu.p().c());
    assert_eq!(nes.cpu.s(), 0xFF);
    assert_eq!(nes.cpu.interrupts().current(), InterruptContext::Normal);
    Ok(())
}

#[test]
fn nmi_disabled_means_no_dispatch() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    assert!(!nes.sync(&mut program, CYCLES_PER_FRAME));
    assert!(program.events.is_empty());
    assert_eq!(nes.frame_handle().frame_seq(), 1);
    Ok(())
}

#[test]
fn nmi_wins_over_irq_and_both_requests_clear() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    nes.cpu.interrupts_mut().request_irq();
    nes.cpu.interrupts_mut().request_nmi();
    assert!(!nes.sync(&mut program, 1));
    assert_eq!(program.events, vec![Event::Nmi]);
    assert!(!nes.cpu.interrupts().any_pending());

    assert!(!nes.sync(&mut program, 1));
    assert_eq!(program.events, vec![Event::Nmi]);
    Ok(())
}

#[test]
fn brk_raises_irq_with_break_flag() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    nes.cpu.brk();
    assert!(!nes.sync(&mut program, 7));
    assert_eq!(program.events, vec![Event::Irq]);
    // B | unused
    assert_eq!(program.pushed_flags, vec![0x30]);
    assert!(!nes.cpu.p().i());

    nes.cpu.sei();
    nes.cpu.brk();
    assert!(!nes.sync(&mut program, 7));
    assert_eq!(program.count(Event::Irq), 1);
    Ok(())
}

#[test]
fn new_request_inside_a_handler_aborts_it() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted {
        nmi_syncs: 5,
        irq_inside_nmi: true,
        ..Default::default()
    };
    nes.cpu.interrupts_mut().request_nmi();
    assert!(!nes.sync(&mut program, 1));
    // The handler stopped at its first sync; the IRQ waits for the next
    // checkpoint in the normal context.
    assert_eq!(program.events, vec![Event::Nmi, Event::Aborted]);
    assert!(nes.cpu.interrupts().irq_pending());

    assert!(!nes.sync(&mut program, 1));
    assert_eq!(program.events, vec![Event::Nmi, Event::Aborted, Event::Irq]);
    Ok(())
}

#[test]
fn syncs_inside_a_handler_without_new_requests_continue() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted {
        nmi_syncs: 3,
        ..Default::default()
    };
    nes.cpu.interrupts_mut().request_nmi();
    assert!(!nes.sync(&mut program, 1));
    assert_eq!(program.events, vec![Event::Nmi]);
    Ok(())
}

#[test]
fn restart_request_is_reported_by_sync() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    nes.controls().request_restart();
    assert!(nes.sync(&mut program, 1));
    Ok(())
}

#[test]
fn pause_then_restart_releases_the_throttle() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    let controls = Arc::clone(nes.controls());
    controls.set_paused(true);
    let waker = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(30));
        controls.request_restart();
    });
    let started = Instant::now();
    assert!(nes.sync(&mut program, 1));
    assert!(started.elapsed() >= Duration::from_millis(20));
    waker.join().expect("waker thread");
    Ok(())
}

#[test]
fn normal_speed_is_throttled_to_the_native_clock() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    nes.controls().set_speed(Speed::Normal);
    let started = Instant::now();
    // ~20 ms of emulated time.
    for _ in 0..10 {
        assert!(!nes.sync(&mut program, 3_580));
    }
    assert!(started.elapsed() >= Duration::from_millis(15));
    Ok(())
}

#[test]
fn sync_hook_runs_every_checkpoint() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    nes.set_sync_hook(Some(Box::new(move || {
        seen.fetch_add(1, Ordering::Relaxed);
    })));
    for _ in 0..4 {
        nes.sync(&mut program, 1);
    }
    assert_eq!(calls.load(Ordering::Relaxed), 4);

    nes.set_sync_hook(None);
    nes.sync(&mut program, 1);
    assert_eq!(calls.load(Ordering::Relaxed), 4);
    Ok(())
}

#[test]
fn finished_frames_are_published_bottom_up() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    let frames = nes.frame_handle();
    // Tile 0 transparent, tile 1 solid color 1, placed in the last visible
    // row of the first nametable.
    for offset in 0..0x20 {
        let value = if (0x10..0x18).contains(&offset) {
            0xFF
        } else {
            0x00
        };
        nes.ppu_write8(offset, value);
    }
    nes.ppu_write8(0x2000 + 29 * 32, 1);
    nes.ppu_write8(0x3F00, 0x0F);
    nes.ppu_write8(0x3F01, 0x30);
    nes.write8(0x2001, 0x08);

    assert!(!nes.sync(&mut program, CYCLES_PER_FRAME));
    assert_eq!(frames.frame_seq(), 1);

    let pixels = frames.snapshot();
    let white = nessys_core::ppu::palette::color(0x30, false);
    let black = nessys_core::ppu::palette::color(0x0F, false);
    // Screen row 239 is stored first.
    assert_eq!(pixels[0], white);
    assert_eq!(pixels[8], black);
    let rgba = frames.to_rgba8_top_down();
    let last_row = 239 * 256 * 4;
    assert_eq!(&rgba[last_row..last_row + 4], &white.to_be_bytes());
    Ok(())
}

#[test]
fn per_second_figures_are_latched() -> Result<()> {
    let mut nes = common::nes()?;
    let mut program = Scripted::default();
    nes.controls().set_speed(Speed::Normal);
    let started = Instant::now();
    while started.elapsed() < Duration::from_millis(1_100) {
        nes.sync(&mut program, CYCLES_PER_FRAME / 8);
    }
    let controls = nes.controls();
    // Throttled to ~60 frames and the native clock during the first window.
    let fps = controls.fps();
    assert!((55..=62).contains(&fps), "fps {fps}");
    let percent = controls.speed_percent();
    assert!(percent > 90.0, "speed {percent}%");
    Ok(())
}
