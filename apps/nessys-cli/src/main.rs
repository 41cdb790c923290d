mod args;
mod demo;

use std::{
    fs::File,
    io::BufWriter,
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use nessys_core::{
    cartridge::Cartridge,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH, buffer::FrameHandle},
};
use nessys_runtime::{Runtime, RuntimeConfig, RuntimeHandle};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{args::Args, demo::Demo};

const OVERLAY_INTERVAL: Duration = Duration::from_secs(1);
const FRAME_WAIT: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cartridge = match &args.rom {
        Some(path) => Cartridge::from_file(path)
            .with_context(|| format!("loading cartridge {}", path.display()))?,
        None => demo::cartridge(),
    };
    info!(
        prg = cartridge.prg_rom().len(),
        chr = cartridge.chr_rom().len(),
        mirroring = ?cartridge.mirroring(),
        "cartridge ready"
    );

    let config = RuntimeConfig {
        speed: args.speed.into(),
        force_greyscale: args.greyscale,
        paused: false,
    };
    let runtime =
        Runtime::start(&cartridge, Box::new(Demo), config).context("starting the runtime")?;
    let handle = runtime.handle();

    drive(&args, &runtime, &handle);

    let reason = runtime.stop().context("stopping the runtime")?;
    info!(?reason, frames = handle.frame_seq(), "runtime stopped");

    if let Some(path) = &args.dump {
        write_png(path, &handle.frame_handle())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "frame written");
    }
    Ok(())
}

/// Applies the scripted menu actions and logs the overlay once per second
/// until a stop condition is met.
fn drive(args: &Args, runtime: &Runtime, handle: &RuntimeHandle) {
    let started = Instant::now();
    let deadline = started + Duration::from_secs(args.seconds);
    let mut next_overlay = started + OVERLAY_INTERVAL;
    let mut paused = false;
    let mut restarted = false;
    let mut seq = handle.frame_seq();

    while Instant::now() < deadline {
        if runtime.is_finished() {
            warn!("runtime exited on its own");
            return;
        }
        if let Some(next) = handle.wait_for_frame(seq, FRAME_WAIT) {
            seq = next;
        }

        if args.pause_after.is_some_and(|n| !paused && seq >= n) {
            info!(frame = seq, "pausing");
            handle.pause();
            paused = true;
        }
        if args.restart_after.is_some_and(|n| !restarted && seq >= n) {
            info!(frame = seq, "requesting restart");
            handle.restart();
            restarted = true;
        }
        if args.frames.is_some_and(|n| seq >= n) {
            return;
        }

        if Instant::now() >= next_overlay {
            let stats = handle.stats();
            info!(
                fps = stats.fps,
                speed = format_args!("{:.0}%", stats.speed_percent),
                preset = ?stats.speed,
                paused = stats.paused,
                frame = stats.frame_seq,
            );
            next_overlay += OVERLAY_INTERVAL;
        }
    }
}

fn write_png(path: &Path, frame: &FrameHandle) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba8_top_down())?;
    Ok(())
}
