//! Frame storage and the hand-off to the presentation thread.
//!
//! The PPU renders top-to-bottom into a working buffer and, once per frame,
//! flips it into its output buffer in bottom-to-top row order (the layout a
//! raster-position-at-bottom-left display surface consumes). The finished
//! output is then published through a [`FrameHandle`] that any thread can
//! copy from.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Pixels in one frame.
pub const FRAME_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Allocates a zeroed frame.
pub fn blank_frame() -> Box<[u32]> {
    vec![0; FRAME_PIXELS].into_boxed_slice()
}

/// Copies `working` into `output` with the row order reversed.
pub fn flip_rows(working: &[u32], output: &mut [u32]) {
    for (y, row) in working.chunks_exact(SCREEN_WIDTH).enumerate() {
        let dst = (SCREEN_HEIGHT - (y + 1)) * SCREEN_WIDTH;
        output[dst..dst + SCREEN_WIDTH].copy_from_slice(row);
    }
}

/// Shared last-finished frame plus a monotonic sequence number.
///
/// The emulation thread is the only writer; readers lock briefly to copy.
#[derive(Debug)]
pub struct FrameHandle {
    pixels: Mutex<Box<[u32]>>,
    frame_seq: AtomicU64,
}

impl Default for FrameHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHandle {
    pub fn new() -> Self {
        Self {
            pixels: Mutex::new(blank_frame()),
            frame_seq: AtomicU64::new(0),
        }
    }

    /// Publishes a finished frame (bottom-to-top rows).
    pub fn present(&self, frame: &[u32]) {
        self.pixels.lock().copy_from_slice(frame);
        self.frame_seq.fetch_add(1, Ordering::Release);
    }

    /// Monotonic frame counter, incremented on every [`present`](Self::present).
    #[inline]
    pub fn frame_seq(&self) -> u64 {
        self.frame_seq.load(Ordering::Acquire)
    }

    /// Copies the last frame into `dst`, returning its sequence number.
    pub fn copy_frame(&self, dst: &mut [u32]) -> u64 {
        let pixels = self.pixels.lock();
        let len = dst.len().min(pixels.len());
        dst[..len].copy_from_slice(&pixels[..len]);
        self.frame_seq()
    }

    pub fn snapshot(&self) -> Vec<u32> {
        self.pixels.lock().to_vec()
    }

    /// The last frame as top-to-bottom RGBA8 bytes, ready for image encoders.
    pub fn to_rgba8_top_down(&self) -> Vec<u8> {
        let pixels = self.pixels.lock();
        let mut out = Vec::with_capacity(FRAME_PIXELS * 4);
        for row in pixels.chunks_exact(SCREEN_WIDTH).rev() {
            for &pixel in row {
                out.extend_from_slice(&super::palette::rgba_bytes(pixel));
            }
        }
        out
    }
}
