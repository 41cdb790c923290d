//! NES master palette as packed `0xRRGGBBAA` values.

/// Number of colors the PPU can emit.
pub const PALETTE_SIZE: usize = 64;

#[rustfmt::skip]
pub const PALETTE: [u32; PALETTE_SIZE] = [
    0x808080FF, 0x0000B8FF, 0x3000B8FF, 0x8000A0FF, 0xB80068FF, 0xB00018FF, 0xB00000FF, 0x902400FF,
    0x782800FF, 0x003C00FF, 0x004808FF, 0x003C20FF, 0x002C60FF, 0x000000FF, 0x000400FF, 0x000400FF,
    0xC8C8C8FF, 0x0058F8FF, 0x403CF8FF, 0xB030C8FF, 0xF830A8FF, 0xF83458FF, 0xF83418FF, 0xD04800FF,
    0xC06000FF, 0x387800FF, 0x188410FF, 0x009460FF, 0x0084C0FF, 0x101010FF, 0x080808FF, 0x080808FF,
    0xF8FCF8FF, 0x0094F8FF, 0x6884F8FF, 0xD06CF8FF, 0xF874C8FF, 0xF86C98FF, 0xF87858FF, 0xF89058FF,
    0xF8A030FF, 0xA0BC00FF, 0x50D868FF, 0x48D4A8FF, 0x00D8F8FF, 0x606460FF, 0x080C08FF, 0x080C08FF,
    0xF8FCF8FF, 0x80BCF8FF, 0xB8B8F8FF, 0xD0B8F8FF, 0xF8BCE8FF, 0xF8BCC8FF, 0xF8C4B0FF, 0xF8CCA8FF,
    0xF8D8A0FF, 0xC8E098FF, 0xA8ECB0FF, 0xA8F4E8FF, 0xB0ECF8FF, 0xD8DCD8FF, 0x101010FF, 0x101010FF,
];

/// Resolves a palette index to RGBA, ignoring the upper two bits.
///
/// Greyscale averages the three color channels and keeps alpha opaque.
#[inline]
pub fn color(index: u8, greyscale: bool) -> u32 {
    let rgba = PALETTE[(index & 0x3F) as usize];
    if !greyscale {
        return rgba;
    }
    let sum = ((rgba >> 8) & 0xFF) + ((rgba >> 16) & 0xFF) + ((rgba >> 24) & 0xFF);
    ((sum / 3) * 0x0101_0100) | 0xFF
}

/// Splits a packed pixel into `[r, g, b, a]`.
#[inline]
pub fn rgba_bytes(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}
