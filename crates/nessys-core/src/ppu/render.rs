//! Whole-scanline rendering into the working buffer.

use crate::{memory::ppu as ppu_mem, mtu::Mtu};

use super::{
    Ppu, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE, TILES_WIDE, palette,
    registers::Status,
    sprite::{self, SPRITE_HEIGHT, SPRITE_WIDTH},
};

/// Bytes per tile in a pattern table (two 8-byte bit planes).
const TILE_BYTES: usize = 16;
/// Offset of the high bit plane within a tile.
const HIGH_PLANE: usize = 8;
/// Sprites per scanline the hardware can evaluate.
const SPRITES_PER_LINE: u8 = 8;

/// 2-bit color index of pixel `px` (0 = leftmost) of a tile row.
#[inline]
fn pixel_index(low: u8, high: u8, px: usize) -> usize {
    let shift = 7 - px;
    (((low >> shift) & 1) | (((high >> shift) & 1) << 1)) as usize
}

impl Ppu {
    pub(super) fn render_scanline(&mut self, mtu: &Mtu) {
        let line = self.scanline as usize;
        self.sprites_on_line = 0;

        let backdrop = palette::color(self.vram.universal_background(), self.greyscale());
        let row = line * SCREEN_WIDTH;
        self.working[row..row + SCREEN_WIDTH].fill(backdrop);

        let mask = self.registers.mask;
        if mask.show_sprites() {
            self.draw_sprites(true);
        }
        if mask.show_background() {
            self.draw_background(mtu);
        }
        if mask.show_sprites() {
            self.draw_sprites(false);
        }

        self.registers.status.set(
            Status::SPRITE_OVERFLOW,
            self.sprites_on_line > SPRITES_PER_LINE,
        );
    }

    /// Draws the visible background row from the two horizontally adjacent
    /// nametables selected by the base nametable and the vertical scroll.
    ///
    /// Transparent pixels leave the backdrop (or behind-priority sprites)
    /// untouched. The left-column background mask is not applied.
    fn draw_background(&mut self, mtu: &Mtu) {
        let line = self.scanline as usize;
        let greyscale = self.greyscale();
        let table = self.registers.control.background_pattern_table();
        let scroll_x = self.registers.scroll_x as usize;

        let mut y = line + self.registers.scroll_y as usize;
        let mut first = self.registers.base_nametable as usize;
        // Past the bottom edge, continue from the top row of the slot below.
        if y >= SCREEN_HEIGHT {
            first = (first + 2) % 4;
            y -= SCREEN_HEIGHT;
        }
        let second = (first / 2) * 2 + (1 - first % 2);
        let slots = [mtu.nametable(first), mtu.nametable(second)];

        let tile_y = y / TILE_SIZE;
        let fine_x = scroll_x % TILE_SIZE;
        let start_column = scroll_x / TILE_SIZE;
        let end_column = start_column + TILES_WIDE;
        let row = line * SCREEN_WIDTH;

        for column in start_column..=end_column {
            let wrapped = column >= TILES_WIDE;
            let cell = column % TILES_WIDE;

            let nametable = self.vram.nametable(slots[wrapped as usize]);
            let tile = nametable[tile_y * TILES_WIDE + cell] as usize;
            let attribute = nametable[ppu_mem::NAMETABLE_CELLS + (tile_y / 4) * 8 + cell / 4];
            let shift = (2 * ((cell % 4) / 2)) | (4 * ((tile_y % 4) / 2));
            let palette = ((attribute >> shift) & 0b11) as usize;

            let offset = tile * TILE_BYTES + y % TILE_SIZE;
            let low = self.vram.pattern(table, offset);
            let high = self.vram.pattern(table, offset + HIGH_PLANE);

            let (first_px, last_px) = if column == start_column {
                (fine_x, TILE_SIZE)
            } else if column == end_column {
                (0, fine_x)
            } else {
                (0, TILE_SIZE)
            };

            for px in first_px..last_px {
                let color_index = pixel_index(low, high, px);
                if color_index == 0 {
                    continue;
                }
                let x = if wrapped {
                    TILE_SIZE * cell + px + SCREEN_WIDTH - scroll_x
                } else {
                    TILE_SIZE * cell + px - scroll_x
                };
                let entry = self.vram.background_color(palette, color_index) & 0x3F;
                self.working[row + x] = palette::color(entry, greyscale);
            }
        }
    }

    /// Draws every sprite of one priority class that covers the current line.
    ///
    /// OAM is walked from the last entry to the first so lower indices end up
    /// on top. Every covering sprite is drawn; the per-line count only feeds
    /// the overflow flag.
    fn draw_sprites(&mut self, behind_background: bool) {
        let line = self.scanline as usize;
        let greyscale = self.greyscale();
        let control = self.registers.control;
        let show_left = self.registers.mask.show_sprites_left();
        let height = if control.use_8x16_sprites() {
            SPRITE_HEIGHT * 2
        } else {
            SPRITE_HEIGHT
        };
        let row = line * SCREEN_WIDTH;

        for (index, sprite) in sprite::back_to_front(&self.registers.oam) {
            if !sprite.covers(line, height)
                || sprite.attributes.behind_background() != behind_background
            {
                continue;
            }
            self.sprites_on_line = self.sprites_on_line.wrapping_add(1);

            let (table, tile, tile_row) =
                sprite.tile_row(line, height, control.sprite_pattern_table());
            let offset = tile * TILE_BYTES + tile_row;
            let low = self.vram.pattern(table, offset);
            let high = self.vram.pattern(table, offset + HIGH_PLANE);
            let flip = sprite.attributes.flip_horizontal();
            let palette = sprite.attributes.palette();

            for px in 0..SPRITE_WIDTH {
                let x = sprite.x as usize + px;
                if x >= SCREEN_WIDTH || (x < TILE_SIZE && !show_left) {
                    continue;
                }
                let bit = if flip { SPRITE_WIDTH - 1 - px } else { px };
                let color_index = pixel_index(low, high, bit);
                if color_index == 0 {
                    continue;
                }
                if index == 0 {
                    self.registers.status.insert(Status::SPRITE_ZERO_HIT);
                }
                let entry = self.vram.sprite_color(palette, color_index) & 0x3F;
                self.working[row + x] = palette::color(entry, greyscale);
            }
        }
    }
}
