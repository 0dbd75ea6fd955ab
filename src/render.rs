use crate::color::Rgb;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Render capability the simulation draws through
pub trait Canvas {
    /// Fill an axis-aligned rectangle with top-left pixel (x, y)
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb);
}

/// Off-screen RGB pixel buffer. Each terminal cell shows two vertically
/// stacked pixels, so a canvas of `w x h` cells holds `w x 2h` pixels.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Buffer covering a terminal area of `cols x rows` cells
    pub fn for_terminal(cols: u16, rows: u16, fill: Rgb) -> Self {
        Self::new(cols as u32, rows as u32 * 2, fill)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Widget that paints this buffer with half-block glyphs
    pub fn half_blocks(&self) -> HalfBlocks<'_> {
        HalfBlocks { pixels: self }
    }
}

impl Canvas for PixelBuffer {
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        // Clip to buffer; a rect starting past the edge draws nothing
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = py as usize * self.width as usize;
            for px in x.min(x_end)..x_end {
                self.pixels[row + px as usize] = color;
            }
        }
    }
}

/// Ratatui widget view over a [`PixelBuffer`]
pub struct HalfBlocks<'a> {
    pixels: &'a PixelBuffer,
}

impl Widget for HalfBlocks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for cy in 0..area.height {
            for cx in 0..area.width {
                let px = cx as u32;
                let top = self.pixels.pixel(px, cy as u32 * 2);
                let bottom = self.pixels.pixel(px, cy as u32 * 2 + 1);
                let Some(top) = top else {
                    continue;
                };
                let bottom = bottom.unwrap_or(top);
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(top.into())
                        .set_bg(bottom.into());
                }
            }
        }
    }
}
