//! PNG diagram rendering.
//!
//! Draws the same grid geometry as the ASCII renderer, with pixel columns
//! derived from the font's digit advance and the layout's column width.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Pixel, Rgba, RgbaImage};

use super::layout::{Layout, Row};
use super::Error;


/// Glyph size in pixels.
const SCALE: PxScale = PxScale { x: 28.0, y: 28.0 };
/// Height of the label band.
const LABEL_BAND: u32 = 44;
/// Height of the bit-index band.
const INDEX_BAND: u32 = 32;
/// Border and separator thickness.
const LINE: u32 = 2;
/// Empty margin around the grid.
const MARGIN: u32 = 16;

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

/// Foreground/background color scheme of a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    BlackOnWhite,
    BlackOnTransparent,
    WhiteOnBlack,
    WhiteOnTransparent,
}
impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::BlackOnWhite,
        Scheme::BlackOnTransparent,
        Scheme::WhiteOnBlack,
        Scheme::WhiteOnTransparent,
    ];

    /// Short tag used in output file names.
    pub fn tag(self) -> &'static str {
        match self {
            Scheme::BlackOnWhite => "bow",
            Scheme::BlackOnTransparent => "bot",
            Scheme::WhiteOnBlack => "wob",
            Scheme::WhiteOnTransparent => "wot",
        }
    }

    fn colors(self) -> (Rgba<u8>, Rgba<u8>) {
        const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
        const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
        match self {
            Scheme::BlackOnWhite => (BLACK, WHITE),
            Scheme::BlackOnTransparent => (BLACK, Rgba([0, 0, 0, 0])),
            Scheme::WhiteOnBlack => (WHITE, BLACK),
            Scheme::WhiteOnTransparent => (WHITE, Rgba([255, 255, 255, 0])),
        }
    }
}

/// Loads the font at `path`, or the bundled DejaVu Sans Mono.
pub fn load_font(path: Option<&Path>) -> Result<FontVec, Error> {
    match path {
        Some(path) => {
            let data = fs::read(path).map_err(|e| Error::FontLoad {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
            FontVec::try_from_vec(data).map_err(|e| Error::FontLoad {
                path: path.to_owned(),
                reason: e.to_string(),
            })
        }
        None => Ok(FontVec::try_from_vec(BUNDLED_FONT.to_vec()).expect("bundled font is valid")),
    }
}

/// Output file name for a prefix/scheme pair. Deterministic, so re-running
/// with the same inputs overwrites rather than accumulates.
pub fn output_path(prefix: &str, scheme: Scheme) -> PathBuf {
    PathBuf::from(format!("{prefix}-{}.png", scheme.tag()))
}

/// Rasterizes the layout and writes it to `path` as a PNG.
pub fn render(layout: &Layout, scheme: Scheme, font: &FontVec, path: &Path) -> Result<(), Error> {
    rasterize(layout, scheme, font)
        .save(path)
        .map_err(|e| Error::ImageWrite {
            path: path.to_owned(),
            reason: e.to_string(),
        })
}

fn rasterize(layout: &Layout, scheme: Scheme, font: &FontVec) -> RgbaImage {
    let (fg, bg) = scheme.colors();
    let advance = font.as_scaled(SCALE).h_advance(font.glyph_id('0'));
    let col_px = (advance * layout.col_chars() as f32).ceil() as u32;
    let width_bits = layout.width().bits();
    let grid_w = u32::from(width_bits) * col_px + LINE;
    let grid_h = LABEL_BAND + INDEX_BAND + 2 * LINE;

    let mut img = RgbaImage::from_pixel(
        grid_w + 2 * MARGIN,
        grid_h * layout.rows().len() as u32 + 2 * MARGIN,
        bg,
    );
    let mut painter = Painter {
        img: &mut img,
        font,
        fg,
        col_px,
        width_bits,
    };
    for (i, row) in layout.rows().iter().enumerate() {
        painter.row(row, MARGIN + i as u32 * grid_h);
    }
    img
}

struct Painter<'a> {
    img: &'a mut RgbaImage,
    font: &'a FontVec,
    fg: Rgba<u8>,
    col_px: u32,
    width_bits: u8,
}
impl Painter<'_> {
    fn row(&mut self, row: &Row, top: u32) {
        let grid_w = u32::from(self.width_bits) * self.col_px + LINE;
        let grid_h = LABEL_BAND + INDEX_BAND + 2 * LINE;
        let scaled = self.font.as_scaled(SCALE);

        // Borders, then a separator at every cell boundary.
        self.rect(MARGIN, top, grid_w, LINE);
        self.rect(MARGIN, top + grid_h - LINE, grid_w, LINE);
        self.rect(MARGIN, top, LINE, grid_h);
        for cell in row.cells() {
            let x = MARGIN + u32::from(self.width_bits - cell.lo) * self.col_px;
            self.rect(x, top, LINE, grid_h);
        }

        // Centered cell labels.
        let mid = top as f32 + LINE as f32 + LABEL_BAND as f32 / 2.0;
        let baseline = mid + (scaled.ascent() + scaled.descent()) / 2.0;
        for cell in row.cells() {
            let label = cell.label();
            if label.is_empty() {
                continue;
            }
            let left = self.cell_x(cell.hi) as f32;
            let span = u32::from(cell.bits()) * self.col_px;
            self.text(&label, left + (span as f32 - self.text_width(&label)) / 2.0, baseline);
        }

        // Bit indices: hi at the left edge, lo at the right edge.
        let mid = top as f32 + (LINE + LABEL_BAND) as f32 + INDEX_BAND as f32 / 2.0;
        let baseline = mid + (scaled.ascent() + scaled.descent()) / 2.0;
        let pad = scaled.h_advance(self.font.glyph_id('0')) / 2.0;
        for cell in row.cells() {
            let left = self.cell_x(cell.hi) as f32;
            let span = (u32::from(cell.bits()) * self.col_px) as f32;
            if cell.bits() == 1 {
                let index = cell.hi.to_string();
                self.text(&index, left + (span - self.text_width(&index)) / 2.0, baseline);
            } else {
                let hi = cell.hi.to_string();
                let lo = cell.lo.to_string();
                self.text(&hi, left + LINE as f32 + pad, baseline);
                self.text(&lo, left + span - self.text_width(&lo) - pad, baseline);
            }
        }
    }

    /// Pixel x of a cell's left boundary, given its most significant bit.
    fn cell_x(&self, hi: u8) -> u32 {
        MARGIN + u32::from(self.width_bits - 1 - hi) * self.col_px
    }

    fn rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for py in y..(y + h).min(self.img.height()) {
            for px in x..(x + w).min(self.img.width()) {
                self.img.put_pixel(px, py, self.fg);
            }
        }
    }

    fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(SCALE);
        text.chars()
            .map(|c| scaled.h_advance(self.font.glyph_id(c)))
            .sum()
    }

    fn text(&mut self, text: &str, x: f32, baseline: f32) {
        let scaled = self.font.as_scaled(SCALE);
        let fg = self.fg;
        let mut caret = x;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            let advance = scaled.h_advance(id);
            let glyph = id.with_scale_and_position(SCALE, point(caret, baseline));
            caret += advance;
            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            let img = &mut *self.img;
            outline.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
                img.get_pixel_mut(px as u32, py as u32)
                    .blend(&Rgba([fg[0], fg[1], fg[2], alpha]));
            });
        }
    }
}
