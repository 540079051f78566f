//! A small drawing surface over `RgbImage`.
//!
//! Wraps the `imageproc` primitives with the few layout helpers the document
//! layouts need (aligned text, dashed rules). Text uses the configured
//! TrueType font; without one each word becomes a filled bar of the same
//! footprint, which keeps the layout's ink density intact.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut,
};
use imageproc::rect::Rect;

/// `0xRRGGBB` to a pixel.
pub const fn rgb(hex: u32) -> Rgb<u8> {
    Rgb([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
}

pub const BLACK: Rgb<u8> = rgb(0x000000);
pub const WHITE: Rgb<u8> = rgb(0xFFFFFF);

/// Glyph advance assumed for greeked text, as a fraction of the size.
const GREEK_ADVANCE: f32 = 0.5;

pub struct Sheet<'f> {
    img: RgbImage,
    font: Option<&'f FontVec>,
}

impl<'f> Sheet<'f> {
    pub fn new(width: u32, height: u32, background: Rgb<u8>, font: Option<&'f FontVec>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
            font,
        }
    }

    pub fn width(&self) -> i32 {
        self.img.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.img.height() as i32
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    // ── Shapes ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb<u8>) {
        if w > 0 && h > 0 {
            draw_filled_rect_mut(&mut self.img, Rect::at(x, y).of_size(w as u32, h as u32), color);
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb<u8>) {
        if w > 0 && h > 0 {
            draw_hollow_rect_mut(&mut self.img, Rect::at(x, y).of_size(w as u32, h as u32), color);
        }
    }

    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
        draw_line_segment_mut(
            &mut self.img,
            (x0 as f32, y0 as f32),
            (x1 as f32, y1 as f32),
            color,
        );
    }

    /// Horizontal rule of `dash` px segments separated by `gap` px.
    pub fn dashed_hline(&mut self, x0: i32, x1: i32, y: i32, dash: i32, gap: i32, color: Rgb<u8>) {
        let step = (dash + gap).max(1);
        let mut x = x0;
        while x < x1 {
            self.line(x, y, (x + dash - 1).min(x1), y, color);
            x += step;
        }
    }

    pub fn circle(&mut self, cx: i32, cy: i32, r: i32, color: Rgb<u8>) {
        if r > 0 {
            draw_filled_circle_mut(&mut self.img, (cx, cy), r, color);
        }
    }

    // ── Text ─────────────────────────────────────────────────────────────

    /// Rendered width of `text` at `size` px.
    pub fn text_width(&self, text: &str, size: f32) -> i32 {
        match self.font {
            Some(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                text.chars()
                    .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
                    .sum::<f32>()
                    .ceil() as i32
            }
            None => (text.chars().count() as f32 * size * GREEK_ADVANCE).ceil() as i32,
        }
    }

    /// Left-aligned text with its top edge at `y`.
    pub fn text(&mut self, x: i32, y: i32, size: f32, color: Rgb<u8>, text: &str) {
        if text.is_empty() || size < 1.0 {
            return;
        }
        match self.font {
            Some(font) => {
                draw_text_mut(&mut self.img, color, x, y, PxScale::from(size), font, text)
            }
            None => self.greek(x, y, size, color, text),
        }
    }

    /// Text whose right edge is at `x_right`.
    pub fn text_right(&mut self, x_right: i32, y: i32, size: f32, color: Rgb<u8>, text: &str) {
        let w = self.text_width(text, size);
        self.text(x_right - w, y, size, color, text);
    }

    /// Text centred on `cx`.
    pub fn text_center(&mut self, cx: i32, y: i32, size: f32, color: Rgb<u8>, text: &str) {
        let w = self.text_width(text, size);
        self.text(cx - w / 2, y, size, color, text);
    }

    /// Cut `text` so it fits in `max_width` px, marking the cut with a dot.
    pub fn fit(&self, text: &str, size: f32, max_width: i32) -> String {
        if self.text_width(text, size) <= max_width {
            return text.to_string();
        }
        let mut out: String = text.to_string();
        while !out.is_empty() && self.text_width(&format!("{out}."), size) > max_width {
            out.pop();
        }
        if out.is_empty() {
            out
        } else {
            format!("{out}.")
        }
    }

    fn greek(&mut self, x: i32, y: i32, size: f32, color: Rgb<u8>, text: &str) {
        let advance = size * GREEK_ADVANCE;
        let bar_top = y + (size * 0.25) as i32;
        let bar_h = ((size * 0.55) as i32).max(1);
        let mut cursor = x as f32;
        for word in text.split(' ') {
            let w = (word.chars().count() as f32 * advance) as i32;
            self.fill_rect(cursor as i32, bar_top, w.max(1), bar_h, color);
            cursor += (word.chars().count() + 1) as f32 * advance;
        }
    }
}
