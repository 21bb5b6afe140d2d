//! Terminal painter
//!
//! Rasterizes a scene into an RGB pixel grid and writes it with Unicode
//! half-blocks, two pixels per character cell. The logical 360x640 field is
//! scaled uniformly to fit the grid and centered; nothing outside the grid
//! ever reaches the terminal.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as TermColor},
};

use crate::Rect;
use crate::assets::Sprite;
use crate::consts::{FIELD_H, FIELD_W};

use super::scene::{Paint, Scene};

pub type Rgb = [u8; 3];

/// Letterbox fill outside the mapped field
const LETTERBOX_COLOR: Rgb = [18, 18, 18];

/// Pixel grid; height is terminal rows times two
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX_COLOR; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px = vec![LETTERBOX_COLOR; w * h];
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Stretch a sprite across the given pixel rectangle
    pub fn blit_sprite(&mut self, sprite: &Sprite, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        for dy in 0..h {
            for dx in 0..w {
                let u = dx as f32 / w as f32;
                let v = dy as f32 / h as f32;
                self.set(x + dx, y + dy, sprite.sample(u, v));
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, c: Rgb) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set(cx + dx, cy + dy, c);
                }
            }
        }
    }

    /// Write the grid starting at terminal row `origin_row`, two pixel rows
    /// per character cell via the upper-half block.
    pub fn render(&self, out: &mut impl Write, origin_row: u16) -> io::Result<()> {
        let rows = self.h / 2;
        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, origin_row + row as u16))?;
            let mut prev: Option<(Rgb, Rgb)> = None;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(TermColor::Rgb {
                            r: top[0],
                            g: top[1],
                            b: top[2]
                        }),
                        style::SetBackgroundColor(TermColor::Rgb {
                            r: bot[0],
                            g: bot[1],
                            b: bot[2]
                        })
                    )?;
                    prev = Some((top, bot));
                }
                queue!(out, style::Print('\u{2580}'))?;
            }
            queue!(out, style::ResetColor)?;
        }
        out.flush()
    }
}

/// Uniform mapping from field coordinates onto a pixel area, centered
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    scale: f32,
    off_x: f32,
    off_y: f32,
}

impl Viewport {
    /// Fit the logical field into a grid of the given size
    pub fn fit(buf_w: usize, buf_h: usize) -> Self {
        let scale = (buf_w as f32 / FIELD_W).min(buf_h as f32 / FIELD_H);
        Self {
            scale,
            off_x: (buf_w as f32 - FIELD_W * scale) / 2.0,
            off_y: (buf_h as f32 - FIELD_H * scale) / 2.0,
        }
    }

    #[inline]
    pub fn map_x(&self, x: f32) -> i32 {
        (self.off_x + x * self.scale).round() as i32
    }

    #[inline]
    pub fn map_y(&self, y: f32) -> i32 {
        (self.off_y + y * self.scale).round() as i32
    }

    #[inline]
    pub fn map_len(&self, len: f32) -> i32 {
        (len * self.scale).round().max(1.0) as i32
    }

    fn map_rect(&self, r: Rect) -> (i32, i32, i32, i32) {
        let x0 = self.map_x(r.x);
        let y0 = self.map_y(r.y);
        // Map the far edges so adjacent rects stay seamless after rounding
        let x1 = self.map_x(r.right());
        let y1 = self.map_y(r.bottom());
        (x0, y0, x1 - x0, y1 - y0)
    }
}

/// Paint one frame into the grid
pub fn paint(scene: &Scene, buf: &mut PixelBuf, vp: Viewport) {
    buf.fill(LETTERBOX_COLOR);

    // Field background
    let (fx, fy) = (vp.map_x(0.0), vp.map_y(0.0));
    let (fw, fh) = (vp.map_len(FIELD_W), vp.map_len(FIELD_H));
    match scene.background {
        Paint::Solid(c) => buf.fill_rect(fx, fy, fw, fh, c),
        Paint::Sprite(s) => buf.blit_sprite(s, fx, fy, fw, fh),
    }

    // Pillar segments
    for shape in &scene.rects {
        let (x, y, w, h) = vp.map_rect(shape.rect);
        if w <= 0 || h <= 0 {
            continue;
        }
        match shape.paint {
            Paint::Solid(c) => buf.fill_rect(x, y, w, h, c),
            Paint::Sprite(s) => buf.blit_sprite(s, x, y, w, h),
        }
    }

    // Avatar
    let cx = vp.map_x(scene.avatar.center.x);
    let cy = vp.map_y(scene.avatar.center.y);
    let r = vp.map_len(scene.avatar.radius);
    buf.fill_circle(cx, cy, r, scene.avatar.color);

    // Score overlay, top-left of the field
    draw_number(buf, vp.map_x(30.0), vp.map_y(20.0), scene.score, [255, 255, 255]);
}

// 3x5 bitmap digits for the score overlay
#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, [20, 20, 20]);
                buf.set(px, py, fg);
            }
        }
    }
}

/// Draw a number with its left edge at `x`; 3px digits with 1px spacing
pub fn draw_number(buf: &mut PixelBuf, x: i32, y: i32, n: u32, fg: Rgb) {
    for (i, ch) in n.to_string().chars().enumerate() {
        let d = ch as u8 - b'0';
        draw_digit(buf, x + i as i32 * 4, y, d, fg);
    }
}
