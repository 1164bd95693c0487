use super::draw_list::DrawOp;
use super::surface::DrawingSurface;
use crate::math::{Color, Point2D, Rectangle};

/// RGBA raster that renders draw calls immediately
#[derive(Clone)]
pub struct Canvas {
    /// RGBA pixel buffer, row-major
    pixels: Vec<u8>,
    /// Colour used by stroke operations
    color: Color,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * 4;

        Self {
            pixels: vec![0; size],
            color: Color::BLACK,
            width,
            height,
        }
    }

    /// Apply one recorded operation
    pub fn apply(&mut self, op: &DrawOp) {
        match op {
            DrawOp::SetColor(color) => self.set_color(*color),
            DrawOp::Line { from, to } => self.draw_line(*from, *to),
            DrawOp::Point(p) => self.draw_point(*p),
            DrawOp::FillRect { rect, color } => self.fill_rect(*rect, *color),
            DrawOp::StrokeRect(rect) => self.stroke_rect(*rect),
        }
    }

    /// Set single pixel, silently clipped
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Draw horizontal run of `length` pixels
    fn draw_hline(&mut self, x: i32, y: i32, length: u32, color: Color) {
        for i in 0..length as i32 {
            self.set_pixel(x + i, y, color);
        }
    }

    /// Draw vertical run of `length` pixels
    fn draw_vline(&mut self, x: i32, y: i32, length: u32, color: Color) {
        for i in 0..length as i32 {
            self.set_pixel(x, y + i, color);
        }
    }

    /// Draw line using Bresenham's algorithm
    fn bresenham(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let (mut x, mut y) = (x1, y1);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Colour at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[idx..idx + 4];
        Some(Color { r: p[0], g: p[1], b: p[2], a: p[3] })
    }

    /// Get pixel buffer
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel buffer
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get canvas dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn to_pixel(p: Point2D) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

impl DrawingSurface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_line(&mut self, a: Point2D, b: Point2D) {
        let (x1, y1) = to_pixel(a);
        let (x2, y2) = to_pixel(b);
        self.bresenham(x1, y1, x2, y2, self.color);
    }

    fn draw_point(&mut self, p: Point2D) {
        let (x, y) = to_pixel(p);
        self.set_pixel(x, y, self.color);
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        // Clip up front; Mandelbrot renders issue millions of these.
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = (rect.x as i64 + rect.width as i64).min(self.width as i64);
        let y1 = (rect.y as i64 + rect.height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let rgba = color.to_array();
        let stride = self.width as usize * 4;
        for y in y0 as usize..y1 as usize {
            let row = &mut self.pixels[y * stride..(y + 1) * stride];
            for px in row[x0 as usize * 4..x1 as usize * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        if rect.is_empty() {
            return;
        }
        let color = self.color;
        let right = rect.x + rect.width as i32 - 1;
        let bottom = rect.y + rect.height as i32 - 1;

        self.draw_hline(rect.x, rect.y, rect.width, color);
        self.draw_hline(rect.x, bottom, rect.width, color);
        self.draw_vline(rect.x, rect.y, rect.height, color);
        self.draw_vline(right, rect.y, rect.height, color);
    }
}
