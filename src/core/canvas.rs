use super::frame::Frame;
use crate::error::Result;

/// RGBA color
pub type Rgba = [u8; 4];

/// 2D drawing operations for canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill entire canvas with color
    Clear(Rgba),

    /// Single pixel at (x, y)
    Pixel { x: i32, y: i32, color: Rgba },

    /// Axis-aligned square of `size` pixels centered on (cx, cy)
    Square { cx: i32, cy: i32, size: u32, color: Rgba },

    /// Filled disc centered on (cx, cy)
    Disc { cx: i32, cy: i32, radius: u32, color: Rgba },
}

/// Canvas state - pixel buffer with deferred draw operations
#[derive(Debug, Clone)]
pub struct Canvas {
    /// RGBA pixel buffer
    pixels: Vec<u8>,
    /// Pending draw operations
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new transparent canvas with dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Queue a draw operation
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue a draw operation without consuming the canvas
    pub fn push(&mut self, op: DrawOp) {
        self.operations.push(op);
    }

    pub fn pending(&self) -> usize {
        self.operations.len()
    }

    /// Execute all pending operations in order
    pub fn execute_ops(mut self) -> Self {
        let ops = std::mem::take(&mut self.operations);
        for op in &ops {
            self.execute_op(op);
        }
        self
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Pixel { x, y, color } => self.set_pixel(x, y, color),
            DrawOp::Square { cx, cy, size, color } => self.fill_square(cx, cy, size, color),
            DrawOp::Disc { cx, cy, radius, color } => self.fill_disc(cx, cy, radius, color),
        }
    }

    fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Out-of-bounds writes are dropped
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    fn fill_square(&mut self, cx: i32, cy: i32, size: u32, color: Rgba) {
        let size = size.max(1) as i32;
        let x0 = cx - (size - 1) / 2;
        let y0 = cy - (size - 1) / 2;
        for dy in 0..size {
            for dx in 0..size {
                self.set_pixel(x0 + dx, y0 + dy, color);
            }
        }
    }

    fn fill_disc(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let r = radius as i32;
        let r_sq = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Flush pending operations and hand the pixels over as a frame
    pub fn into_frame(self) -> Result<Frame> {
        let canvas = self.execute_ops();
        Frame::from_rgba(canvas.width, canvas.height, canvas.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 50);
        assert_eq!(canvas.dimensions(), (100, 50));
        assert_eq!(canvas.pixels().len(), 100 * 50 * 4);
    }

    #[test]
    fn canvas_clear() {
        let canvas = Canvas::new(10, 10).draw(DrawOp::Clear(RED)).execute_ops();

        assert_eq!(&canvas.pixels()[0..4], &RED);
        let last_idx = 10 * 10 * 4 - 4;
        assert_eq!(&canvas.pixels()[last_idx..last_idx + 4], &RED);
    }

    #[test]
    fn ops_are_deferred_until_executed() {
        let canvas = Canvas::new(4, 4).draw(DrawOp::Clear(RED));
        assert_eq!(canvas.pending(), 1);
        assert_eq!(&canvas.pixels()[0..4], &[0, 0, 0, 0]);

        let canvas = canvas.execute_ops();
        assert_eq!(canvas.pending(), 0);
        assert_eq!(&canvas.pixels()[0..4], &RED);
    }

    #[test]
    fn square_is_centered() {
        let frame = Canvas::new(10, 10)
            .draw(DrawOp::Square { cx: 5, cy: 5, size: 3, color: RED })
            .into_frame()
            .unwrap();

        assert_eq!(frame.pixel(4, 4), Some(RED));
        assert_eq!(frame.pixel(6, 6), Some(RED));
        assert_eq!(frame.pixel(7, 7), Some([0, 0, 0, 0]));
    }

    #[test]
    fn single_pixel_square() {
        let frame = Canvas::new(4, 4)
            .draw(DrawOp::Square { cx: 1, cy: 2, size: 1, color: RED })
            .into_frame()
            .unwrap();

        assert_eq!(frame.pixel(1, 2), Some(RED));
        assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn disc_covers_center_and_radius() {
        let frame = Canvas::new(20, 20)
            .draw(DrawOp::Disc { cx: 10, cy: 10, radius: 3, color: RED })
            .into_frame()
            .unwrap();

        assert_eq!(frame.pixel(10, 10), Some(RED));
        assert_eq!(frame.pixel(10, 7), Some(RED));
        assert_eq!(frame.pixel(10, 6), Some([0, 0, 0, 0]));
    }

    #[test]
    fn out_of_bounds_is_clipped() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Pixel { x: -1, y: 100, color: RED })
            .draw(DrawOp::Square { cx: 0, cy: 0, size: 5, color: RED })
            .execute_ops();

        assert_eq!(canvas.pixels().len(), 10 * 10 * 4);
        assert_eq!(&canvas.pixels()[0..4], &RED);
    }
}
