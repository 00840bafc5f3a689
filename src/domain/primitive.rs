use super::{Pixel, RenderTarget};

/// Draws lines and rectangles in a single color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Primitive {
    color: Pixel,
}

impl Primitive {
    pub fn new(color: Pixel) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Pixel {
        self.color
    }

    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.color = Pixel::new(red, green, blue);
    }

    /// Steps `max(|dx|, |dy|)` times along the line with fractional `f32` increments.
    ///
    /// The start point is not plotted; each step advances first and then plots the
    /// truncated position. Rounding in the accumulated increments can leave the last
    /// pixel one short of the end point on the minor axis.
    pub fn draw_line<T>(&self, target: &mut T, x1: usize, y1: usize, x2: usize, y2: usize)
    where
        T: RenderTarget + ?Sized,
    {
        let steps = x1.abs_diff(x2).max(y1.abs_diff(y2));
        if steps == 0 {
            return;
        }
        let shift_x = (x2 as f32 - x1 as f32) / steps as f32;
        let shift_y = (y2 as f32 - y1 as f32) / steps as f32;
        let mut x = x1 as f32;
        let mut y = y1 as f32;
        for _ in 0..steps {
            x += shift_x;
            y += shift_y;
            target.draw_pixel(x as usize, y as usize, self.color);
        }
    }

    pub fn draw_rectangle<T>(&self, target: &mut T, x: usize, y: usize, width: usize, height: usize)
    where
        T: RenderTarget + ?Sized,
    {
        let stop_x = x.saturating_add(width);
        let stop_y = y.saturating_add(height);
        self.draw_line(target, x, y, stop_x, y);
        self.draw_line(target, x, stop_y, stop_x, stop_y);
        self.draw_line(target, x, y, x, stop_y);
        self.draw_line(target, stop_x, y, stop_x, stop_y);
    }

    pub fn draw_filled_rectangle<T>(
        &self,
        target: &mut T,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) where
        T: RenderTarget + ?Sized,
    {
        let stop_x = x.saturating_add(width).min(target.width());
        let stop_y = y.saturating_add(height).min(target.height());
        for step_x in x..stop_x {
            for step_y in y..stop_y {
                target.draw_pixel(step_x, step_y, self.color);
            }
        }
    }
}
