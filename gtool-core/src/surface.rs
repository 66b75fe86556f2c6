//! Drawing capability consumed by [`crate::Border`].
use crate::color::Rgb;

/// Axis-aligned rectangle in surface coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.w) / 2.0,
            f64::from(self.y) + f64::from(self.h) / 2.0,
        )
    }
}

/// A target that lines and arcs can be stroked onto.
pub trait Surface {
    /// Stroke a straight segment between two points, both inclusive.
    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), color: Rgb, width: u32);

    /// Stroke the part of the ellipse inscribed in `bounds` between two
    /// angles in radians, measured counter-clockwise from +x as seen on
    /// screen.
    fn draw_arc(&mut self, bounds: Rect, start_angle: f64, end_angle: f64, color: Rgb, width: u32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), color: Rgb, width: u32) {
        (**self).draw_line(start, end, color, width);
    }

    fn draw_arc(&mut self, bounds: Rect, start_angle: f64, end_angle: f64, color: Rgb, width: u32) {
        (**self).draw_arc(bounds, start_angle, end_angle, color, width);
    }
}
