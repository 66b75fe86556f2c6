//! Axis-aligned borders with independently rounded corners.
//!
//! A positive corner radius rounds the corner off with a quarter circle
//! inside the rectangle. A negative radius cuts a concave notch centred on
//! the corner point. Zero keeps the corner square.
use std::f64::consts::{FRAC_PI_2, PI};

use log::trace;

use crate::color::{ColorSpec, Rgb};
use crate::error::{GeometryError, Result};
use crate::surface::{Rect, Surface};
use crate::validate::VectorLike;
use crate::vector::Vector2;

/// Signed radius for each corner of a [`Border`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CornerRadii {
    pub top_left: i32,
    pub top_right: i32,
    pub bottom_left: i32,
    pub bottom_right: i32,
}

impl CornerRadii {
    pub const fn new(top_left: i32, top_right: i32, bottom_left: i32, bottom_right: i32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Uniform radius on all four corners.
    pub const fn all(r: i32) -> Self {
        Self::new(r, r, r, r)
    }

    /// No rounding.
    pub const fn zero() -> Self {
        Self::all(0)
    }

    /// Radii ordered top-left, top-right, bottom-left, bottom-right.
    pub const fn from_array([tl, tr, bl, br]: [i32; 4]) -> Self {
        Self::new(tl, tr, bl, br)
    }

    pub const fn to_array(self) -> [i32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    fn largest_magnitude(self) -> u32 {
        self.to_array()
            .into_iter()
            .map(i32::unsigned_abs)
            .max()
            .unwrap_or(0)
    }
}

impl From<i32> for CornerRadii {
    fn from(r: i32) -> Self {
        Self::all(r)
    }
}

impl From<[i32; 4]> for CornerRadii {
    fn from(radii: [i32; 4]) -> Self {
        Self::from_array(radii)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

/// A stroked rectangle with rounded or notched corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Rgb,
    radii: CornerRadii,
    stroke_width: u32,
}

impl Border {
    /// Create a border spanning two opposite corners.
    ///
    /// Corner coordinates are truncated to integers. Every radius magnitude
    /// must be at most half of the shorter side, and every point `draw`
    /// emits must fit in `i32`.
    pub fn new(
        top_left: impl VectorLike<2>,
        bottom_right: impl VectorLike<2>,
        color: impl Into<ColorSpec>,
        radii: impl Into<CornerRadii>,
        stroke_width: u32,
    ) -> Result<Self> {
        let [ax, ay] = top_left.to_components()?;
        let [bx, by] = bottom_right.to_components()?;
        let color = color.into().resolve()?;
        let radii = radii.into();

        let (ax, ay, bx, by) = (ax as i32, ay as i32, bx as i32, by as i32);
        let border = Self {
            x1: ax.min(bx),
            y1: ay.min(by),
            x2: ax.max(bx),
            y2: ay.max(by),
            color,
            radii,
            stroke_width,
        };

        let limit = border.width().min(border.height()) / 2;
        if radii.largest_magnitude() > limit {
            return Err(GeometryError::value_error(format!(
                "corner radii {:?} exceed half of the shorter side ({limit})",
                radii.to_array()
            )));
        }
        border.check_extent()?;

        trace!(
            "border ({}, {})-({}, {}) radii {:?}",
            border.x1,
            border.y1,
            border.x2,
            border.y2,
            radii.to_array()
        );
        Ok(border)
    }

    pub fn top_left(&self) -> Vector2 {
        Vector2::xy(f64::from(self.x1), f64::from(self.y1))
    }

    pub fn bottom_right(&self) -> Vector2 {
        Vector2::xy(f64::from(self.x2), f64::from(self.y2))
    }

    pub fn width(&self) -> u32 {
        self.x2.abs_diff(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.abs_diff(self.y1)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    fn radius(&self, corner: Corner) -> i32 {
        match corner {
            Corner::TopLeft => self.radii.top_left,
            Corner::TopRight => self.radii.top_right,
            Corner::BottomLeft => self.radii.bottom_left,
            Corner::BottomRight => self.radii.bottom_right,
        }
    }

    /// Reject borders whose sides or notch boxes leave the `i32` range.
    fn check_extent(&self) -> Result<()> {
        let sides_fit =
            i32::try_from(self.width()).is_ok() && i32::try_from(self.height()).is_ok();
        let notches_fit = CORNERS
            .into_iter()
            .filter(|&corner| self.radius(corner) < 0)
            .all(|corner| {
                let d = i64::from(self.inset(corner));
                let (cx, cy) = self.corner_point(corner);
                let (cx, cy) = (i64::from(cx), i64::from(cy));
                [cx - d, cx + d, cy - d, cy + d]
                    .into_iter()
                    .all(|v| i32::try_from(v).is_ok())
            });

        if sides_fit && notches_fit {
            Ok(())
        } else {
            Err(GeometryError::value_error(format!(
                "border ({}, {})-({}, {}) with radii {:?} does not fit in 32-bit surface coordinates",
                self.x1,
                self.y1,
                self.x2,
                self.y2,
                self.radii.to_array()
            )))
        }
    }

    fn inset(&self, corner: Corner) -> i32 {
        self.radius(corner).abs()
    }

    fn corner_point(&self, corner: Corner) -> (i32, i32) {
        match corner {
            Corner::TopLeft => (self.x1, self.y1),
            Corner::TopRight => (self.x2, self.y1),
            Corner::BottomLeft => (self.x1, self.y2),
            Corner::BottomRight => (self.x2, self.y2),
        }
    }

    /// Unit step from the corner point towards the inside of the rectangle.
    fn inward(corner: Corner) -> (i32, i32) {
        match corner {
            Corner::TopLeft => (1, 1),
            Corner::TopRight => (-1, 1),
            Corner::BottomLeft => (1, -1),
            Corner::BottomRight => (-1, -1),
        }
    }

    /// Bounding box and sweep of the arc drawn at `corner`, if any.
    fn arc(&self, corner: Corner) -> Option<(Rect, f64, f64)> {
        let r = self.radius(corner);
        let d = r.abs();
        let (cx, cy) = self.corner_point(corner);
        let side = 2 * d;

        if r > 0 {
            let (x, y, start) = match corner {
                Corner::TopLeft => (cx, cy, FRAC_PI_2),
                Corner::TopRight => (cx - side, cy, 0.0),
                Corner::BottomLeft => (cx, cy - side, PI),
                Corner::BottomRight => (cx - side, cy - side, 3.0 * FRAC_PI_2),
            };
            Some((Rect::new(x, y, side, side), start, start + FRAC_PI_2))
        } else if r < 0 {
            let start = match corner {
                Corner::TopLeft => 3.0 * FRAC_PI_2,
                Corner::TopRight => PI,
                Corner::BottomLeft => 0.0,
                Corner::BottomRight => FRAC_PI_2,
            };
            Some((Rect::new(cx - d, cy - d, side, side), start, start + FRAC_PI_2))
        } else {
            None
        }
    }

    /// Stroke the four edges, then one quarter arc per rounded corner.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (x1, y1, x2, y2) = (self.x1, self.y1, self.x2, self.y2);
        let tl = self.inset(Corner::TopLeft);
        let tr = self.inset(Corner::TopRight);
        let bl = self.inset(Corner::BottomLeft);
        let br = self.inset(Corner::BottomRight);
        let (color, width) = (self.color, self.stroke_width);

        surface.draw_line((x1 + tl, y1), (x2 - tr, y1), color, width);
        surface.draw_line((x1 + bl, y2), (x2 - br, y2), color, width);
        surface.draw_line((x1, y1 + tl), (x1, y2 - bl), color, width);
        surface.draw_line((x2, y1 + tr), (x2, y2 - br), color, width);

        for corner in CORNERS {
            if let Some((bounds, start, end)) = self.arc(corner) {
                surface.draw_arc(bounds, start, end, color, width);
            }
        }
    }

    /// Whether `point` lies strictly inside the border. Points on an edge
    /// or on a corner arc are outside.
    pub fn contains(&self, point: &Vector2) -> bool {
        let (x, y) = (point.x(), point.y());
        let (x1, y1) = (f64::from(self.x1), f64::from(self.y1));
        let (x2, y2) = (f64::from(self.x2), f64::from(self.y2));
        if x <= x1 || x >= x2 || y <= y1 || y >= y2 {
            return false;
        }

        for corner in CORNERS {
            let r = self.radius(corner);
            let d = f64::from(r.abs());
            let (px, py) = self.corner_point(corner);
            let (px, py) = (f64::from(px), f64::from(py));
            let (sx, sy) = Self::inward(corner);
            let (sx, sy) = (f64::from(sx), f64::from(sy));

            // Distances from the corner point, measured inwards
            let (ix, iy) = ((x - px) * sx, (y - py) * sy);
            if ix > d || iy > d {
                continue;
            }

            return match r.signum() {
                1 => {
                    let (dx, dy) = (ix - d, iy - d);
                    dx * dx + dy * dy < d * d
                }
                -1 => ix * ix + iy * iy > d * d,
                _ => true,
            };
        }

        true
    }

    /// [`Border::contains`] for any vector-like point.
    pub fn is_in(&self, point: impl VectorLike<2>) -> Result<bool> {
        let point = Vector2::from_like(point)?;
        Ok(self.contains(&point))
    }

    /// Containment of each point, in input order.
    ///
    /// Fails on the first malformed point.
    pub fn are_in<I, P>(&self, points: I) -> Result<Vec<bool>>
    where
        I: IntoIterator<Item = P>,
        P: VectorLike<2>,
    {
        points.into_iter().map(|point| self.is_in(point)).collect()
    }

    /// Redraw the border in `background`, which becomes its stroke color.
    ///
    /// The border is left untouched if `background` is not a valid color.
    pub fn erase<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        background: impl Into<ColorSpec>,
    ) -> Result<()> {
        self.color = background.into().resolve()?;
        self.draw(surface);
        Ok(())
    }
}
