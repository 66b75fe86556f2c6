/// Character-cell canvas that rasterises strokes and blits them to a terminal
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use gtool_core::{Matrix4, Mesh, Rect, Rgb, Surface, Transform, Vector3};
use std::io::Write;

/// Character printed for every painted cell
const GLYPH: char = '█';

/// Off-screen grid of colored cells
pub struct TermCanvas {
    width: usize,
    height: usize,
    cells: Vec<Option<Rgb>>,
}

impl TermCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Color of the cell at `(x, y)`, if it has been painted.
    pub fn cell(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// Number of painted cells
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn plot(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Some(color);
        }
    }

    /// Paint a square brush of side `width` centred on `(x, y)`.
    fn stamp(&mut self, x: i32, y: i32, color: Rgb, width: u32) {
        let side = width.max(1) as i32;
        let low = -(side - 1) / 2;
        for dy in low..low + side {
            for dx in low..low + side {
                self.plot(x + dx, y + dy, color);
            }
        }
    }

    /// Project `mesh` through `mvp` and stroke every triangle edge.
    ///
    /// Normalised device coordinates in [-1, 1] map onto the whole canvas.
    /// Triangles with a vertex that does not project to a finite point are
    /// skipped.
    pub fn draw_mesh(&mut self, mesh: &Mesh, mvp: &Matrix4, color: Rgb) {
        for triangle in mesh {
            let mut screen = [(0, 0); 3];
            let mut visible = true;
            for (slot, vertex) in screen.iter_mut().zip(&triangle.vertices) {
                match self.to_screen(&Transform::apply_point(mvp, vertex)) {
                    Some(point) => *slot = point,
                    None => visible = false,
                }
            }
            if !visible {
                continue;
            }

            for (i, &start) in screen.iter().enumerate() {
                self.draw_line(start, screen[(i + 1) % 3], color, 1);
            }
        }
    }

    fn to_screen(&self, ndc: &Vector3) -> Option<(i32, i32)> {
        let x = (ndc.x() + 1.0) * 0.5 * self.width as f64;
        let y = (1.0 - ndc.y()) * 0.5 * self.height as f64;
        if x.is_finite() && y.is_finite() && x.abs() < 1e6 && y.abs() < 1e6 {
            Some((x.round() as i32, y.round() as i32))
        } else {
            None
        }
    }

    /// Write the canvas to `writer` with its top-left cell at `origin`.
    pub fn blit<W: Write>(&self, writer: &mut W, origin: (u16, u16)) -> std::io::Result<()> {
        let (ox, oy) = origin;
        for (row, cells) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(MoveTo(ox, oy.saturating_add(row as u16)))?;
            for cell in cells {
                match cell {
                    Some(Rgb { r, g, b }) => {
                        writer.queue(SetForegroundColor(Color::Rgb {
                            r: *r,
                            g: *g,
                            b: *b,
                        }))?;
                        writer.queue(Print(GLYPH))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TermCanvas {
    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), color: Rgb, width: u32) {
        // Bresenham
        let (mut x, mut y) = start;
        let dx = (end.0 - x).abs();
        let dy = -(end.1 - y).abs();
        let sx = if x < end.0 { 1 } else { -1 };
        let sy = if y < end.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, color, width);
            if (x, y) == end {
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

    fn draw_arc(&mut self, bounds: Rect, start_angle: f64, end_angle: f64, color: Rgb, width: u32) {
        let (cx, cy) = bounds.center();
        let rx = f64::from(bounds.w) / 2.0;
        let ry = f64::from(bounds.h) / 2.0;
        let sweep = end_angle - start_angle;
        let steps = ((sweep.abs() * rx.max(ry) * 2.0).ceil() as usize).max(1);

        for i in 0..=steps {
            let angle = start_angle + sweep * i as f64 / steps as f64;
            // Screen y grows downwards
            let x = cx + rx * angle.cos();
            let y = cy - ry * angle.sin();
            self.stamp(x.round() as i32, y.round() as i32, color, width);
        }
    }
}
