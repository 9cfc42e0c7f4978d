use crate::drawing::conics::draw_filled_circle_mut;
use crate::drawing::Canvas;
use crate::lines::LineSegment;
use std::mem::swap;

/// Iterates over the coordinates in a line segment using
/// [Bresenham's line drawing algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm).
///
/// # Examples
/// ```
/// use houghlines::drawing::BresenhamLineIter;
///
/// let points: Vec<_> = BresenhamLineIter::new((0.0, 0.0), (3.0, 1.0)).collect();
/// assert_eq!(points, vec![(0, 0), (1, 0), (2, 1), (3, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct BresenhamLineIter {
    dx: f32,
    dy: f32,
    x: i32,
    y: i32,
    error: f32,
    end_x: i32,
    is_steep: bool,
    y_step: i32,
}

impl BresenhamLineIter {
    /// Creates a [`BresenhamLineIter`] which will iterate over the integer coordinates
    /// between `start` and `end`.
    pub fn new(start: (f32, f32), end: (f32, f32)) -> BresenhamLineIter {
        let (mut x0, mut y0) = (start.0, start.1);
        let (mut x1, mut y1) = (end.0, end.1);

        let is_steep = (y1 - y0).abs() > (x1 - x0).abs();
        if is_steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }

        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;

        BresenhamLineIter {
            dx,
            dy: (y1 - y0).abs(),
            x: x0 as i32,
            y: y0 as i32,
            error: dx / 2f32,
            end_x: x1 as i32,
            is_steep,
            y_step: if y0 < y1 { 1 } else { -1 },
        }
    }
}

impl Iterator for BresenhamLineIter {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x > self.end_x {
            None
        } else {
            let ret = if self.is_steep {
                (self.y, self.x)
            } else {
                (self.x, self.y)
            };

            self.x += 1;
            self.error -= self.dy;
            if self.error < 0f32 {
                self.y += self.y_step;
                self.error += self.dx;
            }

            Some(ret)
        }
    }
}

/// Draws as much of the line segment between start and end as lies inside the image bounds.
/// Uses [Bresenham's line drawing algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm).
pub fn draw_line_segment_mut<C>(canvas: &mut C, start: (f32, f32), end: (f32, f32), color: C::Pixel)
where
    C: Canvas,
{
    let (width, height) = canvas.dimensions();
    let in_bounds = |x, y| x >= 0 && x < width as i32 && y >= 0 && y < height as i32;

    for (x, y) in BresenhamLineIter::new(start, end) {
        if in_bounds(x, y) {
            canvas.draw_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draws a line segment `thickness` pixels wide.
///
/// A thickness of 1 is a plain Bresenham line. Thicker lines stamp a filled
/// disc of radius `thickness / 2` at every point of the Bresenham path, so
/// even thicknesses come out one pixel wider than requested. A thickness of
/// 0 draws nothing.
pub fn draw_thick_line_segment_mut<C>(
    canvas: &mut C,
    segment: &LineSegment,
    thickness: u32,
    color: C::Pixel,
) where
    C: Canvas,
{
    let start = (segment.start.x.round() as f32, segment.start.y.round() as f32);
    let end = (segment.end.x.round() as f32, segment.end.y.round() as f32);
    match thickness {
        0 => {}
        1 => draw_line_segment_mut(canvas, start, end, color),
        _ => {
            let radius = (thickness / 2) as i32;
            for center in BresenhamLineIter::new(start, end) {
                draw_filled_circle_mut(canvas, center, radius, color);
            }
        }
    }
}
