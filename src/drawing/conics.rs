use crate::drawing::line::draw_line_segment_mut;
use crate::drawing::Canvas;

/// Draws a circle and its contents on an image in place.
///
/// Draws as much of a circle and its contents as lies inside the image bounds.
/// Uses the [midpoint circle algorithm](https://en.wikipedia.org/wiki/Midpoint_circle_algorithm)
/// and fills each scanline of the circle with a horizontal line segment.
pub fn draw_filled_circle_mut<C>(canvas: &mut C, center: (i32, i32), radius: i32, color: C::Pixel)
where
    C: Canvas,
{
    let mut x = 0i32;
    let mut y = radius;
    let mut p = 1 - radius;
    let (x0, y0) = center;

    let mut scanline = |half_width: i32, dy: i32| {
        draw_line_segment_mut(
            &mut *canvas,
            ((x0 - half_width) as f32, (y0 + dy) as f32),
            ((x0 + half_width) as f32, (y0 + dy) as f32),
            color,
        );
    };

    while x <= y {
        scanline(x, y);
        scanline(y, x);
        scanline(x, -y);
        scanline(y, -x);

        x += 1;
        if p < 0 {
            p += 2 * x + 1;
        } else {
            y -= 1;
            p += 2 * (x - y) + 1;
        }
    }
}
