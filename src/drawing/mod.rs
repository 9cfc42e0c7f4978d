//! Rendering detected lines.

mod canvas;
pub use self::canvas::Canvas;

mod conics;
pub use self::conics::draw_filled_circle_mut;

mod line;
pub use self::line::{draw_line_segment_mut, draw_thick_line_segment_mut, BresenhamLineIter};

mod render;
pub use self::render::{draw_lines, save_lines, RenderOptions};
