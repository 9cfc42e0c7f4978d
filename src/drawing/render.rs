use crate::definitions::{HasBlack, HasWhite};
use crate::drawing::line::draw_thick_line_segment_mut;
use crate::error::{HoughError, Result};
use crate::lines::LineSegment;
use image::{Rgb, RgbImage};
use log::debug;
use std::path::Path;

/// Colors and width used to render detected lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Color of the lines.
    pub line_color: Rgb<u8>,
    /// Color of every pixel not on a line.
    pub background: Rgb<u8>,
    /// Width of the lines in pixels. Must be at least 1.
    pub thickness: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            line_color: Rgb::white(),
            background: Rgb::black(),
            thickness: 1,
        }
    }
}

impl RenderOptions {
    /// Checks that the lines have a non-zero thickness.
    pub fn validate(&self) -> Result<()> {
        if self.thickness == 0 {
            return Err(HoughError::invalid(
                "thickness",
                self.thickness,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Draws `segments` on a new `width` x `height` image filled with the
/// background color.
///
/// # Examples
/// ```
/// use houghlines::drawing::{draw_lines, RenderOptions};
/// use houghlines::lines::LineSegment;
/// use houghlines::point::Point;
/// use image::Rgb;
///
/// let diagonal = LineSegment {
///     start: Point::new(0.0, 0.0),
///     end: Point::new(4.0, 4.0),
/// };
/// let image = draw_lines(5, 5, &[diagonal], &RenderOptions::default());
/// assert_eq!(image.get_pixel(2, 2), &Rgb([255, 255, 255]));
/// assert_eq!(image.get_pixel(2, 3), &Rgb([0, 0, 0]));
/// ```
pub fn draw_lines(
    width: u32,
    height: u32,
    segments: &[LineSegment],
    options: &RenderOptions,
) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, options.background);
    for segment in segments {
        draw_thick_line_segment_mut(&mut image, segment, options.thickness, options.line_color);
    }
    image
}

/// Draws `segments` as [`draw_lines`] does and writes the result to `path`.
///
/// The output format is chosen from the file extension.
pub fn save_lines<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    segments: &[LineSegment],
    options: &RenderOptions,
) -> Result<()> {
    options.validate()?;
    let path = path.as_ref();
    let image = draw_lines(width, height, segments, options);
    image.save(path).map_err(|source| HoughError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {} lines to {}", segments.len(), path.display());
    Ok(())
}
