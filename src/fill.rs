//! Flood filling of connected regions.

use crate::definitions::Image;
use image::Pixel;
use std::collections::VecDeque;

/// Determines which neighbors of a pixel we consider
/// to be connected to it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Connectivity {
    /// A pixel is connected to its N, S, E and W neighbors.
    Four,
    /// A pixel is connected to all of its neighbors.
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &[(0, -1), (-1, 0), (1, 0), (0, 1)],
            Connectivity::Eight => &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
        }
    }
}

/// Replaces the connected region of pixels equal to the pixel at `(x, y)`
/// with `fill_with`, like the bucket tool in a paint program.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate houghlines;
/// # fn main() {
/// use image::Luma;
/// use houghlines::fill::{flood_fill, Connectivity};
///
/// let image = gray_image!(
///     1, 0, 1, 1;
///     0, 1, 1, 0;
///     0, 0, 0, 0;
///     0, 0, 0, 1);
///
/// // Diagonal neighbours only join the region with eight-way connectivity.
/// let four = gray_image!(
///     1, 0, 9, 9;
///     0, 9, 9, 0;
///     0, 0, 0, 0;
///     0, 0, 0, 1);
/// assert_pixels_eq!(flood_fill(&image, 2, 0, Luma([9]), Connectivity::Four), four);
///
/// let eight = gray_image!(
///     9, 0, 9, 9;
///     0, 9, 9, 0;
///     0, 0, 0, 0;
///     0, 0, 0, 1);
/// assert_pixels_eq!(flood_fill(&image, 2, 0, Luma([9]), Connectivity::Eight), eight);
/// # }
/// ```
pub fn flood_fill<P>(
    image: &Image<P>,
    x: u32,
    y: u32,
    fill_with: P,
    connectivity: Connectivity,
) -> Image<P>
where
    P: Pixel + PartialEq,
{
    let mut filled_image = image.clone();
    flood_fill_mut(&mut filled_image, x, y, fill_with, connectivity);
    filled_image
}

#[doc=generate_mut_doc_comment!("flood_fill")]
///
/// Returns the coordinates of every filled pixel, in the order they were
/// reached by a breadth-first search from `(x, y)`. Nothing is filled if
/// `(x, y)` is out of bounds or already equal to `fill_with`.
pub fn flood_fill_mut<P>(
    image: &mut Image<P>,
    x: u32,
    y: u32,
    fill_with: P,
    connectivity: Connectivity,
) -> Vec<(u32, u32)>
where
    P: Pixel + PartialEq,
{
    let (width, height) = image.dimensions();
    if x >= width || y >= height {
        return Vec::new();
    }
    let target = *image.get_pixel(x, y);
    if target == fill_with {
        return Vec::new();
    }

    let mut filled = Vec::new();
    let mut queue = VecDeque::new();
    image.put_pixel(x, y, fill_with);
    queue.push_back((x, y));

    while let Some((px, py)) = queue.pop_front() {
        filled.push((px, py));
        for &(dx, dy) in connectivity.offsets() {
            let (nx, ny) = (i64::from(px) + dx, i64::from(py) + dy);
            if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if *image.get_pixel(nx, ny) == target {
                image.put_pixel(nx, ny, fill_with);
                queue.push_back((nx, ny));
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_fill_returns_region() {
        let mut image = gray_image!(
            0, 5, 5;
            0, 5, 0;
            5, 0, 0);
        let mut filled = flood_fill_mut(&mut image, 1, 0, Luma([0]), Connectivity::Four);
        filled.sort();
        assert_eq!(filled, vec![(1, 0), (1, 1), (2, 0)]);
        let expected = gray_image!(
            0, 0, 0;
            0, 0, 0;
            5, 0, 0);
        assert_pixels_eq!(image, expected);
    }

    #[test]
    fn test_eight_connectivity_crosses_diagonals() {
        let mut image = gray_image!(
            0, 5, 5;
            0, 5, 0;
            5, 0, 0);
        let filled = flood_fill_mut(&mut image, 1, 0, Luma([0]), Connectivity::Eight);
        assert_eq!(filled.len(), 4);
        assert!(image.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_breadth_first_order() {
        let mut image = GrayImage::from_pixel(5, 1, Luma([1]));
        let filled = flood_fill_mut(&mut image, 2, 0, Luma([0]), Connectivity::Four);
        assert_eq!(filled, vec![(2, 0), (1, 0), (3, 0), (0, 0), (4, 0)]);
    }

    #[test]
    fn test_fill_with_same_value_is_noop() {
        let mut image = GrayImage::from_pixel(3, 3, Luma([7]));
        let filled = flood_fill_mut(&mut image, 1, 1, Luma([7]), Connectivity::Eight);
        assert!(filled.is_empty());
        assert!(image.pixels().all(|p| p[0] == 7));
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let mut image = GrayImage::new(3, 3);
        assert!(flood_fill_mut(&mut image, 3, 0, Luma([1]), Connectivity::Four).is_empty());
    }

    #[test]
    fn test_fill_rgb() {
        let image = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let filled = flood_fill(&image, 0, 0, Rgb([9, 9, 9]), Connectivity::Four);
        assert!(filled.pixels().all(|p| *p == Rgb([9, 9, 9])));
    }
}
