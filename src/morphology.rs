//! Grayscale [morphological dilation] with arbitrary structuring elements.
//!
//! Dilation is used to merge the spread-out votes of a single line into one
//! blob before the vote space is thresholded. Binary dilation is the special
//! case of an image whose only values are zero and one other value.
//!
//! [morphological dilation]: https://homepages.inf.ed.ac.uk/rbf/HIPR2/dilate.htm

use crate::definitions::Image;
use crate::point::Point;
use image::{Luma, Primitive};
use itertools::Itertools;

/// A structuring element used in grayscale morphological operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    /// For any optimisation/arithmetic purposes, it is guaranteed that:
    /// - all the integer values will be strictly between -512 and 512
    /// - all tuples will be sorted in reverse lexicographic order, line by line ((-1,-1),(0,-1),(1,-1),(-1,0),(0,0),...)
    /// - no tuple shall appear twice
    elements: Vec<Point<i16>>,
}

macro_rules! lines {
    ($mask:expr) => {
        $mask
            .elements
            .iter()
            .group_by(|p| p.y)
            .into_iter()
            .map(|(y, line)| (y, line.map(|p| p.x)))
    };
}

impl Mask {
    fn new(elements: Vec<Point<i16>>) -> Self {
        assert!(elements.len() <= (511 * 511) as usize);
        debug_assert!(elements.iter().tuple_windows().all(|(a, b)| {
            if a.y == b.y {
                a.x < b.x
            } else {
                a.y < b.y
            }
        }));
        Self { elements }
    }

    /// Number of points in the mask.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the mask has no points.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Creates a disk-shaped mask containing all points with `L2` norm at most `radius`.
    ///
    /// # Example
    /// ```
    /// # extern crate image;
    /// # #[macro_use]
    /// # extern crate houghlines;
    /// # fn main() {
    /// use houghlines::morphology::Mask;
    ///
    /// use houghlines::morphology::grayscale_dilate;
    ///
    /// // Dilating a single point stamps the disk around it.
    /// let mut point = gray_image!(
    ///     0, 0, 0, 0, 0, 0, 0;
    ///     0, 0, 0, 0, 0, 0, 0;
    ///     0, 0, 0, 0, 0, 0, 0;
    ///     0, 0, 0, 0, 0, 0, 0;
    ///     0, 0, 0, 0, 0, 0, 0;
    ///     0, 0, 0, 0, 0, 0, 0;
    ///     0, 0, 0, 0, 0, 0, 0
    /// );
    /// point.put_pixel(3, 3, image::Luma([255]));
    ///
    /// let disk_3 = gray_image!(
    ///       0,   0,   0, 255,   0,   0,   0;
    ///       0, 255, 255, 255, 255, 255,   0;
    ///       0, 255, 255, 255, 255, 255,   0;
    ///     255, 255, 255, 255, 255, 255, 255;
    ///       0, 255, 255, 255, 255, 255,   0;
    ///       0, 255, 255, 255, 255, 255,   0;
    ///       0,   0,   0, 255,   0,   0,   0
    /// );
    /// assert_pixels_eq!(grayscale_dilate(&point, &Mask::disk(3)), disk_3);
    /// assert_eq!(Mask::disk(3).len(), 29);
    /// # }
    /// ```
    pub fn disk(radius: u8) -> Self {
        let radius_squared = u32::from(radius).pow(2);
        let half_widths_per_height = std::iter::successors(
            Some((-i16::from(radius), 0u8)),
            |&(last_height, last_half_width)| {
                if last_height == i16::from(radius) {
                    return None;
                };
                let next_height = last_height + 1;
                let height_squared = (u32::from(next_height.unsigned_abs())).pow(2);
                let next_half_width = if next_height <= 0 {
                    // upper part of the circle => increasing width
                    (u32::from(last_half_width)..)
                        .find(|x| (x + 1).pow(2) + height_squared > radius_squared)?
                } else {
                    // lower part of the circle => decreasing width
                    (0u32..=last_half_width.into())
                        .rev()
                        .find(|&x| x.pow(2) + height_squared <= radius_squared)?
                };
                u8::try_from(next_half_width)
                    .ok()
                    .map(|half_width| (next_height, half_width))
            },
        );
        let cap = half_widths_per_height
            .clone()
            .map(|(_, half_width)| 2 * usize::from(half_width) + 1)
            .sum();
        let mut elements = Vec::with_capacity(cap);
        let points = half_widths_per_height.flat_map(|(y, half_width)| {
            (-i16::from(half_width)..=i16::from(half_width)).map(move |x| Point::new(x, y))
        });
        elements.extend(points);
        Self::new(elements)
    }
}

fn mask_reduce<T, F>(image: &Image<Luma<T>>, mask: &Mask, neutral: T, operator: F) -> Image<Luma<T>>
where
    T: Primitive,
    F: Fn(T, T) -> T,
{
    let mut result = Image::<Luma<T>>::from_pixel(image.width(), image.height(), Luma([neutral]));
    let width = image.width() as usize;
    if width == 0 {
        return result;
    }
    for (y, line_group) in lines!(mask) {
        let y = i64::from(y);
        let line = line_group.collect::<Vec<_>>();
        let input_rows = image.chunks(width).skip(y.try_into().unwrap_or(0));
        let output_rows = result.chunks_mut(width).skip((-y).try_into().unwrap_or(0));
        for (input_row, output_row) in input_rows.zip(output_rows) {
            for x in line.iter().copied() {
                let inputs = input_row.iter().skip(x.try_into().unwrap_or(0));
                let outputs = output_row.iter_mut().skip((-x).try_into().unwrap_or(0));
                for (&input, output) in inputs.zip(outputs) {
                    *output = operator(input, *output);
                }
            }
        }
    }
    result
}

/// Computes the morphologic dilation of `image` with the given mask.
///
/// For each input pixel, the output pixel will be the maximum of all pixels included
/// in the mask at that position. If the mask doesn't intersect any input pixel at some point,
/// it will default to zero.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate houghlines;
/// # fn main() {
/// use houghlines::morphology::{Mask, grayscale_dilate};
///
/// let image = gray_image!(
///     7,   0,   0,   0,   0,   0;
///     0,   0,   0,   0,   0,   0;
///     0,   0,  99,   0,   0,   0;
///     0,   0,   0,   0,   0,   0;
///     0,   0,   0,   0,   0, 222
/// );
///
/// // A disk of radius 1 is a cross.
/// let dilated = gray_image!(
///     7,   7,   0,   0,   0,   0;
///     7,   0,  99,   0,   0,   0;
///     0,  99,  99,  99,   0,   0;
///     0,   0,  99,   0,   0, 222;
///     0,   0,   0,   0, 222, 222
/// );
/// assert_pixels_eq!(grayscale_dilate(&image, &Mask::disk(1)), dilated);
///
/// // Vote counts need more than eight bits, so wider channels work too.
/// let votes = gray_image!(type: u32,
///     0,    0, 0;
///     0, 1000, 0;
///     0,    0, 3);
/// let votes_dilated = gray_image!(type: u32,
///        0, 1000,    0;
///     1000, 1000, 1000;
///        0, 1000,    3);
/// assert_pixels_eq!(grayscale_dilate(&votes, &Mask::disk(1)), votes_dilated);
/// # }
/// ```
pub fn grayscale_dilate<T>(image: &Image<Luma<T>>, mask: &Mask) -> Image<Luma<T>>
where
    T: Primitive + Ord,
{
    mask_reduce(image, mask, T::DEFAULT_MIN_VALUE, std::cmp::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_mask_sizes() {
        assert_eq!(Mask::disk(0).len(), 1);
        assert_eq!(Mask::disk(1).len(), 5);
        assert_eq!(Mask::disk(2).len(), 13);
        assert!(!Mask::disk(10).is_empty());
    }

    #[test]
    fn test_disk_is_symmetric() {
        let disk = Mask::disk(6);
        let points: Vec<_> = disk.elements.clone();
        for p in &points {
            assert!(points.contains(&Point::new(-p.x, p.y)));
            assert!(points.contains(&Point::new(p.x, -p.y)));
            assert!(i32::from(p.x).pow(2) + i32::from(p.y).pow(2) <= 36);
        }
    }

    #[test]
    fn test_dilate_point_with_disk() {
        let mut image = GrayImage::new(9, 9);
        image.put_pixel(4, 4, Luma([200u8]));
        let dilated = grayscale_dilate(&image, &Mask::disk(3));
        let stamped: Vec<Point<i16>> = dilated
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] != 0)
            .map(|(x, y, _)| Point::new(x as i16 - 4, y as i16 - 4))
            .collect();
        assert_eq!(stamped, Mask::disk(3).elements);
        assert!(dilated.pixels().all(|p| p[0] == 0 || p[0] == 200));
    }

    #[test]
    fn test_dilate_at_image_border() {
        let image = gray_image!(type: u32,
            5, 0, 0, 0;
            0, 0, 0, 0);
        let expected = gray_image!(type: u32,
            5, 5, 0, 0;
            5, 0, 0, 0);
        assert_pixels_eq!(grayscale_dilate(&image, &Mask::disk(1)), expected);
    }

    #[test]
    fn test_dilate_empty_image() {
        let image: Image<Luma<u32>> = Image::new(0, 0);
        let dilated = grayscale_dilate(&image, &Mask::disk(4));
        assert_eq!(dilated.dimensions(), (0, 0));
    }
}
