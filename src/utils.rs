//! Utils for testing and debugging.

use image::{GenericImageView, GrayImage, Luma, Pixel};
use std::fmt::Debug;

/// Helper for defining greyscale images.
///
/// Columns are separated by commas and rows by semi-colons.
/// By default a subpixel type of `u8` is used but this can be
/// overridden, as shown in the examples.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate houghlines;
/// # fn main() {
/// use image::{GrayImage, ImageBuffer, Luma};
///
/// // An empty grayscale image with pixel type Luma<u8>
/// let empty = gray_image!();
///
/// assert_pixels_eq!(
///     empty,
///     GrayImage::from_raw(0, 0, vec![]).unwrap()
/// );
///
/// // A single pixel grayscale image with pixel type Luma<u32>
/// let single_pixel = gray_image!(type: u32, 1);
///
/// assert_pixels_eq!(
///     single_pixel,
///     ImageBuffer::<Luma<u32>, Vec<u32>>::from_raw(1, 1, vec![1]).unwrap()
/// );
///
/// // A 2 x 3 grayscale image with pixel type Luma<u8>
/// let image = gray_image!(
///     1, 2, 3;
///     4, 5, 6);
///
/// let equivalent = GrayImage::from_raw(3, 2, vec![
///     1, 2, 3,
///     4, 5, 6
/// ]).unwrap();
///
/// assert_pixels_eq!(image, equivalent);
/// # }
/// ```
#[macro_export]
macro_rules! gray_image {
    // Empty image with default channel type u8
    () => {
        gray_image!(type: u8)
    };
    // Empty image with the given channel type
    (type: $channel_type:ty) => {
        {
            use image::{ImageBuffer, Luma};
            ImageBuffer::<Luma<$channel_type>, Vec<$channel_type>>::new(0, 0)
        }
    };
    // Non-empty image of default channel type u8
    ($( $( $x: expr ),*);*) => {
        gray_image!(type: u8, $( $( $x ),*);*)
    };
    // Non-empty image of given channel type
    (type: $channel_type:ty, $( $( $x: expr ),*);*) => {
        {
            use image::{ImageBuffer, Luma};

            let nested_array = [ $( [ $($x),* ] ),* ];
            let height = nested_array.len() as u32;
            let width = nested_array[0].len() as u32;

            let flat_array: Vec<$channel_type> = nested_array
                .iter()
                .flat_map(|row| row.iter())
                .cloned()
                .collect();

            ImageBuffer::<Luma<$channel_type>, Vec<$channel_type>>::from_raw(width, height, flat_array)
                .unwrap()
        }
    }
}

/// Panics if any pixels differ between the two input images.
#[macro_export]
macro_rules! assert_pixels_eq {
    ($actual:expr, $expected:expr) => {{
        let actual_dim = $actual.dimensions();
        let expected_dim = $expected.dimensions();

        if actual_dim != expected_dim {
            panic!(
                "dimensions do not match. actual: {:?}, expected: {:?}",
                actual_dim, expected_dim
            )
        }

        let diffs = $crate::utils::pixel_diffs(&$actual, &$expected);
        if !diffs.is_empty() {
            panic!("{}", $crate::utils::describe_pixel_diffs(&diffs))
        }
    }};
}

/// A pixel location together with the actual and expected pixel values there.
pub type Diff<P> = ((u32, u32), P, P);

/// Returns the locations and values of all pixels which differ between `actual`
/// and `expected`, in row-major order. The images must have the same dimensions.
pub fn pixel_diffs<I, J, P>(actual: &I, expected: &J) -> Vec<Diff<P>>
where
    I: GenericImageView<Pixel = P>,
    J: GenericImageView<Pixel = P>,
    P: Pixel + PartialEq,
{
    actual
        .pixels()
        .zip(expected.pixels())
        .filter(|(a, e)| a.2 != e.2)
        .map(|(a, e)| ((a.0, a.1), a.2, e.2))
        .collect()
}

/// Formats the first few pixel differences for use in a panic message.
pub fn describe_pixel_diffs<P: Debug>(diffs: &[Diff<P>]) -> String {
    let mut err = "pixels do not match.".to_string();
    for ((x, y), actual, expected) in diffs.iter().take(5) {
        err.push_str(&format!(
            "\nlocation: ({}, {}), actual: {:?}, expected: {:?}",
            x, y, actual, expected
        ));
    }
    if diffs.len() > 5 {
        err.push_str(&format!("\n... and {} more", diffs.len() - 5));
    }
    err
}

/// Rasterises the line `y = slope * x + intercept` for every column
/// of a `width` x `height` image, rounding `y` half away from zero.
/// Points falling outside the image are skipped.
pub fn sloped_line_image(width: u32, height: u32, slope: f64, intercept: f64) -> GrayImage {
    let mut image = GrayImage::new(width, height);
    for x in 0..width {
        let y = (slope * x as f64 + intercept).round();
        if y >= 0.0 && y < height as f64 {
            image.put_pixel(x, y as u32, Luma([255u8]));
        }
    }
    image
}

/// Edge image to use in benchmarks: a grid of horizontal and vertical
/// lines plus two diagonals, so the vote space has several clusters of
/// different shapes.
pub fn edge_bench_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let on_grid = x % 64 == 0 || y % 48 == 0;
        let on_diagonal = x == y || x + y == width.min(height);
        if on_grid || on_diagonal {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
