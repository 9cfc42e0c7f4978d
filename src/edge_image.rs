//! Binary edge images: the pixels which vote in the Hough transform.

use crate::error::{HoughError, Result};
use image::{GrayImage, Luma};
use log::debug;
use std::path::Path;

/// An immutable grid of foreground (edge) and background pixels.
///
/// A pixel belongs to the foreground if its intensity is non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeImage {
    image: GrayImage,
    num_edge_pixels: usize,
}

impl EdgeImage {
    /// Wraps a grayscale image. Every non-zero pixel is treated as an edge pixel.
    pub fn new(image: GrayImage) -> EdgeImage {
        let num_edge_pixels = image.pixels().filter(|p| p[0] > 0).count();
        EdgeImage {
            image,
            num_edge_pixels,
        }
    }

    /// Creates a `width` x `height` edge image whose foreground is exactly
    /// the given points. Points outside the image are ignored.
    ///
    /// # Examples
    /// ```
    /// use houghlines::edge_image::EdgeImage;
    ///
    /// let edges = EdgeImage::from_points(4, 3, [(0, 0), (3, 2), (9, 9)]);
    /// assert_eq!(edges.num_edge_pixels(), 2);
    /// assert!(edges.is_foreground(3, 2));
    /// ```
    pub fn from_points<I>(width: u32, height: u32, points: I) -> EdgeImage
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut image = GrayImage::new(width, height);
        for (x, y) in points {
            if x < width && y < height {
                image.put_pixel(x, y, Luma([255u8]));
            }
        }
        EdgeImage::new(image)
    }

    /// Reads and decodes the image at `path`, converting it to 8-bit grayscale.
    ///
    /// Any non-black pixel becomes an edge pixel, so colour inputs work as long
    /// as their background is black.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<EdgeImage> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| HoughError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .to_luma8();
        let edges = EdgeImage::new(image);
        debug!(
            "loaded {}: {}x{} with {} edge pixels",
            path.display(),
            edges.width(),
            edges.height(),
            edges.num_edge_pixels
        );
        Ok(edges)
    }

    /// Width and height of the image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Width of the image.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the image.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns true if `(x, y)` is an edge pixel. Out of bounds coordinates
    /// are background.
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.image.get_pixel(x, y)[0] > 0
    }

    /// Iterates over the coordinates of all edge pixels in row-major order.
    pub fn foreground_points(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] > 0)
            .map(|(x, y, _)| (x, y))
    }

    /// Number of edge pixels.
    pub fn num_edge_pixels(&self) -> usize {
        self.num_edge_pixels
    }

    /// Returns true if the image has no edge pixels.
    pub fn is_empty(&self) -> bool {
        self.num_edge_pixels == 0
    }

    /// The underlying grayscale image.
    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }
}

impl From<GrayImage> for EdgeImage {
    fn from(image: GrayImage) -> Self {
        EdgeImage::new(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_pixels_are_foreground() {
        let edges = EdgeImage::new(gray_image!(
            0, 1, 0;
            0, 0, 200;
            7, 0, 0));
        assert_eq!(edges.num_edge_pixels(), 3);
        assert_eq!(
            edges.foreground_points().collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (0, 2)]
        );
        assert!(!edges.is_foreground(0, 0));
        assert!(!edges.is_foreground(5, 5));
    }

    #[test]
    fn test_empty_image() {
        let edges = EdgeImage::new(GrayImage::new(10, 4));
        assert!(edges.is_empty());
        assert_eq!(edges.dimensions(), (10, 4));
        assert_eq!(edges.foreground_points().count(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EdgeImage::load("does/not/exist.png").unwrap_err();
        assert!(matches!(err, HoughError::ImageLoad { .. }));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.png");
        let image = gray_image!(
            0, 255, 0, 0;
            0, 0, 128, 0);
        image.save(&path).unwrap();

        let edges = EdgeImage::load(&path).unwrap();
        assert_eq!(edges.dimensions(), (4, 2));
        assert_eq!(edges.foreground_points().collect::<Vec<_>>(), vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = EdgeImage::load(&path).unwrap_err();
        assert!(matches!(err, HoughError::ImageLoad { .. }));
    }
}
