//! Straight line detection in binary edge images using the
//! [Hough transform].
//!
//! The pipeline has three stages:
//!
//! 1. [`accumulator`] casts one vote per edge pixel per angle bin into a
//!    dense (distance, angle) vote space.
//! 2. [`peaks`] repeatedly takes the strongest cell inside a dilated and
//!    thresholded candidate mask, then removes the whole connected vote
//!    cluster around it so the same line is not found twice.
//! 3. [`lines`] turns every peak back into a line and clips it to the
//!    image rectangle.
//!
//! [`hough::detect_lines`] runs all three stages. Reading edge images and
//! rendering the result are handled by [`edge_image`] and [`drawing`], both
//! built on the [image] crate.
//!
//! [Hough transform]: https://en.wikipedia.org/wiki/Hough_transform
//! [image]: https://github.com/image-rs/image
#![deny(missing_docs)]
#![allow(
    clippy::cast_lossless,
    clippy::too_many_arguments,
    clippy::needless_range_loop,
    clippy::many_single_char_names
)]

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

#[macro_use]
mod doc_macros;
#[macro_use]
pub mod utils;

pub mod accumulator;
pub mod definitions;
pub mod drawing;
pub mod edge_image;
pub mod error;
pub mod fill;
pub mod hough;
pub mod lines;
pub mod morphology;
pub mod peaks;
pub mod point;
#[cfg(test)]
mod proptest_utils;
pub mod report;

pub use crate::error::{HoughError, Result};
