use crate::edge_image::EdgeImage;
use image::{GrayImage, Luma};
use proptest::{
    sample::SizeRange,
    strategy::{BoxedStrategy, Strategy},
};
use std::ops::RangeInclusive;

/// Create a strategy to generate edge images with arbitrary dimensions
/// selected within the specified ranges. Roughly one pixel in five is an
/// edge pixel.
pub(crate) fn arbitrary_edge_image(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
) -> BoxedStrategy<EdgeImage> {
    dims(width_range, height_range)
        .prop_flat_map(|(w, h)| arbitrary_edge_image_fixed(w, h))
        .boxed()
}

fn arbitrary_edge_image_fixed(width: u32, height: u32) -> BoxedStrategy<EdgeImage> {
    let size = (width * height) as usize;
    let pixels = proptest::collection::vec(proptest::bool::weighted(0.2), size);

    pixels
        .prop_map(move |v| {
            let image = GrayImage::from_fn(width, height, |x, y| {
                if v[(y * width + x) as usize] {
                    Luma([255u8])
                } else {
                    Luma([0u8])
                }
            });
            EdgeImage::new(image)
        })
        .boxed()
}

fn dims(width: impl Into<SizeRange>, height: impl Into<SizeRange>) -> BoxedStrategy<(u32, u32)> {
    let width = dim(width);
    let height = dim(height);
    width
        .prop_flat_map(move |w| height.clone().prop_map(move |h| (w, h)))
        .boxed()
}

fn dim(range: impl Into<SizeRange>) -> RangeInclusive<u32> {
    let range = range.into();
    range.start() as u32..=range.end_incl() as u32
}

#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_arbitrary_fixed_size(edges in arbitrary_edge_image(3, 7)) {
            assert_eq!(edges.dimensions(), (3, 7));
        }

        #[test]
        fn test_arbitrary_edge_image(edges in arbitrary_edge_image(1..30, 2..=50)) {
            assert!((1..30).contains(&edges.width()));
            assert!((2..=50).contains(&edges.height()));
            assert_eq!(edges.foreground_points().count(), edges.num_edge_pixels());
        }
    }
}
