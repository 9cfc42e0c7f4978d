//! The Hough vote space for straight lines.
//!
//! A line is written in polar form as `x * cos(theta) + y * sin(theta) = r`,
//! where `r` is the signed distance of the line from the origin (the top-left
//! of the image) and `theta` the angle of its normal, in degrees in `[0, 180)`.
//! Every edge pixel votes once for every quantized angle, for the distance bin
//! its line at that angle falls into.

use crate::definitions::Image;
use crate::edge_image::EdgeImage;
use crate::error::{HoughError, Result};
use crate::lines::PolarLine;
use image::{GrayImage, Luma};
use log::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Largest number of cells an accumulator may hold.
pub const MAX_ACCUMULATOR_CELLS: u64 = 1 << 28;

/// Bin sizes used to quantize the (distance, angle) parameter space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BinSpec {
    /// Width of a distance bin, in pixels.
    pub distance_step: f64,
    /// Width of an angle bin, in degrees.
    ///
    /// Steps which divide 180 evenly give the most regular vote space,
    /// but this is not required.
    pub angle_step: f64,
}

impl Default for BinSpec {
    fn default() -> Self {
        BinSpec {
            distance_step: 1.0,
            angle_step: 1.0,
        }
    }
}

impl BinSpec {
    /// Checks that both steps are finite and positive, and that the angle
    /// step leaves at least one angle bin.
    pub fn validate(&self) -> Result<()> {
        if !(self.distance_step.is_finite() && self.distance_step > 0.0) {
            return Err(HoughError::invalid(
                "distance_step",
                self.distance_step,
                "must be a finite number greater than zero",
            ));
        }
        if !(self.angle_step.is_finite() && self.angle_step > 0.0) {
            return Err(HoughError::invalid(
                "angle_step",
                self.angle_step,
                "must be a finite number greater than zero",
            ));
        }
        if self.angle_step > 180.0 {
            return Err(HoughError::invalid(
                "angle_step",
                self.angle_step,
                "must not exceed 180 degrees",
            ));
        }
        Ok(())
    }

    /// Number of angle bins covering `[0, 180)` degrees.
    pub fn num_angle_bins(&self) -> u32 {
        ((180.0 / self.angle_step).round() as u32).max(1)
    }

    /// The offset added to quantized distances so that the most negative
    /// distance reachable in a `width` x `height` image maps to bin zero.
    ///
    /// Fails if `2 * offset + 1` distance bins would not fit in a `u32`.
    pub fn distance_offset(&self, width: u32, height: u32) -> Result<u32> {
        let (w, h) = (width as f64, height as f64);
        let diagonal = (w * w + h * h).sqrt();
        let offset = ((diagonal - 1.0).max(0.0) / self.distance_step).round();
        if offset >= (u32::MAX / 2) as f64 {
            return Err(HoughError::invalid(
                "distance_step",
                self.distance_step,
                "gives too many distance bins for the image",
            ));
        }
        Ok(offset as u32)
    }

    /// The `(distance, angle)` bin counts of the vote space for a
    /// `width` x `height` image.
    ///
    /// Fails if the vote space would hold more than
    /// [`MAX_ACCUMULATOR_CELLS`] cells, naming the step with more bins.
    pub fn num_bins(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let num_distance_bins = 2 * self.distance_offset(width, height)? + 1;
        let num_angle_bins = self.num_angle_bins();
        let cells = u64::from(num_distance_bins) * u64::from(num_angle_bins);
        if cells > MAX_ACCUMULATOR_CELLS {
            let err = if num_angle_bins > num_distance_bins {
                HoughError::invalid("angle_step", self.angle_step, "vote space too large")
            } else {
                HoughError::invalid("distance_step", self.distance_step, "vote space too large")
            };
            return Err(err);
        }
        Ok((num_distance_bins, num_angle_bins))
    }

    /// Quantizes a signed distance, rounding halves away from zero.
    fn quantize_distance(&self, r: f64) -> i64 {
        (r / self.distance_step).round() as i64
    }
}

/// A cell of the accumulator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistanceAngleBin {
    /// Distance bin index, including the distance offset.
    pub distance: u32,
    /// Angle bin index.
    pub angle: u32,
}

impl DistanceAngleBin {
    /// Constructs a bin from its distance and angle indices.
    pub fn new(distance: u32, angle: u32) -> DistanceAngleBin {
        DistanceAngleBin { distance, angle }
    }
}

/// Vote counts over quantized (distance, angle) pairs.
///
/// The votes are stored as an image whose x-axis is the distance bin and
/// whose y-axis is the angle bin, so each row holds all the votes cast for
/// one angle.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    votes: Image<Luma<u32>>,
    spec: BinSpec,
    offset: u32,
    image_dimensions: (u32, u32),
}

impl Accumulator {
    /// Builds the vote space of an edge image.
    ///
    /// Each edge pixel casts exactly one vote per angle bin, so the votes sum
    /// to `num_edge_pixels * num_angle_bins`. An image without edge pixels
    /// gives an accumulator of zeros.
    ///
    /// # Examples
    /// ```
    /// use houghlines::accumulator::{Accumulator, BinSpec, DistanceAngleBin};
    /// use houghlines::edge_image::EdgeImage;
    ///
    /// // A horizontal line three pixels below the origin.
    /// let edges = EdgeImage::from_points(10, 10, (0..10).map(|x| (x, 3)));
    /// let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
    ///
    /// assert_eq!(acc.total_votes(), 10 * 180);
    ///
    /// let on_line = DistanceAngleBin::new(acc.distance_offset() + 3, 90);
    /// assert_eq!(acc.votes(on_line), 10);
    /// assert_eq!(acc.max_votes(), 10);
    /// ```
    pub fn build(edges: &EdgeImage, spec: BinSpec) -> Result<Accumulator> {
        spec.validate()?;

        let (width, height) = edges.dimensions();
        let (num_distance_bins, num_angle_bins) = spec.num_bins(width, height)?;
        let offset = num_distance_bins / 2;

        let points: Vec<(f64, f64)> = edges
            .foreground_points()
            .map(|(x, y)| (x as f64, y as f64))
            .collect();

        let trig: Vec<(f64, f64)> = (0..num_angle_bins)
            .map(|a| (spec.angle_step * a as f64).to_radians().sin_cos())
            .collect();

        let mut votes = Image::<Luma<u32>>::new(num_distance_bins, num_angle_bins);
        let row_len = num_distance_bins as usize;

        let accumulate_row = |(a, row): (usize, &mut [u32])| {
            let (sin, cos) = trig[a];
            for &(x, y) in &points {
                let r = x * cos + y * sin;
                let d = spec.quantize_distance(r) + offset as i64;
                if d >= 0 && (d as usize) < row_len {
                    row[d as usize] += 1;
                }
            }
        };

        #[cfg(feature = "rayon")]
        votes
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(accumulate_row);

        #[cfg(not(feature = "rayon"))]
        votes.chunks_mut(row_len).enumerate().for_each(accumulate_row);

        debug!(
            "accumulated {} edge pixels into {}x{} (distance x angle) bins",
            points.len(),
            num_distance_bins,
            num_angle_bins
        );

        Ok(Accumulator {
            votes,
            spec,
            offset,
            image_dimensions: (width, height),
        })
    }

    /// The bin sizes this accumulator was built with.
    pub fn spec(&self) -> BinSpec {
        self.spec
    }

    /// The distance offset `ox`: distance bin `ox` holds lines through the origin.
    pub fn distance_offset(&self) -> u32 {
        self.offset
    }

    /// Number of distance bins, `2 * ox + 1`.
    pub fn num_distance_bins(&self) -> u32 {
        self.votes.width()
    }

    /// Number of angle bins.
    pub fn num_angle_bins(&self) -> u32 {
        self.votes.height()
    }

    /// `(num_distance_bins, num_angle_bins)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.votes.dimensions()
    }

    /// Dimensions of the edge image this accumulator was built from.
    pub fn image_dimensions(&self) -> (u32, u32) {
        self.image_dimensions
    }

    /// The votes as an image: x is the distance bin, y the angle bin.
    pub fn image(&self) -> &Image<Luma<u32>> {
        &self.votes
    }

    pub(crate) fn image_mut(&mut self) -> &mut Image<Luma<u32>> {
        &mut self.votes
    }

    /// Returns true if `bin` lies within the accumulator.
    pub fn contains(&self, bin: DistanceAngleBin) -> bool {
        bin.distance < self.num_distance_bins() && bin.angle < self.num_angle_bins()
    }

    /// Number of votes in a cell.
    ///
    /// # Panics
    /// If `bin` is outside the accumulator.
    pub fn votes(&self, bin: DistanceAngleBin) -> u32 {
        self.votes.get_pixel(bin.distance, bin.angle)[0]
    }

    /// Sum of all cells.
    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|&v| v as u64).sum()
    }

    /// The largest vote count, or zero for an empty vote space.
    pub fn max_votes(&self) -> u32 {
        self.votes.iter().copied().max().unwrap_or(0)
    }

    /// The first cell in (angle, distance) order holding the largest
    /// vote count, or `None` if every cell is zero.
    pub fn argmax(&self) -> Option<(DistanceAngleBin, u32)> {
        let mut best: Option<(DistanceAngleBin, u32)> = None;
        for (d, a, p) in self.votes.enumerate_pixels() {
            let v = p[0];
            if v > 0 && best.map_or(true, |(_, b)| v > b) {
                best = Some((DistanceAngleBin::new(d, a), v));
            }
        }
        best
    }

    /// The line at the centre of a bin.
    pub fn to_polar(&self, bin: DistanceAngleBin) -> PolarLine {
        PolarLine {
            r: self.spec.distance_step * (bin.distance as f64 - self.offset as f64),
            theta: self.spec.angle_step * bin.angle as f64,
        }
    }

    /// The bin containing a line, or `None` if the line is too far from the
    /// origin to be represented in this accumulator.
    ///
    /// The line's angle is first normalized into `[0, 180)` degrees, negating
    /// its distance when the angle is shifted by an odd multiple of 180.
    pub fn from_polar(&self, line: PolarLine) -> Option<DistanceAngleBin> {
        let mut line = line.normalized();
        let mut a = (line.theta / self.spec.angle_step).round() as u32;
        if a >= self.num_angle_bins() {
            // theta rounds up to 180 degrees, which is the same direction as 0.
            a = 0;
            line.r = -line.r;
        }
        let d = self.spec.quantize_distance(line.r) + self.offset as i64;
        if d < 0 || d >= self.num_distance_bins() as i64 {
            return None;
        }
        Some(DistanceAngleBin::new(d as u32, a))
    }

    /// Returns the votes scaled so that the largest count maps to 255.
    ///
    /// Useful for inspecting the vote space; an all-zero accumulator gives
    /// a black image.
    pub fn to_gray_image(&self) -> GrayImage {
        let max = self.max_votes();
        let (width, height) = self.votes.dimensions();
        GrayImage::from_fn(width, height, |x, y| {
            if max == 0 {
                return Luma([0u8]);
            }
            let v = self.votes.get_pixel(x, y)[0] as f64;
            Luma([(v * 255.0 / max as f64).round() as u8])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_dimensions() {
        let edges = EdgeImage::new(GrayImage::new(30, 40));
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        // diagonal = 50, so ox = 49
        assert_eq!(acc.distance_offset(), 49);
        assert_eq!(acc.num_distance_bins(), 99);
        assert_eq!(acc.num_angle_bins(), 180);
        assert_eq!(acc.dimensions(), (99, 180));
        assert_eq!(acc.image_dimensions(), (30, 40));

        let coarse = BinSpec {
            distance_step: 2.0,
            angle_step: 4.0,
        };
        let acc = Accumulator::build(&edges, coarse).unwrap();
        assert_eq!(acc.distance_offset(), 25);
        assert_eq!(acc.num_distance_bins(), 51);
        assert_eq!(acc.num_angle_bins(), 45);
    }

    #[test]
    fn test_tiny_steps_are_rejected() {
        let edges = EdgeImage::from_points(10, 10, [(1, 1)]);
        let tiny_distance = BinSpec {
            distance_step: 1e-9,
            angle_step: 1.0,
        };
        match Accumulator::build(&edges, tiny_distance) {
            Err(HoughError::InvalidParameter { name, .. }) => assert_eq!(name, "distance_step"),
            other => panic!("expected InvalidParameter, got {:?}", other.map(|a| a.dimensions())),
        }

        // Fits in a u32 but the vote space is far too big.
        let fine_distance = BinSpec {
            distance_step: 1e-5,
            angle_step: 1.0,
        };
        assert!(fine_distance.distance_offset(10, 10).is_ok());
        assert!(Accumulator::build(&edges, fine_distance).is_err());

        let tiny_angle = BinSpec {
            distance_step: 1.0,
            angle_step: 1e-7,
        };
        match Accumulator::build(&edges, tiny_angle) {
            Err(HoughError::InvalidParameter { name, .. }) => assert_eq!(name, "angle_step"),
            other => panic!("expected InvalidParameter, got {:?}", other.map(|a| a.dimensions())),
        }
    }

    #[test]
    fn test_large_image_fits() {
        let spec = BinSpec::default();
        let (d, a) = spec.num_bins(1000, 1000).unwrap();
        assert_eq!((d, a), (2827, 180));
        assert!(u64::from(d) * u64::from(a) <= MAX_ACCUMULATOR_CELLS);
    }

    #[test]
    fn test_angle_step_not_dividing_180() {
        let spec = BinSpec {
            distance_step: 1.0,
            angle_step: 7.0,
        };
        // 180 / 7 = 25.7
        assert_eq!(spec.num_angle_bins(), 26);
    }

    #[test]
    fn test_empty_image_gives_zero_votes() {
        let edges = EdgeImage::new(GrayImage::new(17, 9));
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        assert_eq!(acc.total_votes(), 0);
        assert_eq!(acc.max_votes(), 0);
        assert_eq!(acc.argmax(), None);
        assert!(acc.to_gray_image().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_zero_sized_image() {
        let edges = EdgeImage::new(GrayImage::new(0, 0));
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        assert_eq!(acc.num_distance_bins(), 1);
        assert_eq!(acc.total_votes(), 0);
    }

    #[test]
    fn test_invalid_steps_rejected() {
        let edges = EdgeImage::new(GrayImage::new(5, 5));
        for (distance_step, angle_step) in [
            (0.0, 1.0),
            (-1.0, 1.0),
            (f64::NAN, 1.0),
            (1.0, 0.0),
            (1.0, -3.0),
            (1.0, f64::INFINITY),
            (1.0, 200.0),
        ] {
            let spec = BinSpec {
                distance_step,
                angle_step,
            };
            let err = Accumulator::build(&edges, spec).unwrap_err();
            assert!(matches!(err, HoughError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_single_pixel_votes() {
        // A single pixel at (3, 4) votes for r = 3 cos(theta) + 4 sin(theta).
        let edges = EdgeImage::from_points(10, 10, [(3, 4)]);
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        let ox = acc.distance_offset();
        assert_eq!(acc.total_votes(), 180);
        assert_eq!(acc.votes(DistanceAngleBin::new(ox + 3, 0)), 1);
        assert_eq!(acc.votes(DistanceAngleBin::new(ox + 4, 90)), 1);
        // r = -3 at theta = 180 is outside [0, 180); at theta = 135, r = 0.707
        assert_eq!(acc.votes(DistanceAngleBin::new(ox + 1, 135)), 1);
        for a in 0..180 {
            let row_votes: u32 = (0..acc.num_distance_bins())
                .map(|d| acc.votes(DistanceAngleBin::new(d, a)))
                .sum();
            assert_eq!(row_votes, 1);
        }
    }

    #[test]
    fn test_distances_round_half_away_from_zero() {
        let spec = BinSpec::default();
        assert_eq!(spec.quantize_distance(2.5), 3);
        assert_eq!(spec.quantize_distance(-2.5), -3);
        assert_eq!(spec.quantize_distance(-2.49), -2);
        let half = BinSpec {
            distance_step: 0.5,
            angle_step: 1.0,
        };
        assert_eq!(half.quantize_distance(-1.25), -3);
        assert_eq!(half.quantize_distance(1.25), 3);
    }

    #[test]
    fn test_negative_distances_use_bins_below_offset() {
        // For theta in (90, 180) the pixel (6, 0) has r = 6 cos(theta) < 0.
        let edges = EdgeImage::from_points(8, 8, [(6, 0)]);
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        let ox = acc.distance_offset();
        // r = 6 cos(150) = -5.196
        assert_eq!(acc.votes(DistanceAngleBin::new(ox - 5, 150)), 1);
        // r = 6 cos(175) = -5.977
        assert_eq!(acc.votes(DistanceAngleBin::new(ox - 6, 175)), 1);
    }

    #[test]
    fn test_vertical_line_peak() {
        let edges = EdgeImage::from_points(20, 20, (0..20).map(|y| (7, y)));
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        let (bin, votes) = acc.argmax().unwrap();
        assert_eq!(votes, 20);
        assert_eq!(bin, DistanceAngleBin::new(acc.distance_offset() + 7, 0));
        assert_eq!(acc.to_polar(bin), PolarLine { r: 7.0, theta: 0.0 });
    }

    #[test]
    fn test_polar_round_trip() {
        let edges = EdgeImage::new(GrayImage::new(25, 12));
        let spec = BinSpec {
            distance_step: 0.75,
            angle_step: 2.5,
        };
        let acc = Accumulator::build(&edges, spec).unwrap();
        for a in 0..acc.num_angle_bins() {
            for d in 0..acc.num_distance_bins() {
                let bin = DistanceAngleBin::new(d, a);
                assert_eq!(acc.from_polar(acc.to_polar(bin)), Some(bin));
            }
        }
    }

    #[test]
    fn test_from_polar_normalizes_angle() {
        let edges = EdgeImage::new(GrayImage::new(10, 10));
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        let ox = acc.distance_offset();
        // (r, 270) is the same line as (-r, 90)
        assert_eq!(
            acc.from_polar(PolarLine { r: 4.0, theta: 270.0 }),
            Some(DistanceAngleBin::new(ox - 4, 90))
        );
        // 179.8 degrees rounds to bin 180, which wraps to 0 with r negated
        assert_eq!(
            acc.from_polar(PolarLine { r: 2.0, theta: 179.8 }),
            Some(DistanceAngleBin::new(ox - 2, 0))
        );
        assert_eq!(acc.from_polar(PolarLine { r: 1000.0, theta: 10.0 }), None);
    }

    #[test]
    fn test_to_gray_image_scales_to_max() {
        let edges = EdgeImage::from_points(10, 10, (0..10).map(|x| (x, 5)));
        let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
        let gray = acc.to_gray_image();
        assert_eq!(gray.dimensions(), acc.image().dimensions());
        assert_eq!(gray.iter().copied().max(), Some(255));
        let (bin, _) = acc.argmax().unwrap();
        assert_eq!(gray.get_pixel(bin.distance, bin.angle)[0], 255);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use crate::proptest_utils::arbitrary_edge_image;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn proptest_every_pixel_votes_once_per_angle(
                edges in arbitrary_edge_image(1..40, 1..40),
                angle_step in prop::sample::select(vec![0.5, 1.0, 3.0, 7.0, 45.0]),
                distance_step in prop::sample::select(vec![0.5, 1.0, 2.5]),
            ) {
                let spec = BinSpec { distance_step, angle_step };
                let acc = Accumulator::build(&edges, spec).unwrap();
                prop_assert_eq!(
                    acc.total_votes(),
                    edges.num_edge_pixels() as u64 * acc.num_angle_bins() as u64
                );
            }

            #[test]
            fn proptest_bin_round_trip(
                width in 1u32..60,
                height in 1u32..60,
                distance_step in 0.3f64..4.0,
                angle_step in 0.5f64..20.0,
                d_frac in 0.0f64..1.0,
                a_frac in 0.0f64..1.0,
            ) {
                let edges = EdgeImage::new(GrayImage::new(width, height));
                let acc = Accumulator::build(&edges, BinSpec { distance_step, angle_step }).unwrap();
                let d = ((acc.num_distance_bins() - 1) as f64 * d_frac) as u32;
                let a = ((acc.num_angle_bins() - 1) as f64 * a_frac) as u32;
                let bin = DistanceAngleBin::new(d, a);
                prop_assert_eq!(acc.from_polar(acc.to_polar(bin)), Some(bin));
            }
        }
    }
}
