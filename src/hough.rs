//! Line detection via the [Hough transform].
//!
//! [`detect_lines`] chains the three stages of the pipeline: building the
//! [`Accumulator`], [extracting peaks](crate::peaks) from it and
//! [reconstructing](crate::lines::reconstruct_line) one clipped line per peak.
//!
//! [Hough transform]: https://en.wikipedia.org/wiki/Hough_transform

use crate::accumulator::{Accumulator, BinSpec};
use crate::edge_image::EdgeImage;
use crate::error::Result;
use crate::lines::{reconstruct_line, Line, LineSegment};
use crate::peaks::{extract_peaks, Peak, PeakOptions};
use log::{debug, info};

/// Options for Hough line detection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineDetectionOptions {
    /// Width of a distance bin, in pixels.
    pub distance_step: f64,
    /// Width of an angle bin, in degrees.
    pub angle_step: f64,
    /// Fraction of the strongest vote count a dilated cell must exceed to be
    /// considered for a peak.
    pub threshold_fraction: f64,
    /// Radius of the disk used to merge each line's votes before thresholding.
    /// Radius 1 is the smallest accepted value.
    pub mask_radius: u8,
    /// Maximum number of peaks to extract. `None` for no limit.
    pub max_lines: Option<usize>,
    /// Peaks with fewer votes than this are not reported.
    pub min_votes: u32,
}

impl Default for LineDetectionOptions {
    fn default() -> Self {
        LineDetectionOptions {
            distance_step: 1.0,
            angle_step: 1.0,
            threshold_fraction: 0.45,
            mask_radius: 4,
            max_lines: None,
            min_votes: 1,
        }
    }
}

impl LineDetectionOptions {
    /// Checks every option, reporting the first one out of range.
    pub fn validate(&self) -> Result<()> {
        self.bin_spec().validate()?;
        self.peak_options().validate()
    }

    /// The accumulator bin sizes.
    pub fn bin_spec(&self) -> BinSpec {
        BinSpec {
            distance_step: self.distance_step,
            angle_step: self.angle_step,
        }
    }

    /// The peak extraction options.
    pub fn peak_options(&self) -> PeakOptions {
        PeakOptions {
            mask_radius: self.mask_radius,
            threshold_fraction: self.threshold_fraction,
            max_peaks: self.max_lines,
            min_votes: self.min_votes,
        }
    }
}

/// A peak together with the line it was reconstructed into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DetectedLine {
    /// 1-based position of this line among the lines which crossed the image.
    pub index: usize,
    /// The accumulator peak the line came from.
    pub peak: Peak,
    /// The line, clipped to the image.
    pub line: Line,
}

/// The result of [`detect_lines`].
#[derive(Clone, Debug)]
pub struct HoughLines {
    /// The vote space, before any peak suppression.
    pub accumulator: Accumulator,
    /// Detected lines, strongest first.
    pub lines: Vec<DetectedLine>,
    /// Number of peaks whose line did not cross the image.
    pub dropped: usize,
}

impl HoughLines {
    /// The clipped segment of every detected line, strongest first.
    pub fn segments(&self) -> Vec<LineSegment> {
        self.lines.iter().map(|l| l.line.segment).collect()
    }

    /// Number of detected lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no lines were found.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Detects straight lines in a binary edge image.
///
/// All options are validated before any work is done. An image without edge
/// pixels, or one whose vote space has no strong enough cluster, is not an
/// error: the result simply holds no lines.
///
/// # Examples
/// ```
/// use houghlines::edge_image::EdgeImage;
/// use houghlines::hough::{detect_lines, LineDetectionOptions};
///
/// // A vertical line at x = 12.
/// let edges = EdgeImage::from_points(30, 20, (0..20).map(|y| (12, y)));
/// let found = detect_lines(&edges, &LineDetectionOptions::default()).unwrap();
///
/// let first = &found.lines[0];
/// assert_eq!(first.index, 1);
/// assert_eq!(first.peak.votes, 20);
/// assert_eq!(first.line.polar.r, 12.0);
/// assert!((first.line.segment.start.x - 12.0).abs() < 1e-9);
/// assert!((first.line.segment.end.x - 12.0).abs() < 1e-9);
/// ```
pub fn detect_lines(edges: &EdgeImage, options: &LineDetectionOptions) -> Result<HoughLines> {
    options.validate()?;

    let accumulator = Accumulator::build(edges, options.bin_spec())?;
    let peaks = extract_peaks(&accumulator, &options.peak_options())?;
    debug!("extracted {} peaks", peaks.len());

    let (width, height) = edges.dimensions();
    let mut lines = Vec::with_capacity(peaks.len());
    for peak in &peaks {
        if let Some(line) = reconstruct_line(accumulator.to_polar(peak.bin), width, height) {
            lines.push(DetectedLine {
                index: lines.len() + 1,
                peak: *peak,
                line,
            });
        }
    }
    let dropped = peaks.len() - lines.len();

    if lines.is_empty() {
        info!("no lines found");
    } else {
        debug!("{} lines detected, {} dropped", lines.len(), dropped);
    }

    Ok(HoughLines {
        accumulator,
        lines,
        dropped,
    })
}
