//! Finding the strongest lines in a Hough accumulator.
//!
//! A single straight line does not produce one isolated maximum in the vote
//! space but a smeared "butterfly" of high counts around it. Taking the top
//! `k` cells would therefore report the same line many times. Instead the
//! accumulator is dilated and thresholded into a candidate mask, and after
//! each peak is recorded the whole connected mask region around it is
//! removed, taking its votes with it.
//!
//! The angle axis is cyclic: the line `(r, 180)` is the line `(-r, 0)`. So
//! row `num_angle_bins - 1` of the vote space continues into row 0 with the
//! distance axis mirrored, and both the dilation and the cluster removal
//! follow that seam.

use crate::accumulator::{Accumulator, DistanceAngleBin};
use crate::definitions::{HasBlack, HasWhite, Image};
use crate::error::{HoughError, Result};
use crate::fill::{flood_fill_mut, Connectivity};
use crate::morphology::{grayscale_dilate, Mask};
use image::{GrayImage, Luma};
use log::debug;

/// A local maximum of the accumulator, corresponding to a detected line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Peak {
    /// Accumulator cell of the peak.
    pub bin: DistanceAngleBin,
    /// Number of votes in that cell when it was found.
    pub votes: u32,
}

/// Options for peak extraction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeakOptions {
    /// Radius of the disk used to dilate the vote space before
    /// thresholding. Must be at least 1; radius 0 is rejected and radius 1
    /// is the smallest accepted value.
    pub mask_radius: u8,
    /// Cells whose dilated vote count is not strictly greater than this
    /// fraction of the maximum count are never reported. Must lie in `(0, 1)`.
    pub threshold_fraction: f64,
    /// Stop after this many peaks. `None` extracts every candidate cluster.
    pub max_peaks: Option<usize>,
    /// Stop once the strongest remaining candidate has fewer votes than this.
    /// Must be at least 1.
    pub min_votes: u32,
}

impl Default for PeakOptions {
    fn default() -> Self {
        PeakOptions {
            mask_radius: 4,
            threshold_fraction: 0.45,
            max_peaks: None,
            min_votes: 1,
        }
    }
}

impl PeakOptions {
    /// Checks every option against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.mask_radius == 0 {
            return Err(HoughError::invalid(
                "mask_radius",
                self.mask_radius,
                "must be at least 1",
            ));
        }
        if !(self.threshold_fraction > 0.0 && self.threshold_fraction < 1.0) {
            return Err(HoughError::invalid(
                "threshold_fraction",
                self.threshold_fraction,
                "must be strictly between 0 and 1",
            ));
        }
        if self.max_peaks == Some(0) {
            return Err(HoughError::invalid(
                "max_peaks",
                0,
                "must be at least 1 when given",
            ));
        }
        if self.min_votes == 0 {
            return Err(HoughError::invalid(
                "min_votes",
                self.min_votes,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Computes the binary mask of cells which may hold a peak.
///
/// The votes are dilated with a disk of radius `radius`, and a cell is set to
/// white if its dilated count is strictly greater than `fraction` times the
/// largest count in `accumulator`. An accumulator without votes gives an
/// all-black mask.
///
/// Near the first and last angle rows the disk reaches across the seam into
/// the mirrored rows at the other end of the angle axis.
///
/// The mask has the same dimensions as [`Accumulator::image`].
pub fn candidate_mask(accumulator: &Accumulator, radius: u8, fraction: f64) -> GrayImage {
    let votes = accumulator.image();
    let (width, height) = votes.dimensions();
    let max = accumulator.max_votes();
    if max == 0 {
        return GrayImage::new(width, height);
    }

    let threshold = fraction * max as f64;
    let dilated = dilate_across_angle_seam(votes, radius);
    GrayImage::from_fn(width, height, |x, y| {
        if dilated.get_pixel(x, y)[0] as f64 > threshold {
            Luma::white()
        } else {
            Luma::black()
        }
    })
}

/// Extracts peaks from a copy of `accumulator`, strongest first.
///
/// See [`extract_peaks_mut`] for the algorithm.
///
/// # Examples
/// ```
/// use houghlines::accumulator::{Accumulator, BinSpec};
/// use houghlines::edge_image::EdgeImage;
/// use houghlines::peaks::{extract_peaks, PeakOptions};
///
/// // A vertical line at x = 7.
/// let edges = EdgeImage::from_points(20, 20, (0..20).map(|y| (7, y)));
/// let acc = Accumulator::build(&edges, BinSpec::default()).unwrap();
///
/// let peaks = extract_peaks(&acc, &PeakOptions::default()).unwrap();
/// assert_eq!(peaks[0].votes, 20);
/// assert_eq!(acc.to_polar(peaks[0].bin).theta, 0.0);
/// assert_eq!(acc.to_polar(peaks[0].bin).r, 7.0);
/// ```
pub fn extract_peaks(accumulator: &Accumulator, options: &PeakOptions) -> Result<Vec<Peak>> {
    let mut accumulator = accumulator.clone();
    extract_peaks_mut(&mut accumulator, options)
}

/// Extracts peaks from `accumulator`, strongest first, zeroing the votes of
/// every cluster it reports.
///
/// 1. Build the [`candidate_mask`].
/// 2. Find the cell with the most votes among the cells inside the mask.
///    Ties go to the first such cell in (angle, distance) order.
/// 3. Stop if it has fewer than `min_votes` votes, or if `max_peaks` peaks
///    have already been found. Otherwise record it as a peak.
/// 4. Flood fill the 8-connected mask region containing the peak, removing
///    it from the mask and zeroing its cells in the accumulator, then
///    repeat from step 2. The region continues across the seam between the
///    last and first angle rows, so a near-vertical line seen at both ends
///    of the angle axis is reported once.
///
/// An accumulator whose mask is empty gives no peaks.
pub fn extract_peaks_mut(accumulator: &mut Accumulator, options: &PeakOptions) -> Result<Vec<Peak>> {
    options.validate()?;

    let mut mask = candidate_mask(accumulator, options.mask_radius, options.threshold_fraction);
    debug!(
        "candidate mask covers {} of {} accumulator cells",
        mask.iter().filter(|&&p| p > 0).count(),
        mask.len()
    );

    let mut peaks = Vec::new();
    while options.max_peaks.map_or(true, |max| peaks.len() < max) {
        let Some((bin, votes)) = masked_argmax(accumulator, &mask) else {
            break;
        };
        if votes < options.min_votes {
            break;
        }
        peaks.push(Peak { bin, votes });

        let cluster = remove_cluster(&mut mask, bin);
        let votes_image = accumulator.image_mut();
        for &(d, a) in &cluster {
            votes_image.put_pixel(d, a, Luma([0]));
        }
        debug!(
            "peak {} at {:?} with {} votes, suppressed {} cells",
            peaks.len(),
            bin,
            votes,
            cluster.len()
        );
    }

    Ok(peaks)
}

// Dilates `votes` with a disk, treating the angle axis as a cycle whose
// seam mirrors the distance axis. Distance bin `d` mirrors to `width - 1 - d`
// since the distance axis is centred on the offset bin.
fn dilate_across_angle_seam(votes: &Image<Luma<u32>>, radius: u8) -> Image<Luma<u32>> {
    let mask = Mask::disk(radius);
    let (width, height) = votes.dimensions();
    if height < 2 {
        return grayscale_dilate(votes, &mask);
    }

    let pad = u32::from(radius);
    let rows = i64::from(height);
    let padded = Image::<Luma<u32>>::from_fn(width, height + 2 * pad, |d, y| {
        let a = i64::from(y) - i64::from(pad);
        let turns = a.div_euclid(rows);
        let a = a.rem_euclid(rows) as u32;
        if turns % 2 == 0 {
            *votes.get_pixel(d, a)
        } else {
            *votes.get_pixel(width - 1 - d, a)
        }
    });

    let dilated = grayscale_dilate(&padded, &mask);
    Image::<Luma<u32>>::from_fn(width, height, |d, a| *dilated.get_pixel(d, a + pad))
}

// Clears the mask region containing `seed` and returns its cells. Cells on
// the first or last angle row are 8-connected to the three mirrored cells on
// the row at the other end.
fn remove_cluster(mask: &mut GrayImage, seed: DistanceAngleBin) -> Vec<(u32, u32)> {
    let (width, height) = mask.dimensions();
    let mut cluster = Vec::new();
    let mut seeds = vec![(seed.distance, seed.angle)];

    while let Some((d, a)) = seeds.pop() {
        if mask.get_pixel(d, a)[0] == 0 {
            continue;
        }
        let filled = flood_fill_mut(mask, d, a, Luma::black(), Connectivity::Eight);
        if height > 1 {
            for &(d, a) in &filled {
                let across = if a == 0 {
                    height - 1
                } else if a == height - 1 {
                    0
                } else {
                    continue;
                };
                let mirrored = width - 1 - d;
                for m in mirrored.saturating_sub(1)..=(mirrored + 1).min(width - 1) {
                    if mask.get_pixel(m, across)[0] > 0 {
                        seeds.push((m, across));
                    }
                }
            }
        }
        cluster.extend(filled);
    }

    cluster
}

// The first cell with the largest non-zero count among the cells set in `mask`.
fn masked_argmax(accumulator: &Accumulator, mask: &GrayImage) -> Option<(DistanceAngleBin, u32)> {
    let mut best: Option<(DistanceAngleBin, u32)> = None;
    for ((d, a, v), m) in accumulator.image().enumerate_pixels().zip(mask.pixels()) {
        let v = v[0];
        if m[0] > 0 && v > 0 && best.map_or(true, |(_, b)| v > b) {
            best = Some((DistanceAngleBin::new(d, a), v));
        }
    }
    best
}
