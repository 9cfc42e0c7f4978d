//! Reconstruction of line segments from polar line parameters.

use crate::point::{distance, Point};
use log::warn;
use std::fmt;

/// Added to the denominators of `tan` and `cot` so that exactly horizontal
/// and vertical lines do not divide by zero.
const EPSILON: f64 = 1e-15;

/// Candidates further than this outside the image are rejected.
const BOUNDS_TOLERANCE: f64 = 1e-9;

/// Border crossings closer than this are the same point.
const COINCIDENT: f64 = 1e-6;

/// A line in polar form: the set of points `(x, y)` with
/// `x * cos(theta) + y * sin(theta) = r`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolarLine {
    /// Signed distance of the line from the origin (top-left of the image), in pixels.
    pub r: f64,
    /// Angle in degrees between the x-axis and the normal of the line,
    /// measured towards the positive y-axis.
    pub theta: f64,
}

impl PolarLine {
    /// Returns the same line with `theta` moved into `[0, 180)`.
    ///
    /// A line's orientation is only defined modulo 180 degrees: shifting
    /// `theta` by 180 flips the sign of `r`.
    ///
    /// # Examples
    /// ```
    /// use houghlines::lines::PolarLine;
    ///
    /// let line = PolarLine { r: 5.0, theta: 200.0 };
    /// assert_eq!(line.normalized(), PolarLine { r: -5.0, theta: 20.0 });
    /// ```
    pub fn normalized(&self) -> PolarLine {
        let theta = self.theta.rem_euclid(180.0);
        let half_turns = ((self.theta - theta) / 180.0).round() as i64;
        let r = if half_turns % 2 == 0 { self.r } else { -self.r };
        // rem_euclid can round up to exactly 180 for tiny negative inputs
        if theta >= 180.0 {
            PolarLine { r: -r, theta: 0.0 }
        } else {
            PolarLine { r, theta }
        }
    }

    /// The point of the line nearest the origin.
    pub fn foot(&self) -> Point<f64> {
        let (sin, cos) = self.theta.to_radians().sin_cos();
        Point::new(self.r * cos, self.r * sin)
    }

    /// Slope of the line when written as `y = slope * x + intercept`.
    ///
    /// Vertical lines have a very large slope rather than an infinite one.
    pub fn slope(&self) -> f64 {
        let (sin, cos) = self.normalized().theta.to_radians().sin_cos();
        -cos / (sin + EPSILON)
    }

    /// Intercept of the line with the y-axis, when written as
    /// `y = slope * x + intercept`.
    pub fn intercept(&self) -> f64 {
        let line = self.normalized();
        let sin = line.theta.to_radians().sin();
        line.r / (sin + EPSILON)
    }
}

/// A line segment between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment {
    /// First endpoint.
    pub start: Point<f64>,
    /// Second endpoint.
    pub end: Point<f64>,
}

impl LineSegment {
    /// Length of the segment.
    pub fn length(&self) -> f64 {
        distance(self.start, self.end)
    }
}

/// A detected line clipped to the image rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    /// Polar form of the line, with `theta` in `[0, 180)`.
    pub polar: PolarLine,
    /// `y = slope * x + intercept` form of the line, for reporting.
    pub slope: f64,
    /// See `slope`.
    pub intercept: f64,
    /// Part of the line inside `[0, width - 1] x [0, height - 1]`.
    pub segment: LineSegment,
}

/// An image border a line can cross.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Border {
    /// `x = 0`
    Left,
    /// `y = 0`
    Top,
    /// `x = width - 1`
    Right,
    /// `y = height - 1`
    Bottom,
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Border::Left => "left",
            Border::Top => "top",
            Border::Right => "right",
            Border::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Intersects a line with the borders of a `width` x `height` image.
///
/// Returns every crossing point whose other coordinate lies within the image,
/// scanning the borders in the order left, top, right, bottom. A line that
/// crosses the rectangle normally yields two points; a line through a corner
/// yields the corner once for each border meeting there.
pub fn intersect_bounds(line: PolarLine, width: u32, height: u32) -> Vec<(Border, Point<f64>)> {
    if width == 0 || height == 0 {
        return vec![];
    }
    let line = line.normalized();
    let x_max = (width - 1) as f64;
    let y_max = (height - 1) as f64;

    let foot = line.foot();
    let (sin, cos) = line.theta.to_radians().sin_cos();
    let tan = sin / (cos + EPSILON);
    let cot = cos / (sin + EPSILON);

    // Moving along the line from its foot, each unit change in x changes y by
    // -cot(theta), and each unit change in y changes x by -tan(theta).
    let y_at = |x: f64| foot.y + (foot.x - x) * cot;
    let x_at = |y: f64| foot.x + (foot.y - y) * tan;

    let candidates = [
        (Border::Left, Point::new(0.0, y_at(0.0))),
        (Border::Top, Point::new(x_at(0.0), 0.0)),
        (Border::Right, Point::new(x_max, y_at(x_max))),
        (Border::Bottom, Point::new(x_at(y_max), y_max)),
    ];

    let within = |v: f64, max: f64| v >= -BOUNDS_TOLERANCE && v <= max + BOUNDS_TOLERANCE;

    candidates
        .iter()
        .filter(|(border, p)| match border {
            Border::Left | Border::Right => within(p.y, y_max),
            Border::Top | Border::Bottom => within(p.x, x_max),
        })
        .map(|&(border, p)| {
            (
                border,
                Point::new(p.x.clamp(0.0, x_max), p.y.clamp(0.0, y_max)),
            )
        })
        .collect()
}

/// Clips a line to a `width` x `height` image.
///
/// Returns `None`, logging a warning, if the line does not cross the image.
/// If the line passes through a corner more than two border crossings are
/// found: a warning is logged and the first two distinct crossings in the
/// order left, top, right, bottom become the endpoints.
///
/// # Examples
/// ```
/// use houghlines::lines::{reconstruct_line, PolarLine};
/// use houghlines::point::Point;
///
/// // The horizontal line y = 4 in a 10 x 8 image.
/// let line = reconstruct_line(PolarLine { r: 4.0, theta: 90.0 }, 10, 8).unwrap();
/// let near = |p: Point<f64>, x: f64, y: f64| (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9;
/// assert!(near(line.segment.start, 0.0, 4.0));
/// assert!(near(line.segment.end, 9.0, 4.0));
///
/// // A line far outside the image is dropped.
/// assert!(reconstruct_line(PolarLine { r: 50.0, theta: 90.0 }, 10, 8).is_none());
/// ```
pub fn reconstruct_line(line: PolarLine, width: u32, height: u32) -> Option<Line> {
    let polar = line.normalized();
    let crossings = intersect_bounds(polar, width, height);

    if crossings.len() > 2 {
        warn!(
            "line (r = {:.3}, theta = {:.3}) meets {} borders ({}); keeping the first two",
            polar.r,
            polar.theta,
            crossings.len(),
            crossings
                .iter()
                .map(|(b, _)| b.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let start = crossings.first().map(|&(_, p)| p);
    let end = crossings
        .iter()
        .skip(1)
        .map(|&(_, p)| p)
        .find(|&p| start.map_or(true, |s| distance(s, p) > COINCIDENT))
        .or_else(|| crossings.get(1).map(|&(_, p)| p));

    match (start, end) {
        (Some(start), Some(end)) => Some(Line {
            polar,
            slope: polar.slope(),
            intercept: polar.intercept(),
            segment: LineSegment { start, end },
        }),
        _ => {
            warn!(
                "line (r = {:.3}, theta = {:.3}) does not cross the {}x{} image; dropping it",
                polar.r, polar.theta, width, height
            );
            None
        }
    }
}
