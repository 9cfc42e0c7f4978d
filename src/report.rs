//! Human-readable summaries of detected lines.

use crate::hough::{DetectedLine, HoughLines};
use std::fmt;
use std::io;

/// Displays one detected line as a single line of text.
///
/// The fields appear in a fixed order: line index, vote count, accumulator
/// bin as `(distance, angle)`, `(slope, intercept)` and the two endpoints.
///
/// # Examples
/// ```
/// use houghlines::edge_image::EdgeImage;
/// use houghlines::hough::{detect_lines, LineDetectionOptions};
/// use houghlines::report::LineReport;
///
/// let edges = EdgeImage::from_points(10, 10, (0..10).map(|y| (4, y)));
/// let found = detect_lines(&edges, &LineDetectionOptions::default()).unwrap();
/// let text = LineReport(&found.lines[0]).to_string();
/// assert!(text.starts_with("line 1: votes=10 bin=(17, 0)"));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct LineReport<'a>(pub &'a DetectedLine);

impl fmt::Display for LineReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DetectedLine { index, peak, line } = self.0;
        let (start, end) = (line.segment.start, line.segment.end);
        write!(
            f,
            "line {}: votes={} bin=({}, {}) slope/intercept=({:.4}, {:.4}) endpoints=({:.2}, {:.2}) ({:.2}, {:.2})",
            index,
            peak.votes,
            peak.bin.distance,
            peak.bin.angle,
            line.slope,
            line.intercept,
            start.x,
            start.y,
            end.x,
            end.y
        )
    }
}

/// Writes one [`LineReport`] per detected line, or `no lines found` if
/// there are none.
pub fn write_report<W: io::Write>(lines: &HoughLines, mut out: W) -> io::Result<()> {
    if lines.is_empty() {
        return writeln!(out, "no lines found");
    }
    for line in &lines.lines {
        writeln!(out, "{}", LineReport(line))?;
    }
    Ok(())
}
