//! Errors raised by the line detection pipeline.

use std::path::PathBuf;

/// An error from loading an edge image, validating detection parameters
/// or writing the rendered lines.
///
/// Per-line geometric problems (a peak whose line misses the image, or
/// a line passing exactly through a corner) are not errors: they are
/// logged and handled where they occur.
#[derive(thiserror::Error, Debug)]
pub enum HoughError {
    /// A detection parameter is outside its valid range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value, formatted for display.
        value: String,
        /// Which constraint the value violates.
        reason: &'static str,
    },

    /// The input image could not be read or decoded.
    #[error("failed to load image {}", path.display())]
    ImageLoad {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The output image could not be encoded or written.
    #[error("failed to save image {}", path.display())]
    ImageSave {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },
}

impl HoughError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> HoughError {
        HoughError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// A specialized `Result` type for line detection.
pub type Result<T> = std::result::Result<T, HoughError>;
