use core::fmt;
use std::path::PathBuf;

/// Errors raised by the measurement pipeline.
///
/// Per-image errors (`Decode`, `InvalidChannel`, `EmptyImage`,
/// `EmptyReferenceMask`) propagate to the batch aggregator, which applies the
/// configured failure policy. `Image`, `ReportWrite`, and `Io` are always
/// fatal to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Image file unreadable, corrupt, or in an unsupported format.
    Decode(String),
    /// A channel index past the image's channel count was requested.
    InvalidChannel { requested: usize, available: u8 },
    /// A zero-area plane was passed to segmentation.
    EmptyImage,
    /// A distance field was requested for an all-background mask.
    EmptyReferenceMask,
    /// A per-image failure that aborted the batch, with the offending file.
    Image { path: PathBuf, message: String },
    /// The report destination could not be written.
    ReportWrite(String),
    /// Filesystem error outside of decoding and report writing.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "failed to decode image: {}", msg),
            Self::InvalidChannel {
                requested,
                available,
            } => write!(
                f,
                "channel {} requested but image has {} channel(s)",
                requested, available
            ),
            Self::EmptyImage => write!(f, "image plane has zero area"),
            Self::EmptyReferenceMask => {
                write!(f, "reference mask contains no foreground pixels")
            }
            Self::Image { path, message } => write!(f, "{}: {}", path.display(), message),
            Self::ReportWrite(msg) => write!(f, "failed to write report: {}", msg),
            Self::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
