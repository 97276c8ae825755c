use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an export run.
///
/// None of these are recovered from: the first error aborts the batch and
/// images written before it stay on disk.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Encoding or writing an image failed.
    #[error("Failed to write image {path}: {source}")]
    Image {
        /// Image being written.
        path: PathBuf,
        /// Underlying error.
        source: image::ImageError,
    },

    /// The font data could not be parsed.
    #[error("Failed to parse font data: {0}")]
    FontParse(String),

    /// A unicode range item contains more than one `-`.
    #[error("Malformed unicode range {0}")]
    MalformedRange(String),

    /// A unicode range bound is not a hex number.
    #[error("Invalid input unicode {0}")]
    InvalidCodepoint(String),

    /// A unicode range ends before it starts.
    #[error("Invalid unicode range {start:#x}-{end:#x}")]
    InvalidRange {
        /// First codepoint.
        start: u32,
        /// Last codepoint.
        end: u32,
    },

    /// The name filter is not a valid regular expression.
    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    /// A numeral-style glyph does not start with a number word.
    #[error("No digit known for numeral glyph {0}")]
    UnknownNumeral(String),

    /// The raster of a glyph contains nothing but background.
    #[error("ERROR determining bounding box for {0}")]
    EmptyGlyph(String),

    /// The manifest path has no recognized extension.
    #[error("Failed to deduce manifest format from path {0}, supported formats are: ron, json, rkyv")]
    ManifestFormat(PathBuf),

    /// Serializing the manifest failed.
    #[error("Failed to serialize manifest: {0}")]
    Serialize(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
