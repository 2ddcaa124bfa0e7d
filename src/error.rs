use thiserror::Error;
use crate::color::Color;
use crate::patch::Padding;

/// Errors raised while choosing colors, placing patches or
/// compositing a sample.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid font “{0}”: expected serif, sans-serif, monospace \
             or the path of a font file")]
    InvalidFontSpec(String),

    #[error("a {}×{} background cannot host a {}×{} patch with \
             padding {padding:?}",
            .background.0, .background.1, .patch.0, .patch.1)]
    NoUsableRegion {
        background: (u32, u32),
        patch: (u32, u32),
        padding: Padding,
    },

    /// Only the bounded sampler reports this: the unbounded one keeps
    /// drawing.
    #[error("no color reached contrast {min_contrast} against {fixed:?} \
             in {attempts} draws (best: {best:?} at {best_ratio:.2})")]
    ContrastUnattainable {
        fixed: Color,
        min_contrast: f64,
        attempts: u32,
        best: Color,
        best_ratio: f64,
    },

    #[error("a color has 3 or 4 channels, got {0}")]
    InvalidColor(usize),

    #[error("typesetting failed: {0}")]
    Typeset(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
