//! Bitmap preparation and structural comparison.
//!
//! Two concerns live here:
//!
//! - [`clean_for_handwriting`] - the denoise/binarize transform applied to
//!   candidate pages before vision OCR.
//! - [`canonicalize`] + [`structural_similarity`] - the fixed-resolution
//!   grayscale comparison between a reference page and a candidate page.
//!
//! Every image entering [`structural_similarity`] must have passed through
//! [`canonicalize`] first; the canonical resize is what absorbs differing
//! source page dimensions so comparison can never fail on size.

pub mod error;
mod preprocess;
mod ssim;


pub use error::ImagingError;
pub use preprocess::clean_for_handwriting;
pub use ssim::structural_similarity;

use image::{DynamicImage, GrayImage, imageops};

use crate::constants::CANONICAL_EDGE;

/// Converts `image` to grayscale and resizes it to the canonical square.
pub fn canonicalize(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    imageops::resize(
        &gray,
        CANONICAL_EDGE,
        CANONICAL_EDGE,
        imageops::FilterType::Triangle,
    )
}
