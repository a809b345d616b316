use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImagingError {
    #[error("image dimensions differ: {width_a}x{height_a} vs {width_b}x{height_b}")]
    DimensionMismatch {
        width_a: u32,
        height_a: u32,
        width_b: u32,
        height_b: u32,
    },

    #[error("image is empty (zero-sized)")]
    EmptyImage,
}
