use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlurError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid radius: {0} (must be non-negative)")]
    InvalidRadius(i64),

    #[error("Image has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    #[error("Malformed PPM header: {0}")]
    MalformedHeader(String),

    #[error("Unsupported PPM magic number: {0:?} (only binary P6 is supported)")]
    UnsupportedMagic(String),

    #[error("Unsupported max channel value: {0} (only 8-bit images are supported)")]
    UnsupportedMaxValue(usize),

    #[error("Truncated pixel data: expected {expected} bytes, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("Invalid band height: {0} (must be positive)")]
    InvalidBandHeight(usize),
}

pub type Result<T> = std::result::Result<T, BlurError>;
