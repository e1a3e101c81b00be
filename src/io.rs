use crate::error::{BlurError, Result};
use log::{debug, info};
use ndarray::{Array3, ErrorKind, ShapeError};
use std::path::Path;

/// Channels per pixel (red, green, blue).
pub const CHANNELS: usize = 3;

/// Largest channel value representable in an 8-bit sample.
const MAX_SAMPLE: usize = 255;

/// In-memory RGB image: a dense `height x width x 3` grid of 8-bit
/// channel values, row-major with `(0, 0)` at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    data: Array3<u8>,
}

impl Pixmap {
    /// Create a zero-filled pixmap of the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BlurError::InvalidDimensions(width, height));
        }
        Ok(Self {
            data: Array3::zeros((height, width, CHANNELS)),
        })
    }

    /// Wrap an existing `(height, width, 3)` channel array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if channels != CHANNELS {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        if width == 0 || height == 0 {
            return Err(BlurError::InvalidDimensions(width, height));
        }
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Channel value at `(x, y)`; channel 0 is red, 1 green, 2 blue.
    pub fn channel(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.data[[y, x, channel]]
    }

    pub fn set_channel(&mut self, x: usize, y: usize, channel: usize, value: u8) {
        self.data[[y, x, channel]] = value;
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }
}

/// Skip ASCII whitespace and `#` comments (which run to end of line).
fn skip_spaces(bytes: &[u8], pos: &mut usize) {
    while *pos < bytes.len() {
        let byte = bytes[*pos];
        if byte == b'#' {
            while *pos < bytes.len() && bytes[*pos] != b'\n' {
                *pos += 1;
            }
        } else if byte.is_ascii_whitespace() {
            *pos += 1;
        } else {
            break;
        }
    }
}

/// Parse an unsigned decimal header field, skipping leading whitespace
/// and comments.
fn parse_header_field(bytes: &[u8], pos: &mut usize, what: &str) -> Result<usize> {
    skip_spaces(bytes, pos);

    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return Err(BlurError::MalformedHeader(format!(
            "expected {} at byte offset {}",
            what, start
        )));
    }

    let text = std::str::from_utf8(&bytes[start..*pos]).expect("digits are valid UTF-8");
    text.parse::<usize>()
        .map_err(|_| BlurError::MalformedHeader(format!("{} out of range: {}", what, text)))
}

/// Parse a binary PPM (P6) image from raw bytes.
pub fn read_pixmap(bytes: &[u8]) -> Result<Pixmap> {
    if bytes.len() < 2 {
        return Err(BlurError::MalformedHeader("input shorter than magic".into()));
    }
    let magic = &bytes[..2];
    if magic != b"P6" {
        return Err(BlurError::UnsupportedMagic(
            String::from_utf8_lossy(magic).into_owned(),
        ));
    }

    let mut pos = 2;
    let width = parse_header_field(bytes, &mut pos, "width")?;
    let height = parse_header_field(bytes, &mut pos, "height")?;
    let max_value = parse_header_field(bytes, &mut pos, "max value")?;

    if width == 0 || height == 0 {
        return Err(BlurError::InvalidDimensions(width, height));
    }
    if max_value == 0 || max_value > MAX_SAMPLE {
        return Err(BlurError::UnsupportedMaxValue(max_value));
    }

    // Exactly one whitespace byte separates the header from the samples.
    if pos >= bytes.len() || !bytes[pos].is_ascii_whitespace() {
        return Err(BlurError::MalformedHeader(
            "missing whitespace before pixel data".into(),
        ));
    }
    pos += 1;

    let expected = width * height * CHANNELS;
    let samples = &bytes[pos..];
    if samples.len() < expected {
        return Err(BlurError::TruncatedData {
            expected,
            actual: samples.len(),
        });
    }

    debug!("Parsed PPM header: {}x{}, max value {}", width, height, max_value);

    let data = Array3::from_shape_vec((height, width, CHANNELS), samples[..expected].to_vec())?;
    Pixmap::from_array(data)
}

/// Read a binary PPM image from a file.
pub fn read_pixmap_file<P: AsRef<Path>>(path: P) -> Result<Pixmap> {
    let path = path.as_ref();
    info!("Opening input image: {}", path.display());
    let bytes = std::fs::read(path)?;
    read_pixmap(&bytes)
}

/// Encode a pixmap as binary PPM (P6) bytes with max value 255.
pub fn write_pixmap(pixmap: &Pixmap) -> Vec<u8> {
    let header = format!(
        "P6\n{} {}\n{}\n",
        pixmap.width(),
        pixmap.height(),
        MAX_SAMPLE
    );

    let samples = pixmap
        .data()
        .as_slice()
        .expect("pixmap array is contiguous");

    let mut bytes = Vec::with_capacity(header.len() + samples.len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(samples);
    bytes
}

/// Write a pixmap to a file as binary PPM.
pub fn write_pixmap_file<P: AsRef<Path>>(path: P, pixmap: &Pixmap) -> Result<()> {
    let path = path.as_ref();
    info!("Writing output image: {}", path.display());
    std::fs::write(path, write_pixmap(pixmap))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ppm() -> Vec<u8> {
        // 2x2 image: red, green, blue, white
        let mut bytes = b"P6\n2 2\n255\n".to_vec();
        bytes.extend_from_slice(&[
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ]);
        bytes
    }

    #[test]
    fn test_read_simple_image() {
        let pixmap = read_pixmap(&sample_ppm()).unwrap();
        assert_eq!(pixmap.width(), 2);
        assert_eq!(pixmap.height(), 2);
        assert_eq!(pixmap.channel(0, 0, 0), 255);
        assert_eq!(pixmap.channel(1, 0, 1), 255);
        assert_eq!(pixmap.channel(0, 1, 2), 255);
        assert_eq!(pixmap.channel(1, 1, 0), 255);
    }

    #[test]
    fn test_read_header_with_comments() {
        let mut bytes = b"P6\n# made by hand\n2 # width\n2\n255\n".to_vec();
        bytes.extend_from_slice(&[0u8; 12]);
        let pixmap = read_pixmap(&bytes).unwrap();
        assert_eq!(pixmap.width(), 2);
        assert_eq!(pixmap.height(), 2);
    }

    #[test]
    fn test_round_trip() {
        let pixmap = read_pixmap(&sample_ppm()).unwrap();
        let encoded = write_pixmap(&pixmap);
        let decoded = read_pixmap(&encoded).unwrap();
        assert_eq!(pixmap, decoded);
    }

    #[test]
    fn test_reject_ascii_magic() {
        let err = read_pixmap(b"P3\n2 2\n255\n").unwrap_err();
        assert!(matches!(err, BlurError::UnsupportedMagic(_)));
    }

    #[test]
    fn test_reject_truncated_data() {
        let mut bytes = sample_ppm();
        bytes.truncate(bytes.len() - 1);
        let err = read_pixmap(&bytes).unwrap_err();
        assert!(matches!(
            err,
            BlurError::TruncatedData {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_reject_wide_samples() {
        let err = read_pixmap(b"P6\n2 2\n65535\n").unwrap_err();
        assert!(matches!(err, BlurError::UnsupportedMaxValue(65535)));
    }

    #[test]
    fn test_reject_zero_dimensions() {
        let err = read_pixmap(b"P6\n0 2\n255\n").unwrap_err();
        assert!(matches!(err, BlurError::InvalidDimensions(0, 2)));

        let err = Pixmap::new(3, 0).unwrap_err();
        assert!(matches!(err, BlurError::InvalidDimensions(3, 0)));
    }

    #[test]
    fn test_set_and_get_channel() {
        let mut pixmap = Pixmap::new(3, 2).unwrap();
        pixmap.set_channel(2, 1, 1, 200);
        assert_eq!(pixmap.channel(2, 1, 1), 200);
        assert_eq!(pixmap.channel(2, 1, 0), 0);
    }
}
