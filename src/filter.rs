use crate::chunking::RowBands;
use crate::error::{BlurError, Result};
use crate::io::{Pixmap, CHANNELS};
use log::{debug, info};
use ndarray::Array3;
use rayon::prelude::*;

/// Rows handed to one worker at a time.
const DEFAULT_BAND_ROWS: usize = 64;

/// Blur an image by averaging each pixel over a clamped square window
/// of the given radius. Produces a new image of the same dimensions.
pub fn box_blur(source: &Pixmap, radius: i64) -> Result<Pixmap> {
    box_blur_with_bands(source, radius, DEFAULT_BAND_ROWS)
}

/// Same as [`box_blur`] with an explicit row-band height for the
/// parallel partition. The result does not depend on the band height.
pub fn box_blur_with_bands(source: &Pixmap, radius: i64, band_rows: usize) -> Result<Pixmap> {
    if radius < 0 {
        return Err(BlurError::InvalidRadius(radius));
    }
    let width = source.width();
    let height = source.height();
    if width == 0 || height == 0 {
        return Err(BlurError::InvalidDimensions(width, height));
    }

    let radius = usize::try_from(radius).unwrap_or(usize::MAX);
    info!(
        "Box blurring {}x{} image with radius {}",
        width, height, radius
    );

    let bands = RowBands::new(height, band_rows)?;
    debug!("Dispatching {} row bands to the thread pool", bands.num_bands);

    // Each worker reads the shared source and produces the samples of
    // its own band; bands are reassembled in index order, so the output
    // is identical for any thread count.
    let data = source.data();
    let band_samples: Vec<Vec<u8>> = (0..bands.num_bands)
        .into_par_iter()
        .map(|band_idx| {
            let band = bands.get_band(band_idx);
            let mut samples = Vec::with_capacity(band.rows() * width * CHANNELS);
            for y in band.row_start..band.row_end {
                for x in 0..width {
                    samples.extend_from_slice(&average_window(data, x, y, radius));
                }
            }
            samples
        })
        .collect();

    let flat: Vec<u8> = band_samples.into_iter().flatten().collect();
    let blurred = Array3::from_shape_vec((height, width, CHANNELS), flat)?;
    Pixmap::from_array(blurred)
}

/// Average every channel over the square window centered at `(x, y)`,
/// clamped to the image bounds. Border windows shrink rather than wrap
/// or pad, and always hold at least the center pixel.
fn average_window(data: &Array3<u8>, x: usize, y: usize, radius: usize) -> [u8; CHANNELS] {
    let (height, width, _) = data.dim();

    let x_min = x.saturating_sub(radius);
    let x_max = x.saturating_add(radius).saturating_add(1).min(width);
    let y_min = y.saturating_sub(radius);
    let y_max = y.saturating_add(radius).saturating_add(1).min(height);

    let num_pixels = ((x_max - x_min) * (y_max - y_min)) as u64;

    let mut sums = [0u64; CHANNELS];
    for j in y_min..y_max {
        for i in x_min..x_max {
            for (channel, sum) in sums.iter_mut().enumerate() {
                *sum += u64::from(data[[j, i, channel]]);
            }
        }
    }

    // Truncating division, matching unsigned integer semantics.
    let mut pixel = [0u8; CHANNELS];
    for (value, sum) in pixel.iter_mut().zip(sums) {
        *value = (sum / num_pixels) as u8;
    }
    pixel
}
