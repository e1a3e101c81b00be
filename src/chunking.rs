use crate::error::{BlurError, Result};
use log::debug;

/// A contiguous run of image rows processed by a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub row_start: usize,
    /// Exclusive.
    pub row_end: usize,
}

impl Band {
    pub fn rows(&self) -> usize {
        self.row_end - self.row_start
    }
}

/// Splits the row range of an image into fixed-height bands so that
/// workers can produce disjoint slices of the output independently.
#[derive(Debug)]
pub struct RowBands {
    height: usize,
    band_rows: usize,
    pub num_bands: usize,
}

impl RowBands {
    pub fn new(height: usize, band_rows: usize) -> Result<Self> {
        if band_rows == 0 {
            return Err(BlurError::InvalidBandHeight(band_rows));
        }

        // Ceiling division; the last band may be short.
        let num_bands = (height + band_rows - 1) / band_rows;

        debug!(
            "RowBands: {} rows, band_rows={} → {} bands",
            height, band_rows, num_bands
        );

        Ok(Self {
            height,
            band_rows,
            num_bands,
        })
    }

    pub fn get_band(&self, band_idx: usize) -> Band {
        let row_start = band_idx * self.band_rows;
        let row_end = ((band_idx + 1) * self.band_rows).min(self.height);
        Band { row_start, row_end }
    }

    pub fn iter(&self) -> BandIterator<'_> {
        BandIterator::new(self)
    }
}

pub struct BandIterator<'a> {
    bands: &'a RowBands,
    current_idx: usize,
}

impl<'a> BandIterator<'a> {
    fn new(bands: &'a RowBands) -> Self {
        Self {
            bands,
            current_idx: 0,
        }
    }
}

impl<'a> Iterator for BandIterator<'a> {
    type Item = (usize, Band);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_idx < self.bands.num_bands {
            let band = self.bands.get_band(self.current_idx);
            let idx = self.current_idx;
            self.current_idx += 1;
            Some((idx, band))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let bands = RowBands::new(128, 64).unwrap();
        assert_eq!(bands.num_bands, 2);
        assert_eq!(bands.get_band(0), Band { row_start: 0, row_end: 64 });
        assert_eq!(bands.get_band(1), Band { row_start: 64, row_end: 128 });
    }

    #[test]
    fn test_short_last_band() {
        let bands = RowBands::new(100, 64).unwrap();
        assert_eq!(bands.num_bands, 2);

        let last = bands.get_band(1);
        assert_eq!(last.row_start, 64);
        assert_eq!(last.row_end, 100);
        assert_eq!(last.rows(), 36);
    }

    #[test]
    fn test_band_smaller_than_image() {
        // More bands than rows is impossible: one row per band at most
        let bands = RowBands::new(3, 1).unwrap();
        assert_eq!(bands.num_bands, 3);
        assert_eq!(bands.get_band(2), Band { row_start: 2, row_end: 3 });
    }

    #[test]
    fn test_iterator_covers_all_rows() {
        let bands = RowBands::new(100, 33).unwrap();
        let collected: Vec<_> = bands.iter().collect();

        assert_eq!(collected.len(), bands.num_bands);
        assert_eq!(collected[0].0, 0);
        assert_eq!(collected.first().unwrap().1.row_start, 0);
        assert_eq!(collected.last().unwrap().1.row_end, 100);

        let total: usize = collected.iter().map(|(_, band)| band.rows()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_zero_band_height_rejected() {
        let err = RowBands::new(100, 0).unwrap_err();
        assert!(matches!(err, BlurError::InvalidBandHeight(0)));
    }
}
