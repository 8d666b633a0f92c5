use serde::{
    Deserialize,
    Serialize,
};

use std::collections::HashSet;

use crate::errors::DataProcessingError;
use crate::traits::SpectrumLike;

/// Key used to decide if two peaks are "the same" observation when masking
/// or deduplicating, built from the bits of the neutral mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeakKey(u64);

/// A deconvoluted, centroided peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub index: u32,
    pub neutral_mass: f64,
    pub intensity: f64,
}

impl Peak {
    pub fn new(index: u32, neutral_mass: f64, intensity: f64) -> Self {
        Self {
            index,
            neutral_mass,
            intensity,
        }
    }

    pub fn key(&self) -> PeakKey {
        PeakKey(self.neutral_mass.to_bits())
    }
}

/// Observed peaks sorted by neutral mass.
///
/// Peak indices identify a peak when matches are deduplicated, so peak sets
/// read from external data must not repeat them.
///
/// Example:
/// ```
/// use glycoseek::models::PeakSet;
/// use glycoseek::traits::SpectrumLike;
///
/// let peaks = PeakSet::from_masses_and_intensities([(1000.0, 10.0), (500.0, 20.0)]);
/// let found = peaks.all_peaks_for(1000.01, 2e-5);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].index, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Peak>", into = "Vec<Peak>")]
pub struct PeakSet {
    peaks: Vec<Peak>,
}

impl PeakSet {
    pub fn new(mut peaks: Vec<Peak>) -> Self {
        peaks.sort_by(|a, b| a.neutral_mass.total_cmp(&b.neutral_mass));
        Self { peaks }
    }

    /// Same as [`PeakSet::new`] but fails if two peaks share an index.
    pub fn try_new(peaks: Vec<Peak>) -> Result<Self, DataProcessingError> {
        let mut indices = HashSet::with_capacity(peaks.len());
        for peak in peaks.iter() {
            if !indices.insert(peak.index) {
                return Err(DataProcessingError::DuplicatePeakIndex {
                    index: peak.index,
                    context: format!("peak at {}", peak.neutral_mass),
                });
            }
        }
        Ok(Self::new(peaks))
    }

    /// Builds a peak set assigning indices in input order.
    pub fn from_masses_and_intensities(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let peaks = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (mass, intensity))| Peak::new(i as u32, mass, intensity))
            .collect();
        Self::new(peaks)
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }
}

impl TryFrom<Vec<Peak>> for PeakSet {
    type Error = DataProcessingError;

    fn try_from(peaks: Vec<Peak>) -> Result<Self, Self::Error> {
        Self::try_new(peaks)
    }
}

impl From<PeakSet> for Vec<Peak> {
    fn from(peaks: PeakSet) -> Self {
        peaks.peaks
    }
}

impl SpectrumLike for PeakSet {
    fn all_peaks_for(&self, neutral_mass: f64, error_tolerance: f64) -> &[Peak] {
        // Both predicates are monotone over the sorted masses, so the bounds
        // land exactly on the closed window `|obs - ref| / ref <= tol`.
        let start = self.peaks.partition_point(|p| {
            p.neutral_mass < neutral_mass
                && (neutral_mass - p.neutral_mass) / neutral_mass > error_tolerance
        });
        let end = self.peaks.partition_point(|p| {
            p.neutral_mass <= neutral_mass
                || (p.neutral_mass - neutral_mass) / neutral_mass <= error_tolerance
        });
        if start >= end {
            return &[];
        }
        &self.peaks[start..end]
    }

    fn base_peak(&self) -> Option<&Peak> {
        self.peaks
            .iter()
            .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
    }
}
