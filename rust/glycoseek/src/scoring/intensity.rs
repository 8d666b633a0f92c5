use std::collections::HashSet;

use crate::matching::PeakFragmentPair;
use crate::models::PeakKey;

/// Peak keys already counted by an intensity accumulation.
pub type SeenPeaks = HashSet<PeakKey>;

/// Quartic accuracy weight, `1 - (|mass_accuracy| / error_tolerance)^4`.
///
/// Exactly zero at the tolerance and negative past it.
pub fn mass_accuracy_weight(mass_accuracy: f64, error_tolerance: f64) -> f64 {
    1.0 - (mass_accuracy.abs() / error_tolerance).powi(4)
}

/// `log10(intensity)` scaled by the accuracy weight of the match.
pub fn weighted_log_intensity(pair: &PeakFragmentPair, error_tolerance: f64) -> f64 {
    pair.peak.intensity.log10() * mass_accuracy_weight(pair.mass_accuracy(), error_tolerance)
}
