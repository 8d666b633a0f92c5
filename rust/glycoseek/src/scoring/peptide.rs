use tracing::debug;

use super::coverage::CoverageVectors;
use super::intensity::weighted_log_intensity;
use crate::errors::DataProcessingError;
use crate::matching::MatchRegistry;
use crate::utils::math::finite_or_zero;

/// Backbone score: accuracy weighted log intensities of every b/c/y/z match
/// scaled by the backbone coverage.
///
/// Every matched pair counts, a peak explaining two backbone fragments
/// contributes twice. Fails only if the coverage vectors cannot be built
/// for `size`.
pub fn calculate_peptide_score(
    registry: &MatchRegistry,
    size: usize,
    error_tolerance: f64,
    coverage_weight: f64,
) -> Result<f64, DataProcessingError> {
    let intensity_term: f64 = registry
        .iter()
        .filter(|pair| pair.series().is_backbone())
        .map(|pair| weighted_log_intensity(pair, error_tolerance))
        .sum();

    let coverage = CoverageVectors::compute(registry, size)?;
    let score = intensity_term * coverage.coverage_score().powf(coverage_weight);
    if !score.is_finite() {
        debug!("Non finite peptide score ({}), clamping to 0", score);
    }
    Ok(finite_or_zero(score))
}
