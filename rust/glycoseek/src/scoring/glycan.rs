use std::collections::HashSet;
use tracing::debug;

use super::intensity::{
    weighted_log_intensity,
    SeenPeaks,
};
use crate::matching::MatchRegistry;
use crate::models::IonSeries;
use crate::traits::CandidateLike;
use crate::utils::math::{
    finite_or_zero,
    nan_keeping_max,
    nan_keeping_min,
};

/// Stub fragment names matched so far, split by whether they belong to
/// the glycan core.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StubMatchSummary {
    pub n_core_fragments: usize,
    pub core_matches: HashSet<String>,
    pub extended_matches: HashSet<String>,
}

impl StubMatchSummary {
    pub fn collect<C: CandidateLike + ?Sized>(
        registry: &MatchRegistry,
        candidate: &C,
        extended_glycan_search: bool,
    ) -> Self {
        let core_fragments: HashSet<String> = candidate
            .stub_fragments(extended_glycan_search)
            .into_iter()
            .filter(|frag| !frag.is_extended())
            .map(|frag| frag.name().to_string())
            .collect();

        let mut core_matches = HashSet::new();
        let mut extended_matches = HashSet::new();
        for pair in registry.iter() {
            if pair.series() != IonSeries::stub_glycopeptide {
                continue;
            }
            let name = pair.fragment_name();
            if core_fragments.contains(name) {
                core_matches.insert(name.to_string());
            } else {
                extended_matches.insert(name.to_string());
            }
        }

        Self {
            n_core_fragments: core_fragments.len(),
            core_matches,
            extended_matches,
        }
    }

    /// `(core_coverage, extended_coverage)`.
    ///
    /// `expected_fragments` is the number of distinguishable stubs past
    /// which the extended coverage saturates.
    pub fn coverage_terms(
        &self,
        expected_fragments: f64,
        core_weight: f64,
        coverage_weight: f64,
    ) -> (f64, f64) {
        let n_core = self.core_matches.len() as f64;
        let n_ext = self.extended_matches.len() as f64;
        let core = (n_core / self.n_core_fragments as f64).powf(core_weight);
        let extended =
            nan_keeping_min((n_core + n_ext) / expected_fragments, 1.0).powf(coverage_weight);
        (core, extended)
    }
}

/// `max(n ln(n) / k, n)`, NaN for an empty glycan.
pub fn expected_stub_fragments(glycan_size: usize, k: f64) -> f64 {
    let n = glycan_size as f64;
    nan_keeping_max(n * n.ln() / k, n)
}

/// Glycan score: accuracy weighted log intensities of the stub matches
/// times the core and extended stub coverage.
///
/// A peak counts once no matter how many stubs it explains. Keys already in
/// `seen` are skipped and every counted key is added to it.
pub fn calculate_glycan_score<C: CandidateLike + ?Sized>(
    registry: &MatchRegistry,
    candidate: &C,
    error_tolerance: f64,
    core_weight: f64,
    coverage_weight: f64,
    seen: &mut SeenPeaks,
) -> f64 {
    let summary = StubMatchSummary::collect(registry, candidate, false);

    let mut intensity_term = 0.0;
    for pair in registry.iter() {
        if pair.series() != IonSeries::stub_glycopeptide {
            continue;
        }
        if seen.insert(pair.peak.key()) {
            intensity_term += weighted_log_intensity(pair, error_tolerance);
        }
    }

    let d = expected_stub_fragments(candidate.glycan_internal_size(), 2.0);
    let (core, extended) = summary.coverage_terms(d, core_weight, coverage_weight);
    let score = intensity_term * core * extended;
    if !score.is_finite() {
        debug!(
            "Non finite glycan score ({}), clamping to 0: {:?}",
            score, summary
        );
    }
    finite_or_zero(score)
}

/// The coverage factor of the glycan score on its own.
///
/// With `fragile_fucose` off, glycans with side groups use a steeper
/// saturation (`k = 1`) since their side group losses are informative.
pub fn glycan_coverage<C: CandidateLike + ?Sized>(
    registry: &MatchRegistry,
    candidate: &C,
    core_weight: f64,
    coverage_weight: f64,
    fragile_fucose: bool,
    extended_glycan_search: bool,
) -> f64 {
    let summary = StubMatchSummary::collect(registry, candidate, extended_glycan_search);
    let k = if !fragile_fucose && candidate.glycan_side_group_count() > 0 {
        1.0
    } else {
        2.0
    };
    let d = expected_stub_fragments(candidate.glycan_internal_size(), k);
    let (core, extended) = summary.coverage_terms(d, core_weight, coverage_weight);
    finite_or_zero(core * extended)
}
