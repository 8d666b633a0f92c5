use tracing::debug;

use super::session::{
    MaskedPeaks,
    MatchSession,
};
use crate::traits::{
    CandidateLike,
    SpectrumLike,
};

impl MatchSession {
    /// Matches each oxonium ion to the closest peak in its window.
    ///
    /// A peak that is already masked is not reused; every matched peak is
    /// masked for the series matched afterwards.
    pub fn match_oxonium_ions<S, C>(
        &mut self,
        spectrum: &S,
        candidate: &C,
        error_tolerance: f64,
        masked: &mut MaskedPeaks,
    ) -> usize
    where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let mut nmatched = 0;
        for frag in candidate.oxonium_fragments() {
            let Some(peak) = spectrum.has_peak(frag.mass(), error_tolerance) else {
                continue;
            };
            if !masked.insert(peak.key()) {
                continue;
            }
            self.registry.add(peak, &frag);
            nmatched += 1;
        }
        debug!("Matched {} oxonium ions", nmatched);
        nmatched
    }

    /// Matches every peak in the window of each stub glycopeptide and masks
    /// all of them.
    ///
    /// When the candidate carries a non-zero mass shift each stub is also
    /// looked for with the shift applied, under its shifted name.
    pub fn match_stub_glycopeptides<S, C>(
        &mut self,
        spectrum: &S,
        candidate: &C,
        error_tolerance: f64,
        masked: &mut MaskedPeaks,
        extended_glycan_search: bool,
    ) -> usize
    where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let shift = candidate
            .mass_shift()
            .filter(|shift| shift.tandem_mass != 0.0);

        let mut nmatched = 0;
        for frag in candidate.stub_fragments(extended_glycan_search) {
            let shifted = shift.as_ref().map(|shift| frag.with_mass_shift(shift));
            for variant in std::iter::once(&frag).chain(shifted.as_ref()) {
                for peak in spectrum.all_peaks_for(variant.mass(), error_tolerance) {
                    masked.insert(peak.key());
                    if self.registry.add(peak, variant) {
                        nmatched += 1;
                    }
                }
            }
        }
        debug!("Matched {} stub glycopeptide peaks", nmatched);
        nmatched
    }
}
