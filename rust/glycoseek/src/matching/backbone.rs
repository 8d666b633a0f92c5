use tracing::debug;

use super::session::{
    MaskedPeaks,
    MatchSession,
};
use crate::models::{
    FragmentationStrategy,
    IonSeries,
};
use crate::traits::{
    CandidateLike,
    LadderPosition,
    SpectrumLike,
};

/// Marks which ladder positions carry the glycan.
///
/// Once a glycosylated position has been passed every longer fragment from
/// the same terminus contains the glycosite as well.
pub fn glycosylation_flags(ladder: &[LadderPosition]) -> Vec<bool> {
    let mut previous = false;
    ladder
        .iter()
        .map(|position| {
            let current = previous || position.iter().any(|frag| frag.is_glycosylated());
            previous = current;
            current
        })
        .collect()
}

impl MatchSession {
    /// Matches every variant of every position of one backbone ladder.
    ///
    /// Peaks whose key is in `masked` are skipped. The number of glycosylated
    /// positions is added to the counter of the series' direction and
    /// returned.
    pub fn match_backbone_series<S, C>(
        &mut self,
        spectrum: &S,
        candidate: &C,
        series: IonSeries,
        error_tolerance: f64,
        masked: Option<&MaskedPeaks>,
        strategy: Option<FragmentationStrategy>,
    ) -> usize
    where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let strategy = strategy.unwrap_or_default();
        let ladder = candidate.backbone_ladder(series, strategy);

        let mut nmatched = 0;
        for frag in ladder.iter().flatten() {
            for peak in spectrum.all_peaks_for(frag.mass(), error_tolerance) {
                if masked.is_some_and(|m| m.contains(&peak.key())) {
                    continue;
                }
                if self.registry.add(peak, frag) {
                    nmatched += 1;
                }
            }
        }

        let nglycosylated = glycosylation_flags(&ladder)
            .into_iter()
            .filter(|&x| x)
            .count();
        self.glycosylated_ions
            .add(series.direction(), nglycosylated);

        debug!(
            "Series {} ({:?}): {} positions, {} new matches, {} glycosylated",
            series,
            strategy,
            ladder.len(),
            nmatched,
            nglycosylated
        );
        nglycosylated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Fragment,
        PeakSet,
        PeptideFragment,
        SeriesLadder,
        TheoreticalGlycopeptide,
    };

    fn frag(series: IonSeries, position: usize, mass: f64, glycosylated: bool) -> Fragment {
        PeptideFragment {
            series,
            position,
            name: format!("{}{}", series, position),
            mass,
            glycosylated,
        }
        .into()
    }

    fn ladder(series: IonSeries, glycosite: Option<usize>) -> Vec<LadderPosition> {
        (1..=5)
            .map(|i| {
                let glycosylated = glycosite == Some(i);
                vec![frag(series, i, 100.0 * i as f64, glycosylated)]
            })
            .collect()
    }

    fn candidate(series: IonSeries, glycosite: Option<usize>) -> TheoreticalGlycopeptide {
        TheoreticalGlycopeptide {
            sequence: "PEPTIDE".into(),
            size: 6,
            glycan_size: 3,
            glycan_side_groups: 0,
            ladders: vec![SeriesLadder {
                series,
                strategy: None,
                positions: ladder(series, glycosite),
            }],
            stub_fragments: vec![],
            signature_ions: vec![],
            mass_shift: None,
            fucosylated_stub_fragments: vec![],
            oxonium_fragments: vec![],
        }
    }

    #[test]
    fn test_glycosylation_propagates_forward() {
        let flags = glycosylation_flags(&ladder(IonSeries::b, Some(3)));
        assert_eq!(flags, vec![false, false, true, true, true]);

        let flags = glycosylation_flags(&ladder(IonSeries::b, None));
        assert_eq!(flags, vec![false; 5]);
        assert!(glycosylation_flags(&[]).is_empty());
    }

    #[test]
    fn test_any_variant_marks_position() {
        let mut positions = ladder(IonSeries::y, None);
        positions[1].push(frag(IonSeries::y, 2, 182.0, true));
        let flags = glycosylation_flags(&positions);
        assert_eq!(flags, vec![false, true, true, true, true]);
    }

    #[test]
    fn test_match_backbone_series() {
        let spectrum = PeakSet::from_masses_and_intensities([
            (100.001, 10.0),
            (200.0, 10.0),
            (300.5, 10.0),
            (400.0, 10.0),
        ]);
        let gp = candidate(IonSeries::b, Some(4));
        let mut session = MatchSession::new();
        let nglyco = session.match_backbone_series(&spectrum, &gp, IonSeries::b, 2e-5, None, None);

        assert_eq!(nglyco, 2);
        let names: Vec<&str> = session.registry.fragments().map(|f| f.name()).collect();
        assert_eq!(names, vec!["b1", "b2", "b4"]);
        assert_eq!(session.glycosylated_ions.n_term, 2);
        assert_eq!(session.glycosylated_ions.c_term, 0);
    }

    #[test]
    fn test_masked_peaks_are_skipped() {
        let spectrum = PeakSet::from_masses_and_intensities([(100.0, 10.0), (200.0, 10.0)]);
        let gp = candidate(IonSeries::y, None);
        let masked: MaskedPeaks = spectrum
            .iter()
            .filter(|p| p.neutral_mass == 200.0)
            .map(|p| p.key())
            .collect();

        let mut session = MatchSession::new();
        session.match_backbone_series(&spectrum, &gp, IonSeries::y, 2e-5, Some(&masked), None);
        assert_eq!(session.registry.len(), 1);
        assert_eq!(session.registry.members()[0].fragment_name(), "y1");

        // an empty mask masks nothing
        let mut session = MatchSession::new();
        session.match_backbone_series(
            &spectrum,
            &gp,
            IonSeries::y,
            2e-5,
            Some(&MaskedPeaks::new()),
            None,
        );
        assert_eq!(session.registry.len(), 2);
    }

    #[test]
    fn test_counts_accumulate_by_direction() {
        let spectrum = PeakSet::default();
        let mut session = MatchSession::new();
        session.match_backbone_series(
            &spectrum,
            &candidate(IonSeries::y, Some(2)),
            IonSeries::y,
            2e-5,
            None,
            None,
        );
        session.match_backbone_series(
            &spectrum,
            &candidate(IonSeries::z, Some(5)),
            IonSeries::z,
            2e-5,
            None,
            Some(FragmentationStrategy::Exd),
        );
        assert_eq!(session.glycosylated_ions.c_term, 5);
        assert_eq!(session.glycosylated_ions.n_term, 0);
        assert!(session.registry.is_empty());
    }
}
