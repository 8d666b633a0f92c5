//! Trait definitions for the collaborators the scoring engine talks to.
//!
//! The engine never builds spectra or fragment ladders itself. It only
//! needs the two capabilities below, so anything that can answer a mass
//! range query and emit theoretical fragments can be scored.

use crate::models::{
    Fragment,
    FragmentationStrategy,
    IonSeries,
    MassShift,
    Peak,
    SignatureIon,
};

/// One position of a theoretical ladder; every entry is a variant of the
/// same cleavage (eg. with and without a neutral loss).
pub type LadderPosition = Vec<Fragment>;

/// An observed spectrum that can be queried by neutral mass.
pub trait SpectrumLike {
    /// All peaks with `|peak.neutral_mass - neutral_mass| / neutral_mass <= error_tolerance`,
    /// sorted by neutral mass.
    fn all_peaks_for(&self, neutral_mass: f64, error_tolerance: f64) -> &[Peak];

    /// The most intense peak, `None` for an empty spectrum.
    fn base_peak(&self) -> Option<&Peak>;

    /// The single peak closest to `neutral_mass` inside the tolerance window.
    fn has_peak(&self, neutral_mass: f64, error_tolerance: f64) -> Option<&Peak> {
        self.all_peaks_for(neutral_mass, error_tolerance)
            .iter()
            .min_by(|a, b| {
                let da = (a.neutral_mass - neutral_mass).abs();
                let db = (b.neutral_mass - neutral_mass).abs();
                da.total_cmp(&db)
            })
    }
}

/// A theoretical glycopeptide that can be scored against a spectrum.
pub trait CandidateLike {
    /// Number of residues in the peptide backbone.
    fn size(&self) -> usize;

    /// Number of monosaccharides in the glycan composition.
    fn glycan_internal_size(&self) -> usize;

    /// Number of monosaccharides that hang off the glycan core as side
    /// groups (fucose and friends).
    fn glycan_side_group_count(&self) -> usize {
        0
    }

    /// Ordered ladder for a backbone series, starting at the series' own
    /// terminus.
    fn backbone_ladder(
        &self,
        series: IonSeries,
        strategy: FragmentationStrategy,
    ) -> Vec<LadderPosition>;

    /// Stub glycopeptide fragments including the extended ones.
    ///
    /// `extended_fucosylation` additionally asks for fucosylated variants
    /// of the stubs.
    fn stub_fragments(&self, extended_fucosylation: bool) -> Vec<Fragment>;

    /// Glycan oxonium ions worth looking for.
    fn oxonium_fragments(&self) -> Vec<Fragment> {
        Vec::new()
    }

    /// Diagnostic glycan ions, expected or not for this composition.
    fn signature_ions(&self) -> Vec<SignatureIon> {
        Vec::new()
    }

    /// Shift carried by the precursor, stub fragments are also looked for
    /// with it applied.
    fn mass_shift(&self) -> Option<MassShift> {
        None
    }
}
