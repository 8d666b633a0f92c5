use serde::{
    Deserialize,
    Serialize,
};

use super::fragment::{
    Fragment,
    MassShift,
};
use super::ion_series::{
    FragmentationStrategy,
    IonSeries,
};
use super::signature::SignatureIon;
use crate::errors::DataProcessingError;
use crate::traits::{
    CandidateLike,
    LadderPosition,
};

/// Pre-computed ladder for one ion series.
///
/// A ladder with no `strategy` is used for every strategy that does not
/// have a dedicated ladder of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesLadder {
    pub series: IonSeries,
    #[serde(default)]
    pub strategy: Option<FragmentationStrategy>,
    pub positions: Vec<LadderPosition>,
}

/// A glycopeptide whose theoretical fragments were generated elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TheoreticalGlycopeptide {
    pub sequence: String,
    pub size: usize,
    pub glycan_size: usize,
    #[serde(default)]
    pub glycan_side_groups: usize,
    #[serde(default)]
    pub ladders: Vec<SeriesLadder>,
    #[serde(default)]
    pub stub_fragments: Vec<Fragment>,
    /// Only matched when an extended glycan search is requested.
    #[serde(default)]
    pub fucosylated_stub_fragments: Vec<Fragment>,
    #[serde(default)]
    pub oxonium_fragments: Vec<Fragment>,
    #[serde(default)]
    pub signature_ions: Vec<SignatureIon>,
    #[serde(default)]
    pub mass_shift: Option<MassShift>,
}

impl TheoreticalGlycopeptide {
    /// Checks that every fragment sits in the collection matching its kind
    /// and series.
    pub fn validate(&self) -> Result<(), DataProcessingError> {
        if self.size == 0 {
            return Err(DataProcessingError::InvalidCandidateSize {
                size: self.size,
                context: format!("candidate {}", self.sequence),
            });
        }
        for ladder in self.ladders.iter() {
            for frag in ladder.positions.iter().flatten() {
                if !frag.belongs_to(ladder.series) {
                    return Err(DataProcessingError::UnexpectedFragmentKind {
                        fragment: frag.name().to_string(),
                        expected: ladder.series.as_str(),
                        context: format!("ladder of candidate {}", self.sequence),
                    });
                }
            }
        }
        let stubs = self
            .stub_fragments
            .iter()
            .chain(self.fucosylated_stub_fragments.iter());
        for frag in stubs {
            if !frag.belongs_to(IonSeries::stub_glycopeptide) {
                return Err(DataProcessingError::UnexpectedFragmentKind {
                    fragment: frag.name().to_string(),
                    expected: IonSeries::stub_glycopeptide.as_str(),
                    context: format!("stub fragments of candidate {}", self.sequence),
                });
            }
        }
        for frag in self.oxonium_fragments.iter() {
            if !frag.belongs_to(IonSeries::oxonium_ion) {
                return Err(DataProcessingError::UnexpectedFragmentKind {
                    fragment: frag.name().to_string(),
                    expected: IonSeries::oxonium_ion.as_str(),
                    context: format!("oxonium fragments of candidate {}", self.sequence),
                });
            }
        }
        Ok(())
    }
}

impl CandidateLike for TheoreticalGlycopeptide {
    fn size(&self) -> usize {
        self.size
    }

    fn glycan_internal_size(&self) -> usize {
        self.glycan_size
    }

    fn glycan_side_group_count(&self) -> usize {
        self.glycan_side_groups
    }

    fn backbone_ladder(
        &self,
        series: IonSeries,
        strategy: FragmentationStrategy,
    ) -> Vec<LadderPosition> {
        let dedicated = self
            .ladders
            .iter()
            .find(|l| l.series == series && l.strategy == Some(strategy));
        let generic = || {
            self.ladders
                .iter()
                .find(|l| l.series == series && l.strategy.is_none())
        };
        match dedicated.or_else(generic) {
            Some(ladder) => ladder.positions.clone(),
            None => Vec::new(),
        }
    }

    fn stub_fragments(&self, extended_fucosylation: bool) -> Vec<Fragment> {
        let mut out = self.stub_fragments.clone();
        if extended_fucosylation {
            out.extend(self.fucosylated_stub_fragments.iter().cloned());
        }
        out
    }

    fn oxonium_fragments(&self) -> Vec<Fragment> {
        self.oxonium_fragments.clone()
    }

    fn signature_ions(&self) -> Vec<SignatureIon> {
        self.signature_ions.clone()
    }

    fn mass_shift(&self) -> Option<MassShift> {
        self.mass_shift.clone()
    }
}
