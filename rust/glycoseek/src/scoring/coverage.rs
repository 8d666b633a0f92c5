use std::collections::HashSet;

use crate::errors::DataProcessingError;
use crate::matching::MatchRegistry;
use crate::models::{
    IonSeries,
    IonSeriesTerminality,
};

/// Per-position backbone coverage derived from a [`MatchRegistry`].
///
/// `n_term[i]` is 1.0 when an N-terminal fragment at ladder position `i`
/// was matched, `c_term[i]` the same for C-terminal fragments. Both are
/// indexed from their own terminus.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageVectors {
    pub n_term: Vec<f64>,
    pub c_term: Vec<f64>,
    pub stub_count: usize,
    pub glycosylated_n_term: usize,
    pub glycosylated_c_term: usize,
}

impl CoverageVectors {
    pub fn compute(registry: &MatchRegistry, size: usize) -> Result<Self, DataProcessingError> {
        if size == 0 {
            return Err(DataProcessingError::InvalidCandidateSize {
                size,
                context: "coverage vectors".to_string(),
            });
        }

        let mut n_term = vec![0.0; size];
        let mut c_term = vec![0.0; size];
        let mut glycosylated_n_term: HashSet<(IonSeries, usize)> = HashSet::new();
        let mut glycosylated_c_term: HashSet<(IonSeries, usize)> = HashSet::new();
        let mut stub_count = 0;

        for frag in registry.fragments() {
            let series = frag.series();
            let (coverage, glycosylated) = match series.terminality() {
                IonSeriesTerminality::NTerm => (&mut n_term, &mut glycosylated_n_term),
                IonSeriesTerminality::CTerm => (&mut c_term, &mut glycosylated_c_term),
                IonSeriesTerminality::None => {
                    if series == IonSeries::stub_glycopeptide {
                        stub_count += 1;
                    }
                    continue;
                }
            };

            let position = frag.position().ok_or_else(|| {
                DataProcessingError::UnexpectedFragmentKind {
                    fragment: frag.name().to_string(),
                    expected: "peptide",
                    context: "coverage vectors".to_string(),
                }
            })?;
            if position >= size {
                return Err(DataProcessingError::FragmentPositionOutOfRange {
                    fragment: frag.name().to_string(),
                    series,
                    position,
                    size,
                    context: "coverage vectors".to_string(),
                });
            }

            coverage[position] = 1.0;
            if frag.is_glycosylated() {
                glycosylated.insert((series, position));
            }
        }

        Ok(Self {
            n_term,
            c_term,
            stub_count,
            glycosylated_n_term: glycosylated_n_term.len(),
            glycosylated_c_term: glycosylated_c_term.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.n_term.len()
    }

    /// Fraction of cleavage sites observed from either side, reading the
    /// C-terminal vector backwards so both refer to the same site.
    pub fn coverage_score(&self) -> f64 {
        let size = self.size();
        let total: f64 = (0..size)
            .map(|i| self.n_term[i] + self.c_term[size - 1 - i])
            .sum();
        total / (2.0 * size as f64 - 1.0)
    }
}
