use rayon::prelude::*;
use serde::Serialize;
use std::time::{
    Duration,
    Instant,
};
use tracing::{
    debug,
    warn,
};

use super::glycan::{
    calculate_glycan_score,
    glycan_coverage,
};
use super::hyperscore::hyperscore;
use super::intensity::SeenPeaks;
use super::parameters::ScoringParameters;
use super::peptide::calculate_peptide_score;
use super::signature::signature_ion_score;
use crate::errors::Result;
use crate::matching::MatchSession;
use crate::traits::{
    CandidateLike,
    SpectrumLike,
};

/// `peptide * peptide_weight + glycan * (1 - peptide_weight)`
pub fn combined_score(peptide_score: f64, glycan_score: f64, peptide_weight: f64) -> f64 {
    peptide_score * peptide_weight + glycan_score * (1.0 - peptide_weight)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlycopeptideScores {
    /// Combined peptide and glycan score plus the signature ion penalty.
    pub score: f64,
    pub peptide_score: f64,
    pub glycan_score: f64,
    pub signature_score: f64,
    pub glycan_coverage: f64,
    pub hyperscore: f64,
    pub n_fragment_matches: usize,
    pub n_term_glycosylated: usize,
    pub c_term_glycosylated: usize,
}

impl GlycopeptideScores {
    /// Reads a fully matched session, the registry is not modified.
    pub fn from_session<C: CandidateLike + ?Sized>(
        session: &MatchSession,
        candidate: &C,
        params: &ScoringParameters,
    ) -> Result<Self> {
        let registry = &session.registry;
        let peptide_score = calculate_peptide_score(
            registry,
            candidate.size(),
            params.error_tolerance,
            params.peptide_coverage_weight,
        )
        .map_err(|e| e.append_to_context(" while computing the peptide score"))?;
        let glycan_score = calculate_glycan_score(
            registry,
            candidate,
            params.error_tolerance,
            params.glycan_core_weight,
            params.glycan_coverage_weight,
            &mut SeenPeaks::new(),
        );
        let glycan_coverage = glycan_coverage(
            registry,
            candidate,
            params.glycan_core_weight,
            params.glycan_coverage_weight,
            params.fragile_fucose,
            params.extended_glycan_search,
        );

        let signature_score =
            signature_ion_score(&session.signatures, params.signature_intensity_ratio);

        Ok(Self {
            score: combined_score(peptide_score, glycan_score, params.peptide_weight)
                + signature_score,
            peptide_score,
            glycan_score,
            signature_score,
            glycan_coverage,
            hyperscore: hyperscore(registry),
            n_fragment_matches: registry.len(),
            n_term_glycosylated: session.glycosylated_ions.n_term,
            c_term_glycosylated: session.glycosylated_ions.c_term,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GlycopeptideMatch {
    pub session: MatchSession,
    pub scores: GlycopeptideScores,
}

#[derive(Debug, Clone, Default, Copy)]
pub struct ScoringMetrics {
    pub num_processed: usize,
    pub num_failed: usize,
    pub time_scoring: Duration,
}

/// Scores (spectrum, candidate) pairs, each in its own [`MatchSession`].
#[derive(Debug, Clone, Default)]
pub struct GlycopeptideScorer {
    pub params: ScoringParameters,
}

impl GlycopeptideScorer {
    pub fn new(params: ScoringParameters) -> Self {
        Self { params }
    }

    /// Runs matching then scoring for a single pair.
    pub fn score<S, C>(&self, spectrum: &S, candidate: &C) -> Result<GlycopeptideMatch>
    where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let session = MatchSession::run(spectrum, candidate, &self.params);
        let scores = GlycopeptideScores::from_session(&session, candidate, &self.params)?;
        Ok(GlycopeptideMatch { session, scores })
    }

    /// Scores independent pairs in parallel.
    ///
    /// The output keeps the input order, pairs that could not be scored are
    /// logged and left as `None`.
    pub fn score_batch<S, C>(&self, pairs: &[(S, C)]) -> (Vec<Option<GlycopeptideMatch>>, ScoringMetrics)
    where
        S: SpectrumLike + Sync,
        C: CandidateLike + Sync,
    {
        let start = Instant::now();
        let results: Vec<Option<GlycopeptideMatch>> = pairs
            .into_par_iter()
            .enumerate()
            .map(|(i, (spectrum, candidate))| match self.score(spectrum, candidate) {
                Ok(x) => Some(x),
                Err(e) => {
                    warn!("Unable to score pair {}: {}", i, e);
                    None
                }
            })
            .collect();

        let num_failed = results.iter().filter(|x| x.is_none()).count();
        let metrics = ScoringMetrics {
            num_processed: results.len() - num_failed,
            num_failed,
            time_scoring: start.elapsed(),
        };
        debug!("Batch scoring metrics: {:?}", metrics);
        (results, metrics)
    }
}
