use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use super::registry::MatchRegistry;
use super::signature::SignatureIonMatches;
use crate::models::{
    FragmentationStrategy,
    IonSeries,
    PeakKey,
};
use crate::scoring::ScoringParameters;
use crate::traits::{
    CandidateLike,
    SpectrumLike,
};

/// Peaks that were already attributed to a higher priority series.
pub type MaskedPeaks = HashSet<PeakKey>;

/// Running count of ladder positions that carry the glycan, split by the
/// direction of the series they were counted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GlycosylatedIonCounts {
    pub n_term: usize,
    pub c_term: usize,
}

impl GlycosylatedIonCounts {
    pub fn add(&mut self, direction: i8, count: usize) {
        match direction.signum() {
            1 => self.n_term += count,
            -1 => self.c_term += count,
            _ => {}
        }
    }
}

/// State for a single (spectrum, candidate) scoring attempt.
///
/// The matchers are the only things that write to it; once matching is done
/// the scorers read the registry without modifying it.
#[derive(Debug, Clone, Default)]
pub struct MatchSession {
    pub registry: MatchRegistry,
    /// Peaks claimed by the glycan matchers, skipped by the backbone ones.
    pub masked: MaskedPeaks,
    pub glycosylated_ions: GlycosylatedIonCounts,
    pub signatures: SignatureIonMatches,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session and runs every matcher the dissociation method
    /// calls for.
    pub fn run<S, C>(spectrum: &S, candidate: &C, params: &ScoringParameters) -> Self
    where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let mut session = Self::new();
        session.match_all(spectrum, candidate, params);
        session
    }

    /// Matches glycan fragments first (collisional dissociation only), then
    /// the N-terminal and C-terminal backbone series, then the signature
    /// ions.
    pub fn match_all<S, C>(&mut self, spectrum: &S, candidate: &C, params: &ScoringParameters)
    where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let error_tolerance = params.search_tolerance();
        let mut masked = std::mem::take(&mut self.masked);

        if params.dissociation.is_collisional() {
            self.match_oxonium_ions(spectrum, candidate, error_tolerance, &mut masked);
            self.match_stub_glycopeptides(
                spectrum,
                candidate,
                error_tolerance,
                &mut masked,
                params.extended_glycan_search,
            );
        }

        let (strategy, series): (_, &[IonSeries]) = if params.dissociation.is_electron_based() {
            (
                FragmentationStrategy::Exd,
                &[IonSeries::b, IonSeries::c, IonSeries::y, IonSeries::z],
            )
        } else {
            (FragmentationStrategy::Hcd, &[IonSeries::b, IonSeries::y])
        };

        for &s in series {
            self.match_backbone_series(
                spectrum,
                candidate,
                s,
                error_tolerance,
                Some(&masked),
                Some(strategy),
            );
        }

        self.match_signature_ions(
            spectrum,
            candidate,
            error_tolerance,
            params.rare_signatures,
        );

        debug!(
            "Matched {} peak/fragment pairs ({} masked peaks, {:?})",
            self.registry.len(),
            masked.len(),
            self.glycosylated_ions,
        );
        self.masked = masked;
    }
}
