use serde::{
    Deserialize,
    Serialize,
};

use crate::models::Dissociation;

/// Tunables for matching and scoring.
///
/// Every field has a default so partial JSON configs are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParameters {
    /// Relative mass error used by the scorers' accuracy weight.
    pub error_tolerance: f64,
    /// Relative mass window used while matching, falls back to
    /// `error_tolerance`. Matches beyond `error_tolerance` are penalized.
    pub search_tolerance: Option<f64>,
    pub peptide_coverage_weight: f64,
    pub glycan_core_weight: f64,
    pub glycan_coverage_weight: f64,
    /// Share of the peptide score in the combined score.
    pub peptide_weight: f64,
    pub dissociation: Dissociation,
    pub fragile_fucose: bool,
    pub extended_glycan_search: bool,
    /// Also look for compound signature ions.
    pub rare_signatures: bool,
    /// Signature ions weaker than this share of the base peak are treated
    /// as absent.
    pub signature_intensity_ratio: f64,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            error_tolerance: 2e-5,
            search_tolerance: None,
            peptide_coverage_weight: 1.0,
            glycan_core_weight: 0.4,
            glycan_coverage_weight: 0.5,
            peptide_weight: 0.65,
            dissociation: Dissociation::default(),
            fragile_fucose: true,
            extended_glycan_search: false,
            rare_signatures: false,
            signature_intensity_ratio: 0.025,
        }
    }
}

impl ScoringParameters {
    pub fn search_tolerance(&self) -> f64 {
        self.search_tolerance.unwrap_or(self.error_tolerance)
    }
}
