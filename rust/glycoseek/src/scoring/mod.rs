pub mod coverage;
pub mod glycan;
pub mod hyperscore;
mod intensity;
mod parameters;
pub mod peptide;
pub mod scorer;
mod signature;

pub use coverage::CoverageVectors;
pub use glycan::{
    calculate_glycan_score,
    glycan_coverage,
};
pub use intensity::{
    mass_accuracy_weight,
    weighted_log_intensity,
    SeenPeaks,
};
pub use parameters::ScoringParameters;
pub use peptide::calculate_peptide_score;
pub use scorer::{
    GlycopeptideMatch,
    GlycopeptideScorer,
    GlycopeptideScores,
    ScoringMetrics,
};
pub use signature::signature_ion_score;
