pub mod data_sources;
pub mod errors;
pub mod matching;
pub mod models;
pub mod scoring;
pub mod traits;
pub mod utils;

pub use data_sources::{
    ScoringJob,
    ScoringTask,
};
pub use errors::{
    GlycoSeekError,
    Result,
};
pub use matching::{
    MatchRegistry,
    MatchSession,
};
pub use models::{
    Fragment,
    IonSeries,
    Peak,
    PeakSet,
    TheoreticalGlycopeptide,
};
pub use scoring::{
    GlycopeptideScorer,
    GlycopeptideScores,
    ScoringParameters,
};
pub use traits::{
    CandidateLike,
    SpectrumLike,
};
