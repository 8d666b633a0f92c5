mod backbone;
mod glycan;
mod registry;
mod session;
mod signature;

pub use backbone::glycosylation_flags;
pub use registry::{
    MatchRegistry,
    PeakFragmentPair,
};
pub use session::{
    GlycosylatedIonCounts,
    MaskedPeaks,
    MatchSession,
};
pub use signature::{
    SignatureIonMatch,
    SignatureIonMatches,
};
