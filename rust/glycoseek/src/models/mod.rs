mod fragment;
mod glycopeptide;
mod ion_series;
mod peak;
mod signature;

pub use fragment::{
    Fragment,
    MassShift,
    OxoniumFragment,
    PeptideFragment,
    StubFragment,
};
pub use glycopeptide::{
    SeriesLadder,
    TheoreticalGlycopeptide,
};
pub use ion_series::{
    Dissociation,
    FragmentationStrategy,
    IonParsingError,
    IonSeries,
    IonSeriesTerminality,
};
pub use peak::{
    Peak,
    PeakKey,
    PeakSet,
};
pub use signature::SignatureIon;
