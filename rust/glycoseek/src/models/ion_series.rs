use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug)]
pub enum IonParsingError {
    UnsupportedIonSeries { label: String },
}

impl Display for IonParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Refers to what terminus of the original peptide retains the
/// charge after a fragmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IonSeriesTerminality {
    NTerm,
    CTerm,
    None,
}

/// Fragment ion series that the scoring engine knows about.
///
/// Backbone series carry a direction (N-terminal series count up from the
/// N-terminus, C-terminal ones from the C-terminus), the glycan series do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum IonSeries {
    b,
    c,
    y,
    z,
    stub_glycopeptide,
    oxonium_ion,
}

impl IonSeries {
    pub const BACKBONE: [IonSeries; 4] = [IonSeries::b, IonSeries::y, IonSeries::c, IonSeries::z];

    pub fn terminality(&self) -> IonSeriesTerminality {
        match self {
            IonSeries::b => IonSeriesTerminality::NTerm,
            IonSeries::c => IonSeriesTerminality::NTerm,
            IonSeries::y => IonSeriesTerminality::CTerm,
            IonSeries::z => IonSeriesTerminality::CTerm,
            IonSeries::stub_glycopeptide => IonSeriesTerminality::None,
            IonSeries::oxonium_ion => IonSeriesTerminality::None,
        }
    }

    /// Sign of the ladder direction: `1` for N-terminal, `-1` for C-terminal
    /// and `0` for series that are not read off the backbone.
    pub fn direction(&self) -> i8 {
        match self.terminality() {
            IonSeriesTerminality::NTerm => 1,
            IonSeriesTerminality::CTerm => -1,
            IonSeriesTerminality::None => 0,
        }
    }

    pub fn is_backbone(&self) -> bool {
        self.direction() != 0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IonSeries::b => "b",
            IonSeries::c => "c",
            IonSeries::y => "y",
            IonSeries::z => "z",
            IonSeries::stub_glycopeptide => "stub_glycopeptide",
            IonSeries::oxonium_ion => "oxonium_ion",
        }
    }
}

impl Display for IonSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IonSeries {
    type Err = IonParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" => Ok(IonSeries::b),
            "c" => Ok(IonSeries::c),
            "y" => Ok(IonSeries::y),
            "z" => Ok(IonSeries::z),
            "stub_glycopeptide" => Ok(IonSeries::stub_glycopeptide),
            "oxonium_ion" => Ok(IonSeries::oxonium_ion),
            _ => Err(IonParsingError::UnsupportedIonSeries {
                label: s.to_string(),
            }),
        }
    }
}

/// How the precursor was dissociated, which decides what gets matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dissociation {
    #[default]
    #[serde(rename = "hcd")]
    Hcd,
    #[serde(rename = "exd")]
    Exd,
    #[serde(rename = "ethcd")]
    EThcD,
}

impl Dissociation {
    pub fn is_collisional(&self) -> bool {
        matches!(self, Dissociation::Hcd | Dissociation::EThcD)
    }

    pub fn is_electron_based(&self) -> bool {
        matches!(self, Dissociation::Exd | Dissociation::EThcD)
    }
}

/// The rule set handed to the ladder generator of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FragmentationStrategy {
    #[default]
    #[serde(rename = "hcd")]
    Hcd,
    #[serde(rename = "exd")]
    Exd,
}
