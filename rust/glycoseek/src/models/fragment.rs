use serde::{
    Deserialize,
    Serialize,
};

use super::ion_series::IonSeries;

/// A b/c/y/z fragment of the peptide backbone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideFragment {
    pub series: IonSeries,
    /// 1-based index along the ladder, counted from the series' terminus.
    pub position: usize,
    pub name: String,
    pub mass: f64,
    #[serde(default)]
    pub glycosylated: bool,
}

/// Intact peptide carrying a (possibly partial) glycan remnant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubFragment {
    pub name: String,
    pub mass: f64,
    /// `false` for the minimal core stubs, `true` when more monosaccharides
    /// than the core are required.
    #[serde(default)]
    pub is_extended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OxoniumFragment {
    pub name: String,
    pub mass: f64,
}

/// A modification or adduct carried by the precursor that also shifts the
/// fragments still bearing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassShift {
    pub name: String,
    /// Mass added to the fragments that carry the shift.
    pub tandem_mass: f64,
}

/// Any theoretical fragment a candidate can emit.
///
/// Dispatch on the concrete kind is done through [`Fragment::series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Fragment {
    #[serde(rename = "peptide")]
    Peptide(PeptideFragment),
    #[serde(rename = "stub")]
    Stub(StubFragment),
    #[serde(rename = "oxonium")]
    Oxonium(OxoniumFragment),
}

impl Fragment {
    pub fn series(&self) -> IonSeries {
        match self {
            Fragment::Peptide(x) => x.series,
            Fragment::Stub(_) => IonSeries::stub_glycopeptide,
            Fragment::Oxonium(_) => IonSeries::oxonium_ion,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Fragment::Peptide(x) => &x.name,
            Fragment::Stub(x) => &x.name,
            Fragment::Oxonium(x) => &x.name,
        }
    }

    pub fn mass(&self) -> f64 {
        match self {
            Fragment::Peptide(x) => x.mass,
            Fragment::Stub(x) => x.mass,
            Fragment::Oxonium(x) => x.mass,
        }
    }

    pub fn is_glycosylated(&self) -> bool {
        match self {
            Fragment::Peptide(x) => x.glycosylated,
            Fragment::Stub(_) => true,
            Fragment::Oxonium(_) => false,
        }
    }

    /// Ladder position for backbone fragments.
    pub fn position(&self) -> Option<usize> {
        match self {
            Fragment::Peptide(x) => Some(x.position),
            _ => None,
        }
    }

    pub fn is_extended(&self) -> bool {
        match self {
            Fragment::Stub(x) => x.is_extended,
            _ => false,
        }
    }

    /// Whether this fragment is a well formed member of `series`: backbone
    /// series only hold peptide fragments of that series, the glycan series
    /// only hold their own kind.
    pub fn belongs_to(&self, series: IonSeries) -> bool {
        match self {
            Fragment::Peptide(x) => x.series == series && series.is_backbone(),
            Fragment::Stub(_) => series == IonSeries::stub_glycopeptide,
            Fragment::Oxonium(_) => series == IonSeries::oxonium_ion,
        }
    }

    /// A copy carrying `shift`, renamed so it stays distinct from the
    /// unshifted fragment.
    pub fn with_mass_shift(&self, shift: &MassShift) -> Fragment {
        let mut out = self.clone();
        let (name, mass) = match &mut out {
            Fragment::Peptide(x) => (&mut x.name, &mut x.mass),
            Fragment::Stub(x) => (&mut x.name, &mut x.mass),
            Fragment::Oxonium(x) => (&mut x.name, &mut x.mass),
        };
        name.push_str(&format!("+{}", shift.name));
        *mass += shift.tandem_mass;
        out
    }
}

impl From<PeptideFragment> for Fragment {
    fn from(x: PeptideFragment) -> Self {
        Fragment::Peptide(x)
    }
}

impl From<StubFragment> for Fragment {
    fn from(x: StubFragment) -> Self {
        Fragment::Stub(x)
    }
}

impl From<OxoniumFragment> for Fragment {
    fn from(x: OxoniumFragment) -> Self {
        Fragment::Oxonium(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_dispatch() {
        let b3: Fragment = PeptideFragment {
            series: IonSeries::b,
            position: 3,
            name: "b3".into(),
            mass: 300.0,
            glycosylated: false,
        }
        .into();
        let stub: Fragment = StubFragment {
            name: "peptide+HexNAc2".into(),
            mass: 1500.0,
            is_extended: false,
        }
        .into();
        let oxonium: Fragment = OxoniumFragment {
            name: "HexNAc".into(),
            mass: 203.079,
        }
        .into();

        assert_eq!(b3.series(), IonSeries::b);
        assert_eq!(b3.position(), Some(3));
        assert_eq!(stub.series(), IonSeries::stub_glycopeptide);
        assert!(stub.is_glycosylated());
        assert!(!stub.is_extended());
        assert_eq!(oxonium.series(), IonSeries::oxonium_ion);
        assert_eq!(oxonium.position(), None);
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"[
            {"kind": "peptide", "series": "y", "position": 2, "name": "y2", "mass": 250.1},
            {"kind": "stub", "name": "peptide+Hex1", "mass": 1200.5, "is_extended": true}
        ]"#;
        let frags: Vec<Fragment> = serde_json::from_str(json).unwrap();
        assert_eq!(frags[0].series(), IonSeries::y);
        assert!(!frags[0].is_glycosylated());
        assert!(frags[1].is_extended());
    }

    #[test]
    fn test_belongs_to() {
        let json = r#"[
            {"kind": "peptide", "series": "oxonium_ion", "position": 1, "name": "x", "mass": 204.08},
            {"kind": "peptide", "series": "stub_glycopeptide", "position": 1, "name": "pep", "mass": 900.0},
            {"kind": "peptide", "series": "c", "position": 1, "name": "c1", "mass": 115.0}
        ]"#;
        let frags: Vec<Fragment> = serde_json::from_str(json).unwrap();
        assert!(!frags[0].belongs_to(IonSeries::oxonium_ion));
        assert!(!frags[1].belongs_to(IonSeries::stub_glycopeptide));
        assert!(frags[2].belongs_to(IonSeries::c));
        assert!(!frags[2].belongs_to(IonSeries::z));
    }

    #[test]
    fn test_mass_shift() {
        let stub: Fragment = StubFragment {
            name: "pep+HexNAc1".into(),
            mass: 1000.0,
            is_extended: false,
        }
        .into();
        let shift = MassShift {
            name: "Ammonium".into(),
            tandem_mass: 17.0265,
        };
        let shifted = stub.with_mass_shift(&shift);
        assert_eq!(shifted.name(), "pep+HexNAc1+Ammonium");
        assert!((shifted.mass() - 1017.0265).abs() < 1e-9);
        assert!(!shifted.is_extended());
        assert_eq!(stub.name(), "pep+HexNAc1");
    }
}
