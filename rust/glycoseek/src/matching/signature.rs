use serde::Serialize;
use tracing::debug;

use super::session::MatchSession;
use crate::models::{
    Peak,
    SignatureIon,
};
use crate::traits::{
    CandidateLike,
    SpectrumLike,
};

/// The most intense peak in the window of any of the ion's masses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureIonMatch {
    pub ion: SignatureIon,
    pub peak: Option<Peak>,
}

/// Signature ions looked for in one spectrum, split by whether the
/// candidate's glycan could have produced them.
///
/// Kept apart from the registry: these ions neither mask peaks nor feed the
/// peptide and glycan scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignatureIonMatches {
    /// Intensity of the spectrum's base peak.
    pub base_peak_intensity: f64,
    /// Every expected ion, matched or not.
    pub expected: Vec<SignatureIonMatch>,
    /// Only the unexpected ions that were observed.
    pub unexpected: Vec<SignatureIonMatch>,
}

impl MatchSession {
    /// Looks for the candidate's signature ions. Compound signatures are
    /// only considered with `rare_signatures`.
    ///
    /// An empty spectrum records nothing.
    pub fn match_signature_ions<S, C>(
        &mut self,
        spectrum: &S,
        candidate: &C,
        error_tolerance: f64,
        rare_signatures: bool,
    ) where
        S: SpectrumLike + ?Sized,
        C: CandidateLike + ?Sized,
    {
        let Some(base_peak) = spectrum.base_peak() else {
            return;
        };
        self.signatures.base_peak_intensity = base_peak.intensity;

        for ion in candidate.signature_ions() {
            if ion.compound && !rare_signatures {
                continue;
            }
            let peak = ion
                .masses
                .iter()
                .flat_map(|&mass| spectrum.all_peaks_for(mass, error_tolerance))
                .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
                .copied();

            match (ion.is_expected(), peak) {
                (true, peak) => self.signatures.expected.push(SignatureIonMatch { ion, peak }),
                (false, Some(peak)) => self.signatures.unexpected.push(SignatureIonMatch {
                    ion,
                    peak: Some(peak),
                }),
                (false, None) => {}
            }
        }
        debug!(
            "Signature ions: {} expected, {} unexpected observed",
            self.signatures.expected.len(),
            self.signatures.unexpected.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        PeakSet,
        TheoreticalGlycopeptide,
    };

    fn signature(name: &str, masses: &[f64], expected_count: usize) -> SignatureIon {
        SignatureIon {
            name: name.into(),
            masses: masses.to_vec(),
            expected_count,
            weight: 0.5,
            compound: false,
        }
    }

    fn candidate(signature_ions: Vec<SignatureIon>) -> TheoreticalGlycopeptide {
        TheoreticalGlycopeptide {
            sequence: "NKT".into(),
            size: 3,
            glycan_size: 6,
            signature_ions,
            ..Default::default()
        }
    }

    #[test]
    fn test_expected_and_unexpected() {
        let spectrum = PeakSet::from_masses_and_intensities([
            (273.0849, 40.0),
            (291.0954, 25.0),
            (307.0903, 5.0),
            (1000.0, 200.0),
        ]);
        let gp = candidate(vec![
            signature("NeuAc", &[291.0954, 273.0849], 1),
            signature("NeuGc", &[307.0903, 289.0798], 0),
            signature("Hex-phosphate", &[242.0192], 0),
        ]);
        let mut session = MatchSession::new();
        session.match_signature_ions(&spectrum, &gp, 2e-5, false);

        let found = &session.signatures;
        assert_eq!(found.base_peak_intensity, 200.0);
        assert_eq!(found.expected.len(), 1);
        // the water loss peak is the more intense one
        assert_eq!(found.expected[0].peak.unwrap().intensity, 40.0);
        assert_eq!(found.unexpected.len(), 1);
        assert_eq!(found.unexpected[0].ion.name, "NeuGc");
    }

    #[test]
    fn test_missing_and_compound() {
        let mut acetyl = signature("Acetyl-NeuAc", &[333.1060], 0);
        acetyl.compound = true;
        let gp = candidate(vec![signature("NeuAc", &[291.0954], 2), acetyl]);
        let spectrum = PeakSet::from_masses_and_intensities([(333.1060, 10.0), (900.0, 10.0)]);

        let mut session = MatchSession::new();
        session.match_signature_ions(&spectrum, &gp, 2e-5, false);
        assert_eq!(session.signatures.expected.len(), 1);
        assert!(session.signatures.expected[0].peak.is_none());
        assert!(session.signatures.unexpected.is_empty());

        let mut session = MatchSession::new();
        session.match_signature_ions(&spectrum, &gp, 2e-5, true);
        assert_eq!(session.signatures.unexpected.len(), 1);

        let mut session = MatchSession::new();
        session.match_signature_ions(&PeakSet::default(), &gp, 2e-5, true);
        assert_eq!(session.signatures, SignatureIonMatches::default());
    }
}
