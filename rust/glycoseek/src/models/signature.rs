use serde::{
    Deserialize,
    Serialize,
};

fn default_signature_weight() -> f64 {
    0.5
}

/// A diagnostic glycan ion (eg. NeuAc or NeuGc oxonium ions) whose presence
/// or absence says something about the glycan composition.
///
/// `expected_count` is the number of copies of the signature's rarest
/// component in the candidate's glycan, zero when the candidate cannot
/// produce the ion at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureIon {
    pub name: String,
    /// Every neutral mass the ion may be observed at (eg. with and without
    /// a water loss).
    pub masses: Vec<f64>,
    #[serde(default)]
    pub expected_count: usize,
    #[serde(default = "default_signature_weight")]
    pub weight: f64,
    /// Multi-residue signatures, only looked for on request.
    #[serde(default)]
    pub compound: bool,
}

impl SignatureIon {
    pub fn is_expected(&self) -> bool {
        self.expected_count > 0
    }

    /// How much a missing expected ion should cost, capped below 1.
    pub fn missing_ion_importance(&self) -> f64 {
        (self.weight * self.expected_count as f64).min(0.99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_importance() {
        let neuac: SignatureIon =
            serde_json::from_str(r#"{"name": "NeuAc", "masses": [291.095, 273.085], "expected_count": 1}"#)
                .unwrap();
        assert!(neuac.is_expected());
        assert!(!neuac.compound);
        assert_eq!(neuac.missing_ion_importance(), 0.5);

        let many = SignatureIon {
            expected_count: 4,
            ..neuac
        };
        assert_eq!(many.missing_ion_importance(), 0.99);

        let absent = SignatureIon {
            expected_count: 0,
            ..many
        };
        assert!(!absent.is_expected());
    }
}
