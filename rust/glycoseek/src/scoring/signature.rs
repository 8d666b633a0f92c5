use crate::matching::SignatureIonMatches;

const MAX_PENALTY: f64 = 20.0;

/// `-10 log10(1 - x)`, capped at [`MAX_PENALTY`] once `x` reaches 1.
fn phred_penalty(x: f64) -> f64 {
    let rest = 1.0 - x;
    if rest <= 0.0 {
        return MAX_PENALTY;
    }
    let penalty = -10.0 * rest.log10();
    if penalty.is_nan() {
        MAX_PENALTY
    } else {
        penalty
    }
}

/// Penalty (zero or negative) for signature ions that disagree with the
/// candidate's glycan composition.
///
/// An unexpected ion costs according to its intensity relative to the base
/// peak. An expected ion that is missing, or weaker than
/// `minimum_intensity_ratio` of the base peak, costs according to how many
/// copies of it the glycan carries. Unexpected ions below the ratio are
/// ignored.
///
/// Example:
/// ```
/// use glycoseek::matching::{SignatureIonMatch, SignatureIonMatches};
/// use glycoseek::models::{Peak, SignatureIon};
/// use glycoseek::scoring::signature_ion_score;
///
/// let neugc = SignatureIon {
///     name: "NeuGc".into(),
///     masses: vec![307.09],
///     expected_count: 0,
///     weight: 0.5,
///     compound: false,
/// };
/// let matches = SignatureIonMatches {
///     base_peak_intensity: 100.0,
///     expected: vec![],
///     unexpected: vec![SignatureIonMatch {
///         ion: neugc,
///         peak: Some(Peak::new(0, 307.09, 90.0)),
///     }],
/// };
/// // 1 - 0.9 leaves 0.1, a 10 point penalty
/// assert!((signature_ion_score(&matches, 0.025) + 10.0).abs() < 1e-9);
/// ```
pub fn signature_ion_score(matches: &SignatureIonMatches, minimum_intensity_ratio: f64) -> f64 {
    let ratio_of = |intensity: f64| intensity / matches.base_peak_intensity;

    let mut penalty = 0.0;
    for found in matches.unexpected.iter() {
        let Some(peak) = found.peak else {
            continue;
        };
        let ratio = ratio_of(peak.intensity);
        if ratio < minimum_intensity_ratio {
            continue;
        }
        penalty += phred_penalty(ratio);
    }

    for found in matches.expected.iter() {
        let observed = found
            .peak
            .is_some_and(|peak| ratio_of(peak.intensity) >= minimum_intensity_ratio);
        if !observed {
            penalty += phred_penalty(found.ion.missing_ion_importance());
        }
    }
    -penalty
}
