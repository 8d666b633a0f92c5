use crate::matching::MatchRegistry;
use crate::models::{
    IonSeries,
    IonSeriesTerminality,
};
use crate::utils::math::{
    finite_or_zero,
    lnfact,
};

/// Counts and summed intensities per fragment family.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HyperscoreTerms {
    pub n_term_count: usize,
    pub c_term_count: usize,
    pub stub_count: usize,
    pub n_term_intensity: f64,
    pub c_term_intensity: f64,
    pub stub_intensity: f64,
}

impl HyperscoreTerms {
    /// Oxonium ions are not part of the score.
    pub fn from_registry(registry: &MatchRegistry) -> Self {
        let mut out = Self::default();
        for pair in registry.iter() {
            let intensity = pair.peak.intensity;
            match pair.series().terminality() {
                IonSeriesTerminality::NTerm => {
                    out.n_term_count += 1;
                    out.n_term_intensity += intensity;
                }
                IonSeriesTerminality::CTerm => {
                    out.c_term_count += 1;
                    out.c_term_intensity += intensity;
                }
                IonSeriesTerminality::None => {
                    if pair.series() == IonSeries::stub_glycopeptide {
                        out.stub_count += 1;
                        out.stub_intensity += intensity;
                    }
                }
            }
        }
        out
    }

    /// From: PMC5409104, with the stub glycopeptides as a third family
    ///
    /// `log(Nn! * Nc! * Ns! * (Sum Intensity n) * (Sum Intensity c) * (Sum Intensity s))`
    ///
    /// A family with no matches zeroes the product, so the score is 0.
    ///
    /// Example:
    /// ```
    /// use glycoseek::scoring::hyperscore::HyperscoreTerms;
    ///
    /// let terms = HyperscoreTerms {
    ///     n_term_count: 3,
    ///     c_term_count: 2,
    ///     stub_count: 1,
    ///     n_term_intensity: 30.0,
    ///     c_term_intensity: 20.0,
    ///     stub_intensity: 10.0,
    /// };
    /// let expected = (6.0f64 * 2.0 * 1.0 * 30.0 * 20.0 * 10.0).ln();
    /// assert!((terms.score() - expected).abs() < 1e-9);
    /// assert_eq!(HyperscoreTerms::default().score(), 0.0);
    /// ```
    pub fn score(&self) -> f64 {
        // Addition of logs is the same as log of products
        let score = lnfact(self.n_term_count)
            + lnfact(self.c_term_count)
            + lnfact(self.stub_count)
            + self.stub_intensity.ln()
            + self.n_term_intensity.ln()
            + self.c_term_intensity.ln();
        finite_or_zero(score)
    }
}

pub fn hyperscore(registry: &MatchRegistry) -> f64 {
    HyperscoreTerms::from_registry(registry).score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Fragment,
        OxoniumFragment,
        Peak,
        PeptideFragment,
        StubFragment,
    };

    #[test]
    fn test_terms_skip_oxonium() {
        let mut registry = MatchRegistry::new();
        let b2: Fragment = PeptideFragment {
            series: IonSeries::b,
            position: 2,
            name: "b2".into(),
            mass: 200.0,
            glycosylated: false,
        }
        .into();
        let z1: Fragment = PeptideFragment {
            series: IonSeries::z,
            position: 1,
            name: "z1".into(),
            mass: 130.0,
            glycosylated: false,
        }
        .into();
        let stub: Fragment = StubFragment {
            name: "pep+HexNAc1".into(),
            mass: 1203.0,
            is_extended: false,
        }
        .into();
        let oxonium: Fragment = OxoniumFragment {
            name: "HexNAc".into(),
            mass: 203.079,
        }
        .into();
        registry.add(&Peak::new(0, 200.0, 5.0), &b2);
        registry.add(&Peak::new(1, 130.0, 7.0), &z1);
        registry.add(&Peak::new(2, 1203.0, 11.0), &stub);
        registry.add(&Peak::new(3, 203.079, 1000.0), &oxonium);

        let terms = HyperscoreTerms::from_registry(&registry);
        assert_eq!(terms.n_term_count, 1);
        assert_eq!(terms.c_term_count, 1);
        assert_eq!(terms.stub_count, 1);
        assert_eq!(terms.n_term_intensity, 5.0);
        assert_eq!(terms.stub_intensity, 11.0);

        let expected = (5.0f64 * 7.0 * 11.0).ln();
        assert!((hyperscore(&registry) - expected).abs() < 1e-12);
    }
}
