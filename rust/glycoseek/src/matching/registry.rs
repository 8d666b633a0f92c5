use serde::Serialize;
use std::collections::{
    HashMap,
    HashSet,
};

use crate::models::{
    Fragment,
    IonSeries,
    Peak,
};

/// One observed peak explained by one theoretical fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakFragmentPair {
    pub peak: Peak,
    pub fragment: Fragment,
}

impl PeakFragmentPair {
    /// Signed relative mass error of the observation.
    pub fn mass_accuracy(&self) -> f64 {
        (self.peak.neutral_mass - self.fragment.mass()) / self.fragment.mass()
    }

    pub fn fragment_name(&self) -> &str {
        self.fragment.name()
    }

    pub fn series(&self) -> IonSeries {
        self.fragment.series()
    }
}

/// Every (peak, fragment) correspondence found while matching one candidate
/// against one spectrum.
///
/// A pair is identified by the peak index and the fragment name, adding
/// the same pair twice is a no-op. A peak may explain many fragments and a
/// fragment may be explained by many peaks, both sides are kept.
#[derive(Debug, Clone, Default)]
pub struct MatchRegistry {
    members: Vec<PeakFragmentPair>,
    pair_keys: HashSet<(u32, String)>,
    by_peak: HashMap<u32, Vec<usize>>,
    by_fragment: HashMap<String, Vec<usize>>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pair, returns `false` if it was already present.
    pub fn add(&mut self, peak: &Peak, fragment: &Fragment) -> bool {
        let key = (peak.index, fragment.name().to_string());
        if self.pair_keys.contains(&key) {
            return false;
        }
        let loc = self.members.len();
        self.members.push(PeakFragmentPair {
            peak: *peak,
            fragment: fragment.clone(),
        });
        self.by_peak.entry(peak.index).or_default().push(loc);
        self.by_fragment
            .entry(key.1.clone())
            .or_default()
            .push(loc);
        self.pair_keys.insert(key);
        true
    }

    pub fn members(&self) -> &[PeakFragmentPair] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeakFragmentPair> {
        self.members.iter()
    }

    /// Distinct fragments with at least one matched peak, in first-match order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> + '_ {
        let mut seen: HashSet<&str> = HashSet::new();
        self.members.iter().filter_map(move |pair| {
            seen.insert(pair.fragment.name())
                .then_some(&pair.fragment)
        })
    }

    pub fn peaks_for<'a>(&'a self, fragment_name: &str) -> impl Iterator<Item = &'a Peak> + 'a {
        self.by_fragment
            .get(fragment_name)
            .into_iter()
            .flatten()
            .map(|&i| &self.members[i].peak)
    }

    pub fn fragments_for(&self, peak_index: u32) -> impl Iterator<Item = &Fragment> + '_ {
        self.by_peak
            .get(&peak_index)
            .into_iter()
            .flatten()
            .map(|&i| &self.members[i].fragment)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a MatchRegistry {
    type Item = &'a PeakFragmentPair;
    type IntoIter = std::slice::Iter<'a, PeakFragmentPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
