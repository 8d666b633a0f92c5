use glycoseek::models::{
    Dissociation,
    Fragment,
    OxoniumFragment,
    PeptideFragment,
    SeriesLadder,
    StubFragment,
};
use glycoseek::scoring::{
    calculate_glycan_score,
    calculate_peptide_score,
    SeenPeaks,
};
use glycoseek::traits::LadderPosition;
use glycoseek::{
    MatchRegistry,
    Peak,
    GlycopeptideScorer,
    IonSeries,
    PeakSet,
    ScoringJob,
    ScoringParameters,
    TheoreticalGlycopeptide,
};

const PROTON_FREE_B: [f64; 4] = [98.0600, 227.1026, 324.1554, 438.1983];
const PROTON_FREE_Y: [f64; 4] = [146.1055, 260.1484, 357.2012, 486.2438];

fn ladder(series: IonSeries, masses: &[f64], glycosite: Option<usize>) -> SeriesLadder {
    let positions: Vec<LadderPosition> = masses
        .iter()
        .enumerate()
        .map(|(i, &mass)| {
            let frag: Fragment = PeptideFragment {
                series,
                position: i + 1,
                name: format!("{}{}", series, i + 1),
                mass,
                glycosylated: glycosite == Some(i + 1),
            }
            .into();
            vec![frag]
        })
        .collect();
    SeriesLadder {
        series,
        strategy: None,
        positions,
    }
}

fn stub(name: &str, mass: f64, is_extended: bool) -> Fragment {
    StubFragment {
        name: name.into(),
        mass,
        is_extended,
    }
    .into()
}

fn candidate() -> TheoreticalGlycopeptide {
    TheoreticalGlycopeptide {
        sequence: "PENTK".into(),
        size: 5,
        glycan_size: 3,
        glycan_side_groups: 0,
        ladders: vec![
            ladder(IonSeries::b, &PROTON_FREE_B, Some(3)),
            ladder(IonSeries::y, &PROTON_FREE_Y, Some(3)),
        ],
        stub_fragments: vec![
            stub("PENTK", 583.29, false),
            stub("PENTK+HexNAc1", 786.37, false),
            stub("PENTK+HexNAc2", 989.45, false),
            stub("PENTK+HexNAc2Hex1", 1151.50, false),
        ],
        signature_ions: vec![],
        mass_shift: None,
        fucosylated_stub_fragments: vec![],
        oxonium_fragments: vec![
            OxoniumFragment {
                name: "HexNAc".into(),
                mass: 203.0794,
            }
            .into(),
        ],
    }
}

fn backbone_spectrum() -> PeakSet {
    PeakSet::from_masses_and_intensities(
        PROTON_FREE_B
            .iter()
            .chain(PROTON_FREE_Y.iter())
            .map(|&m| (m, 100.0)),
    )
}

#[test]
fn test_fully_covered_backbone() {
    let scorer = GlycopeptideScorer::default();
    let out = scorer.score(&backbone_spectrum(), &candidate()).unwrap();

    let expected = 16.0 * 8.0 / 9.0;
    assert!((out.scores.peptide_score - expected).abs() < 1e-9);
    assert_eq!(out.scores.glycan_score, 0.0);
    assert!((out.scores.score - expected * 0.65).abs() < 1e-9);
    assert_eq!(out.scores.n_fragment_matches, 8);
    // glycosylated at 3, propagated to 4
    assert_eq!(out.scores.n_term_glycosylated, 2);
    assert_eq!(out.scores.c_term_glycosylated, 2);
    assert!(out.scores.score.is_finite());
}

#[test]
fn test_glycan_and_backbone() {
    let mut pairs: Vec<(f64, f64)> = PROTON_FREE_B.iter().map(|&m| (m, 100.0)).collect();
    pairs.push((583.29, 100.0));
    pairs.push((786.37, 100.0));
    pairs.push((203.0794, 1000.0));
    let spectrum = PeakSet::from_masses_and_intensities(pairs);

    let scorer = GlycopeptideScorer::default();
    let out = scorer.score(&spectrum, &candidate()).unwrap();

    let core = 0.5f64.powf(0.4);
    let extended = (2.0f64 / 3.0).powf(0.5);
    assert!((out.scores.glycan_score - 4.0 * core * extended).abs() < 1e-9);
    assert!((out.scores.glycan_coverage - core * extended).abs() < 1e-9);
    // b1..b4 cover positions 1..4 only from one side
    assert!((out.scores.peptide_score - 8.0 * 4.0 / 9.0).abs() < 1e-9);
    let oxonium = out.session.registry.peaks_for("HexNAc").count();
    assert_eq!(oxonium, 1);
    assert_eq!(out.session.masked.len(), 3);
}

#[test]
fn test_electron_dissociation_ignores_glycan_ions() {
    let params = ScoringParameters {
        dissociation: Dissociation::Exd,
        ..Default::default()
    };
    let spectrum = PeakSet::from_masses_and_intensities([(583.29, 100.0), (203.0794, 100.0)]);
    let out = GlycopeptideScorer::new(params)
        .score(&spectrum, &candidate())
        .unwrap();
    assert!(out.session.registry.is_empty());
    assert_eq!(out.scores.peptide_score, 0.0);
    assert_eq!(out.scores.glycan_score, 0.0);
}

#[test]
fn test_wide_search_window_is_penalized() {
    // 30 ppm off, inside the search window but past the scoring tolerance
    let shifted: Vec<(f64, f64)> = PROTON_FREE_B
        .iter()
        .chain(PROTON_FREE_Y.iter())
        .map(|&m| (m * (1.0 + 3e-5), 100.0))
        .collect();
    let spectrum = PeakSet::from_masses_and_intensities(shifted);

    let narrow = GlycopeptideScorer::default()
        .score(&spectrum, &candidate())
        .unwrap();
    assert_eq!(narrow.scores.n_fragment_matches, 0);

    let params = ScoringParameters {
        search_tolerance: Some(5e-5),
        ..Default::default()
    };
    let wide = GlycopeptideScorer::new(params)
        .score(&spectrum, &candidate())
        .unwrap();
    assert_eq!(wide.scores.n_fragment_matches, 8);
    assert!(wide.scores.peptide_score < 0.0);
}

#[test]
fn test_batch_from_json_job() {
    let task = serde_json::json!({
        "id": "scan=1",
        "peaks": backbone_spectrum(),
        "candidate": candidate(),
    });
    let content = serde_json::Value::Array(vec![task.clone(), task]).to_string();
    let job = ScoringJob::from_json(&content).unwrap();
    assert_eq!(job.len(), 2);

    let pairs: Vec<_> = job
        .tasks
        .into_iter()
        .map(|t| t.into_parts().1)
        .collect();
    let (results, metrics) = GlycopeptideScorer::default().score_batch(&pairs);
    assert_eq!(metrics.num_processed, 2);
    let scores: Vec<f64> = results
        .iter()
        .map(|r| r.as_ref().unwrap().scores.peptide_score)
        .collect();
    assert_eq!(scores[0], scores[1]);
    assert!((scores[0] - 16.0 * 8.0 / 9.0).abs() < 1e-9);
}

#[test]
fn test_repeated_insertion_does_not_double_count() {
    let gp = candidate();
    let b2 = &gp.ladders[0].positions[1][0];
    let y2 = &gp.ladders[1].positions[1][0];
    let core_stub = &gp.stub_fragments[1];
    let pairs = [
        (Peak::new(0, b2.mass(), 300.0), b2),
        (Peak::new(1, y2.mass(), 200.0), y2),
        (Peak::new(2, core_stub.mass(), 400.0), core_stub),
    ];

    let mut once = MatchRegistry::new();
    let mut twice = MatchRegistry::new();
    for (peak, frag) in pairs.iter() {
        once.add(peak, frag);
        twice.add(peak, frag);
        twice.add(peak, frag);
    }
    assert_eq!(once.len(), twice.len());

    let peptide_once = calculate_peptide_score(&once, gp.size, 2e-5, 1.0).unwrap();
    let peptide_twice = calculate_peptide_score(&twice, gp.size, 2e-5, 1.0).unwrap();
    assert!(peptide_once > 0.0);
    assert_eq!(peptide_once, peptide_twice);

    let glycan_once = calculate_glycan_score(&once, &gp, 2e-5, 0.4, 0.5, &mut SeenPeaks::new());
    let glycan_twice = calculate_glycan_score(&twice, &gp, 2e-5, 0.4, 0.5, &mut SeenPeaks::new());
    assert!(glycan_once > 0.0);
    assert_eq!(glycan_once, glycan_twice);
}

#[test]
fn test_malformed_inputs_are_rejected() {
    // two distinct peaks sharing an index would lose one of them in the registry
    let task = serde_json::json!({
        "id": "scan=2",
        "peaks": [
            {"index": 0, "neutral_mass": 583.29, "intensity": 100.0},
            {"index": 0, "neutral_mass": 583.295, "intensity": 50.0},
        ],
        "candidate": candidate(),
    });
    assert!(ScoringJob::from_json(&serde_json::Value::Array(vec![task]).to_string()).is_err());

    // a backbone-kind fragment filed as an oxonium ion
    let mut bad = serde_json::to_value(candidate()).unwrap();
    bad["oxonium_fragments"] = serde_json::json!([
        {"kind": "peptide", "series": "oxonium_ion", "position": 1, "name": "HexNAc", "mass": 203.0794}
    ]);
    let bad: TheoreticalGlycopeptide = serde_json::from_value(bad).unwrap();
    assert!(bad.validate().is_err());
}
