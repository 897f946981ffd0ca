// tests/ris_tests.rs
//! Integratietests voor de RIS-pipeline: eigenschappen van RR sets, validatie,
//! en het gedrag van de greedy selectie op vaste collecties.

use adfcris::coverage::{coverage_of, GreedyCover};
use adfcris::index::InvertedIndex;
use adfcris::sampler::RrSampler;
use adfcris::{
    generate_rr_sets, run_ris, select_seeds, select_seeds_with_coverage, EdgeProperty, Graph,
    IndependentCascade, Params, RisError, RrSet, PROBABILITY_KEY,
};
use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// De graaf uit het voorbeeldscenario: 0 -> 1 -> 2 <- 3, alle kansen 1.0.
fn scenario_graph() -> Graph {
    Graph::with_probabilities(4, &[(0, 1, 1.0), (1, 2, 1.0), (3, 2, 1.0)])
}

fn sorted(mut s: RrSet) -> RrSet {
    s.sort_unstable();
    s
}

/// Brute-force voorouders van `root` (inclusief `root`) via herhaalde relaxatie.
fn ancestors(n: usize, edges: &[(usize, usize)], root: usize) -> Vec<usize> {
    let mut reach = vec![false; n];
    reach[root] = true;
    let mut changed = true;
    while changed {
        changed = false;
        for &(u, v) in edges {
            if reach[v] && !reach[u] {
                reach[u] = true;
                changed = true;
            }
        }
    }
    (0..n).filter(|&v| reach[v]).collect()
}

fn random_graph(rng: &mut StdRng, n: usize, m: usize, p: f64) -> (Graph, Vec<(usize, usize)>) {
    let edges: Vec<(usize, usize)> = (0..m)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
        .filter(|&(u, v)| u != v)
        .collect();
    let with_p: Vec<(usize, usize, f64)> = edges.iter().map(|&(u, v)| (u, v, p)).collect();
    (Graph::with_probabilities(n, &with_p), edges)
}

/// Controleert dat elke niet-geselecteerde knoop precies het aantal ongedekte
/// RR sets als winst heeft.
fn assert_gain_invariant(greedy: &GreedyCover<'_>, rr_sets: &[RrSet], n: usize) {
    for v in 0..n {
        if greedy.is_selected(v) {
            continue;
        }
        let expected = rr_sets
            .iter()
            .enumerate()
            .filter(|(i, rr)| !greedy.is_covered(*i) && rr.contains(&v))
            .count();
        assert_eq!(greedy.gain(v), expected, "winst van knoop {}", v);
    }
}

/*────────── Sampler ──────────*/

#[test]
fn test_scenario_rr_sets_with_certain_edges() {
    let g = scenario_graph();
    let probs = [1.0, 1.0, 1.0];
    let mut sampler = RrSampler::new(&g, &probs, IndependentCascade);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(sorted(sampler.sample_from(2, &mut rng)), vec![0, 1, 2, 3]);
    assert_eq!(sorted(sampler.sample_from(1, &mut rng)), vec![0, 1]);
    assert_eq!(sampler.sample_from(0, &mut rng), vec![0]);
    assert_eq!(sampler.sample_from(3, &mut rng), vec![3]);
}

#[test]
fn test_root_always_member() {
    let mut rng = StdRng::seed_from_u64(17);
    let (g, _) = random_graph(&mut rng, 30, 90, 0.3);
    let probs = vec![0.3; g.m()];
    let mut sampler = RrSampler::new(&g, &probs, IndependentCascade);
    for root in 0..g.n() {
        let rr = sampler.sample_from(root, &mut rng);
        assert_eq!(rr[0], root);
        let mut dedup = sorted(rr.clone());
        dedup.dedup();
        assert_eq!(dedup.len(), rr.len(), "knopen komen maar één keer voor");
    }
}

#[test]
fn test_certain_edges_give_exact_ancestors() {
    let mut rng = StdRng::seed_from_u64(23);
    let (g, edges) = random_graph(&mut rng, 25, 60, 1.0);
    let probs = vec![1.0; g.m()];
    let mut sampler = RrSampler::new(&g, &probs, IndependentCascade);
    for root in 0..g.n() {
        let rr = sorted(sampler.sample_from(root, &mut rng));
        assert_eq!(rr, ancestors(g.n(), &edges, root));
    }
}

#[test]
fn test_impossible_edges_give_singleton() {
    let mut rng = StdRng::seed_from_u64(29);
    let (g, _) = random_graph(&mut rng, 20, 80, 0.0);
    let probs = vec![0.0; g.m()];
    let mut sampler = RrSampler::new(&g, &probs, IndependentCascade);
    for root in 0..g.n() {
        assert_eq!(sampler.sample_from(root, &mut rng), vec![root]);
    }
}

#[test]
fn test_single_edge_inclusion_frequency() {
    // 0 -> 1 met p = 0.3: vanuit wortel 1 hoort 0 in ~30% van de sets te zitten.
    let g = Graph::with_probabilities(2, &[(0, 1, 0.3)]);
    let probs = [0.3];
    let mut sampler = RrSampler::new(&g, &probs, IndependentCascade);
    let mut rng = StdRng::seed_from_u64(31);
    let trials = 20_000;
    let hits = (0..trials)
        .filter(|_| sampler.sample_from(1, &mut rng).contains(&0))
        .count();
    assert_relative_eq!(hits as f64 / trials as f64, 0.3, epsilon = 0.02);
}

/*────────── Validatie ──────────*/

#[test]
fn test_validation_errors_before_sampling() {
    let fresh = || StdRng::seed_from_u64(99);
    let untouched = fresh().gen::<u64>();

    let mut g = Graph::from_edges(3, &[(0, 1), (1, 2)]);
    let mut rng = fresh();
    assert!(matches!(
        generate_rr_sets(&g, 10, &mut rng),
        Err(RisError::MissingProbability(_))
    ));
    assert_eq!(rng.gen::<u64>(), untouched);

    g.set_edge_property(PROBABILITY_KEY, EdgeProperty::Int(vec![1, 0]))
        .unwrap();
    let mut rng = fresh();
    assert!(matches!(
        generate_rr_sets(&g, 10, &mut rng),
        Err(RisError::WrongPropertyKind { found: "int", .. })
    ));
    assert_eq!(rng.gen::<u64>(), untouched);

    g.set_edge_property(PROBABILITY_KEY, EdgeProperty::Float(vec![0.5, 1.5]))
        .unwrap();
    assert!(matches!(
        generate_rr_sets(&g, 10, &mut fresh()),
        Err(RisError::ProbabilityOutOfRange { edge: 1, .. })
    ));

    g.set_edge_property(PROBABILITY_KEY, EdgeProperty::Float(vec![f64::NAN, 0.5]))
        .unwrap();
    assert!(matches!(
        generate_rr_sets(&g, 10, &mut fresh()),
        Err(RisError::ProbabilityOutOfRange { edge: 0, .. })
    ));
}

/*────────── Selectie ──────────*/

#[test]
fn test_no_samples_no_seeds() {
    let g = scenario_graph();
    let rr = generate_rr_sets(&g, 0, &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(rr.is_empty());
    for k in [0, 1, 4, 100] {
        assert!(select_seeds(&rr, k, g.n()).is_empty());
    }
}

#[test]
fn test_scenario_first_pick_is_most_frequent() {
    // Knoop 0 zit in RR(0), RR(1) en RR(2) en komt dus het vaakst voor.
    let g = scenario_graph();
    let rr = generate_rr_sets(&g, 10_000, &mut StdRng::seed_from_u64(5)).unwrap();
    let index = InvertedIndex::build(&rr, g.n());
    let most_frequent = (0..g.n()).max_by_key(|&v| index.frequency(v)).unwrap();
    assert_eq!(most_frequent, 0);
    assert_eq!(select_seeds(&rr, 1, g.n()), vec![most_frequent]);
    // Daarna voegt alleen knoop 3 nog iets toe; verder wordt niet opgevuld.
    assert_eq!(select_seeds(&rr, 4, g.n()), vec![0, 3]);
}

#[test]
fn test_scenario_spread_estimate() {
    // Met zekere kanten bereikt seed 0 precies {0, 1, 2}.
    let g = scenario_graph();
    let rr = generate_rr_sets(&g, 20_000, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
    let sel = select_seeds_with_coverage(&rr, 1, g.n());
    assert_eq!(sel.covered, coverage_of(&rr, &sel.seeds, g.n()));
    assert_relative_eq!(sel.estimated_spread(g.n()), 3.0, epsilon = 0.1);
}

#[test]
fn test_gain_invariant_on_sampled_collection() {
    let mut rng = StdRng::seed_from_u64(41);
    let (g, _) = random_graph(&mut rng, 40, 120, 0.2);
    let rr = generate_rr_sets(&g, 2_000, &mut rng).unwrap();
    let index = InvertedIndex::build(&rr, g.n());
    let mut greedy = GreedyCover::new(&rr, &index);
    assert_gain_invariant(&greedy, &rr, g.n());
    while greedy.step().is_some() {
        assert_gain_invariant(&greedy, &rr, g.n());
    }
    // Zonder resterende winst is alles gedekt.
    assert_eq!(greedy.covered_count(), rr.len());
}

#[test]
fn test_run_ris_on_star() {
    // Ster: 0 -> i voor i in 1..=8 met zekere kanten; 0 is de enige zinvolle seed.
    let edges: Vec<(usize, usize, f64)> = (1..=8).map(|i| (0, i, 1.0)).collect();
    let g = Graph::with_probabilities(9, &edges);
    let mut p = Params::default();
    p.with_budget(1, 5_000);
    let report = run_ris(&g, &p).unwrap();
    assert_eq!(report.selection.seeds, vec![0]);
    assert_eq!(report.selection.covered, 5_000);
    assert_relative_eq!(report.selection.estimated_spread(g.n()), 9.0);
}

/*────────── Eigenschappen ──────────*/

fn collection_strategy() -> impl Strategy<Value = (usize, Vec<RrSet>)> {
    (1usize..12).prop_flat_map(|n| {
        // Herhaalde id's binnen één set zijn toegestaan; ze tellen als één lidmaatschap.
        let set = prop::collection::vec(0..n, 1..=2 * n);
        (Just(n), prop::collection::vec(set, 0..40))
    })
}

proptest! {
    #[test]
    fn prop_gain_invariant_holds((n, rr) in collection_strategy()) {
        let index = InvertedIndex::build(&rr, n);
        let mut greedy = GreedyCover::new(&rr, &index);
        assert_gain_invariant(&greedy, &rr, n);
        while greedy.step().is_some() {
            assert_gain_invariant(&greedy, &rr, n);
        }
    }

    #[test]
    fn prop_selection_is_deterministic((n, rr) in collection_strategy(), k in 0usize..12) {
        prop_assert_eq!(select_seeds(&rr, k, n), select_seeds(&rr, k, n));
    }

    #[test]
    fn prop_budget_prefix((n, rr) in collection_strategy(), k in 0usize..12) {
        let short = select_seeds(&rr, k, n);
        let long = select_seeds(&rr, k + 1, n);
        prop_assert!(short.len() <= k);
        prop_assert_eq!(&long[..short.len()], &short[..]);
    }

    #[test]
    fn prop_no_zero_gain_padding((n, rr) in collection_strategy(), k in 0usize..12) {
        let sel = select_seeds_with_coverage(&rr, k, n);
        // Elke seed dekt minstens één nieuwe set, dus |seeds| <= covered.
        prop_assert!(sel.seeds.len() <= sel.covered);
        prop_assert_eq!(sel.covered, coverage_of(&rr, &sel.seeds, n));
        let mut distinct = sel.seeds.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(distinct.len(), sel.seeds.len());
    }
}
