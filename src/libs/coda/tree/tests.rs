use super::build::build;
use super::path::{best_path, leaf_paths, Segment};
use super::*;
use crate::libs::coda::params::SearchParams;
use crate::libs::coda::template::{Template, Templates};
use crate::libs::coda::NOISE;
use approx::assert_relative_eq;

// T0 spans 2 intervals and consumes 3, T1 spans 3 and consumes 4
fn templates() -> Templates {
    let mut templates = Templates::new();
    templates.insert(Template::new(0, vec![0.5, 1.0]));
    templates.insert(Template::new(1, vec![0.2, 0.4, 1.0]));
    templates
}

fn leaf(coda: i32, distance: f64, start: usize, intervals: &[f64]) -> Node {
    Node::new(0)
        .with_coda(coda, distance)
        .with_span(start, intervals)
}

#[test]
fn test_two_codas_round_trip() {
    // T0 intervals, gap, T1 intervals, gap
    let seq = [0.5, 0.5, 3.0, 0.2, 0.2, 0.6, 3.0];
    let params = SearchParams::default();

    let tree = build(&seq, &templates(), &params).unwrap();
    let best = best_path(&tree, params.extra_value).unwrap().unwrap();

    assert_eq!(best.triples(), vec![(0, 0, 3), (1, 3, 7)]);
    assert_relative_eq!(best.score, 0.0, epsilon = 1e-12);
}

#[test]
fn test_leading_noise() {
    let seq = [2.0, 0.5, 0.5];
    let params = SearchParams::default();

    let tree = build(&seq, &templates(), &params).unwrap();
    let best = best_path(&tree, params.extra_value).unwrap().unwrap();

    assert_eq!(best.triples(), vec![(NOISE, 0, 1), (0, 1, 3)]);
    assert_relative_eq!(best.score, params.extra_value, epsilon = 1e-12);
    assert_eq!(best.noise_count(), 1);

    assert_eq!(
        tree.to_string(),
        "root\n    noise [0, 1)\n        0 (0.0000) [1, 3)\n"
    );
}

#[test]
fn test_trailing_single_interval_is_noise() {
    let seq = [0.5, 0.5, 3.0, 0.7];
    let best = crate::libs::coda::segment(&seq, &templates(), &SearchParams::default())
        .unwrap()
        .unwrap();

    assert_eq!(best.triples(), vec![(0, 0, 3), (NOISE, 3, 4)]);
    assert_relative_eq!(best.score, 0.05, epsilon = 1e-12);
}

#[test]
fn test_too_short_for_any_template() {
    let tree = build(&[0.4], &templates(), &SearchParams::default()).unwrap();
    assert!(tree.is_empty());
    assert!(leaf_paths(&tree, 0.05).is_empty());
    assert_eq!(best_path(&tree, 0.05).unwrap(), None);

    let tree = build(&[], &templates(), &SearchParams::default()).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(best_path(&tree, 0.05).unwrap(), None);
}

#[test]
fn test_dead_leaf_never_wins() {
    // T0 matches at the start, nothing continues after it
    let seq = [0.5, 0.5, 3.0, 5.0, 1.0, 7.0];
    let tree = build(&seq, &templates(), &SearchParams::default()).unwrap();

    let paths = leaf_paths(&tree, 0.05);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].segments, vec![Segment::new(0, 0, 3)]);

    assert_eq!(best_path(&tree, 0.05).unwrap(), None);
}

#[test]
fn test_winning_paths_cover_the_sequence() {
    let mut templates = templates();
    templates.insert(Template::new(2, vec![0.3, 0.55, 0.75, 1.0]));

    // deterministic pseudo-random intervals
    let mut state: u64 = 42;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        0.05 + ((state >> 33) % 1000) as f64 / 1000.0
    };

    let mut found = 0;
    for len in 2..14 {
        let seq: Vec<f64> = (0..len).map(|_| next()).collect();
        for only_equal in [true, false] {
            let params = SearchParams::default()
                .with_threshold(0.4)
                .with_only_equal(only_equal);
            let tree = build(&seq, &templates, &params).unwrap();

            for path in leaf_paths(&tree, params.extra_value) {
                path.check_bounds(seq.len()).unwrap();
            }

            if let Some(best) = best_path(&tree, params.extra_value).unwrap() {
                found += 1;
                let total: usize = best.segments.iter().map(|s| s.len()).sum();
                assert_eq!(total, seq.len());
                for pair in best.segments.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
                assert!(best.score >= 0.0);
            }
        }
    }
    assert!(found > 0);
}

#[test]
fn test_repeatable() {
    let seq = [1.2, 0.5, 0.5, 3.0, 0.2, 0.2, 0.6, 3.0, 0.45, 0.55, 2.5, 0.2, 0.25];
    let params = SearchParams::default().with_threshold(0.3).with_limit(4);

    let first = build(&seq, &templates(), &params).unwrap();
    let second = build(&seq, &templates(), &params).unwrap();
    assert_eq!(first.to_string(), second.to_string());

    let a = best_path(&first, params.extra_value).unwrap();
    let b = best_path(&second, params.extra_value).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_node_budget() {
    let seq = [0.5, 0.5, 3.0, 0.2, 0.2, 0.6, 3.0];
    let params = SearchParams::default().with_max_nodes(2);

    let err = build(&seq, &templates(), &params).unwrap_err();
    assert_eq!(err, CodaError::NodeBudget(2));
}

#[test]
fn test_ties_prefer_fewer_noise() {
    let seq = [0.5, 0.5];
    let mut tree = SearchTree::new(seq.len());
    let root = tree.root();

    // noise then a short match, scoring 0.05 + 0.0
    let noise = tree.add_node(leaf(NOISE, 0.0, 0, &seq[0..1]));
    let after = tree.add_node(leaf(1, 0.0, 1, &seq[1..2]));
    tree.add_child(root, noise).unwrap();
    tree.add_child(noise, after).unwrap();

    // a single match scoring 0.05
    let whole = tree.add_node(leaf(0, 0.05, 0, &seq));
    tree.add_child(root, whole).unwrap();

    let best = best_path(&tree, 0.05).unwrap().unwrap();
    assert_eq!(best.triples(), vec![(0, 0, 2)]);
}

#[test]
fn test_lowest_score_wins() {
    let seq = [0.5, 0.5, 0.5];
    let mut tree = SearchTree::new(seq.len());
    let root = tree.root();

    let a = tree.add_node(leaf(3, 0.08, 0, &seq));
    let b = tree.add_node(leaf(4, 0.02, 0, &seq));
    let c = tree.add_node(leaf(5, 0.01, 0, &seq[..2]));
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();
    tree.add_child(root, c).unwrap();

    // c is cheapest but incomplete
    let best = best_path(&tree, 0.05).unwrap().unwrap();
    assert_eq!(best.triples(), vec![(4, 0, 3)]);
    assert_relative_eq!(best.score, 0.02);
}

#[test]
fn test_overrun_is_an_error() {
    let seq = [0.5, 0.5, 0.5, 0.5];
    let mut tree = SearchTree::new(3);
    let root = tree.root();

    let n = tree.add_node(leaf(0, 0.0, 0, &seq));
    tree.add_child(root, n).unwrap();

    assert_eq!(
        best_path(&tree, 0.05).unwrap_err(),
        CodaError::Overrun { end: 4, len: 3 }
    );
}

#[test]
fn test_tree_links() {
    let mut tree = SearchTree::new(2);
    let root = tree.root();
    let n1 = tree.add_node(leaf(0, 0.0, 0, &[0.1]));
    let n2 = tree.add_node(leaf(NOISE, 0.0, 1, &[0.1]));

    assert_eq!(tree.add_child(n1, n1), Err(CodaError::SelfReference(n1)));
    assert_eq!(tree.add_child(root, 9), Err(CodaError::NodeNotFound(9)));
    assert_eq!(tree.add_child(n1, root), Err(CodaError::NodeNotFound(root)));

    tree.add_child(root, n1).unwrap();
    tree.add_child(n1, n2).unwrap();
    assert_eq!(
        tree.add_child(root, n2),
        Err(CodaError::AlreadyAttached {
            child: n2,
            parent: n1
        })
    );

    assert!(tree.has_noise_child(n1));
    assert!(!tree.has_noise_child(root));
    assert_eq!(tree.preorder(), vec![root, n1, n2]);
    assert_eq!(tree.depth(n2), 2);
    assert_eq!(tree.get_node(n2).unwrap().parent, Some(n1));
}
