//! Integration tests for term context aggregation across span weights.

mod common;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use spanwise::error::Result;
use spanwise::index::{Term, TermContexts};
use spanwise::query::{SpanWeight, par_term_contexts, term_contexts};

use common::{FixedSpanWeight, init_logging};

fn summary(contexts: &TermContexts) -> Vec<(String, u64, usize)> {
    contexts
        .iter()
        .map(|(term, context)| (term.to_string(), context.doc_freq(), context.segment_count()))
        .collect()
}

fn sample_weights() -> Vec<Box<dyn SpanWeight>> {
    vec![
        Box::new(FixedSpanWeight::new().with("body", "cat", 0, 3)),
        Box::new(FixedSpanWeight::new().with("body", "cat", 1, 5)),
        Box::new(
            FixedSpanWeight::new()
                .with("title", "ant", 0, 2)
                .with("body", "bee", 1, 4),
        ),
        Box::new(FixedSpanWeight::new().with("body", "cat", 1, 5)),
        Box::new(
            FixedSpanWeight::new()
                .with("body", "bee", 2, 1)
                .with("body", "cat", 2, 7),
        ),
    ]
}

#[test]
fn test_scenario_two_segments_sum() -> Result<()> {
    init_logging();

    let a = FixedSpanWeight::new().with("body", "cat", 1, 3);
    let b = FixedSpanWeight::new().with("body", "cat", 2, 5);

    let ab = term_contexts([&a, &b])?;
    let ba = term_contexts([&b, &a])?;

    assert_eq!(ab.len(), 1);
    let cat = ab.get(&Term::new("body", "cat")).unwrap();
    assert_eq!(cat.doc_freq(), 8);
    assert_eq!(cat.segment_count(), 2);
    assert_eq!(ab, ba);

    Ok(())
}

#[test]
fn test_scenario_single_weight_ordering() -> Result<()> {
    init_logging();

    let c = FixedSpanWeight::new()
        .with("title", "ant", 0, 1)
        .with("body", "bee", 0, 1);
    let contexts = term_contexts([&c])?;

    let terms: Vec<&Term> = contexts.terms().collect();
    assert_eq!(terms, vec![&Term::new("body", "bee"), &Term::new("title", "ant")]);

    Ok(())
}

#[test]
fn test_ordering_independent_of_contribution_order() -> Result<()> {
    let title_first = FixedSpanWeight::new().with("title", "ant", 0, 1);
    let body_second = FixedSpanWeight::new().with("body", "bee", 0, 1);

    let contexts = term_contexts([&title_first, &body_second])?;
    let first = contexts.terms().next().unwrap();
    assert_eq!(first, &Term::new("body", "bee"));

    Ok(())
}

#[test]
fn test_order_independence_over_permutations() -> Result<()> {
    init_logging();

    let weights = sample_weights();
    let expected = term_contexts(&weights)?;
    assert_eq!(
        summary(&expected),
        vec![
            ("body:bee".to_string(), 5, 2),
            ("body:cat".to_string(), 15, 3),
            ("title:ant".to_string(), 2, 1),
        ]
    );

    let mut rng = StdRng::seed_from_u64(42);
    let mut order: Vec<usize> = (0..weights.len()).collect();
    for _ in 0..50 {
        order.shuffle(&mut rng);
        let permuted = term_contexts(order.iter().map(|&i| &*weights[i]))?;
        assert_eq!(permuted, expected, "order {order:?} changed the aggregate");
    }

    Ok(())
}

#[test]
fn test_associative_over_groupings() -> Result<()> {
    let weights = sample_weights();
    let whole = term_contexts(&weights)?;

    // Aggregate two halves separately, then merge the maps.
    for split in 0..=weights.len() {
        let mut left = term_contexts(&weights[..split])?;
        let right = term_contexts(&weights[split..])?;
        left.absorb(right);
        assert_eq!(left, whole, "split at {split}");
    }

    Ok(())
}

#[test]
fn test_same_segment_from_two_clauses_counted_once() -> Result<()> {
    let first = FixedSpanWeight::new().with("body", "cat", 0, 3);
    let second = FixedSpanWeight::new().with("body", "cat", 0, 3);

    let contexts = term_contexts([&first, &second])?;
    assert_eq!(contexts.get(&Term::new("body", "cat")).unwrap().doc_freq(), 3);

    Ok(())
}

#[test]
fn test_conflicting_states_for_one_segment_resolve_independent_of_order() -> Result<()> {
    init_logging();

    let low = FixedSpanWeight::new().with("body", "cat", 1, 3);
    let high = FixedSpanWeight::new().with("body", "cat", 1, 5);
    let other = FixedSpanWeight::new().with("body", "cat", 2, 4);

    let forward = term_contexts([&low, &high, &other])?;
    let backward = term_contexts([&other, &high, &low])?;
    assert_eq!(forward, backward);

    let cat = forward.get(&Term::new("body", "cat")).unwrap();
    assert_eq!(cat.doc_freq(), 9);
    assert_eq!(cat.segment_count(), 2);

    let weights = [low, high, other];
    assert_eq!(par_term_contexts(&weights)?, forward);

    Ok(())
}

#[test]
fn test_reaggregation_yields_independent_maps() -> Result<()> {
    let weights = sample_weights();

    let first = term_contexts(&weights)?;
    let mut second = term_contexts(&weights)?;
    assert_eq!(first, second);

    second.absorb(term_contexts([&FixedSpanWeight::new().with("body", "dog", 0, 1)])?);
    assert_ne!(first, second);
    assert!(!first.contains(&Term::new("body", "dog")));

    // The weights themselves are unaffected.
    assert_eq!(term_contexts(&weights)?, first);

    Ok(())
}

#[test]
fn test_parallel_aggregation_matches_sequential() -> Result<()> {
    init_logging();

    let weights = sample_weights();
    let mut reversed: Vec<Box<dyn SpanWeight>> = sample_weights();
    reversed.reverse();

    let sequential = term_contexts(&weights)?;
    assert_eq!(par_term_contexts(&weights)?, sequential);
    assert_eq!(par_term_contexts(&reversed)?, sequential);

    Ok(())
}
