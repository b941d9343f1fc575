use portfolio_algorithms::portfolio::{exhaustive, greedy, memoized};
use portfolio_challenges::portfolio::samples;
use portfolio_challenges::{Challenge, Track};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_challenges(count: usize, max_items: usize) -> Vec<Challenge> {
    let mut rng = StdRng::seed_from_u64(1337);
    (0..count)
        .map(|_| {
            let track = Track {
                num_items: rng.gen_range(0..=max_items),
                budget_pct: rng.gen_range(0..=120),
            };
            Challenge::generate_instance(&rng.gen(), &track).unwrap()
        })
        .collect()
}

#[test]
fn test_projects_sample() {
    let challenge = samples::projects();
    assert_eq!(exhaustive::max_value(&challenge).unwrap(), 29);
    assert_eq!(memoized::max_value(&challenge).unwrap(), 29);

    let solution = exhaustive::solve_challenge(&challenge).unwrap();
    assert_eq!(solution.items, vec![0, 1, 2]);
    let solution = memoized::solve_challenge(&challenge).unwrap();
    assert_eq!(solution.items, vec![0, 1, 2]);
}

#[test]
fn test_greedy_failure_optimum() {
    // No two of X, Y, Z fit in 10 hours, so the best is Y on its own
    let challenge = samples::greedy_failure();
    assert_eq!(exhaustive::max_value(&challenge).unwrap(), 11);
    assert_eq!(memoized::max_value(&challenge).unwrap(), 11);

    for solution in [
        exhaustive::solve_challenge(&challenge).unwrap(),
        memoized::solve_challenge(&challenge).unwrap(),
    ] {
        assert_eq!(solution.items, vec![1]);
        assert_eq!(challenge.evaluate_total_value(&solution).unwrap(), 11);
    }

    let greedy_solution = greedy::solve_challenge(&challenge).unwrap();
    assert_eq!(challenge.evaluate_total_value(&greedy_solution).unwrap(), 6);
}

#[test]
fn test_beats_greedy_by_combining_items() {
    // greedy takes A then cannot fit B or C, B + C is worth more
    let challenge = Challenge::from_tuples(&[("A", 12, 6), ("B", 9, 5), ("C", 9, 5)], 10).unwrap();
    let greedy_solution = greedy::solve_challenge(&challenge).unwrap();
    assert_eq!(challenge.evaluate_total_value(&greedy_solution).unwrap(), 12);

    assert_eq!(exhaustive::max_value(&challenge).unwrap(), 18);
    let solution = memoized::solve_challenge(&challenge).unwrap();
    assert_eq!(solution.items, vec![1, 2]);
}

#[test]
fn test_empty_items() {
    let challenge = Challenge::new(Vec::new(), 25);
    assert_eq!(exhaustive::max_value(&challenge).unwrap(), 0);
    assert_eq!(memoized::max_value(&challenge).unwrap(), 0);
    assert!(exhaustive::solve_challenge(&challenge).unwrap().items.is_empty());
    assert!(memoized::solve_challenge(&challenge).unwrap().items.is_empty());
}

#[test]
fn test_zero_and_negative_budget() {
    for budget in [0, -1, -40] {
        let challenge = Challenge::from_tuples(&[("A", 5, 1), ("B", 9, 2)], budget).unwrap();
        assert_eq!(exhaustive::max_value(&challenge).unwrap(), 0);
        assert_eq!(memoized::max_value(&challenge).unwrap(), 0);
        assert!(exhaustive::solve_challenge(&challenge).unwrap().items.is_empty());
        assert!(memoized::solve_challenge(&challenge).unwrap().items.is_empty());
    }
}

#[test]
fn test_single_item() {
    let fits = Challenge::from_tuples(&[("A", 7, 3)], 3).unwrap();
    assert_eq!(exhaustive::max_value(&fits).unwrap(), 7);
    assert_eq!(memoized::solve_challenge(&fits).unwrap().items, vec![0]);
    assert_eq!(exhaustive::solve_challenge(&fits).unwrap().items, vec![0]);

    let too_big = Challenge::from_tuples(&[("A", 7, 4)], 3).unwrap();
    assert_eq!(memoized::max_value(&too_big).unwrap(), 0);
    assert!(exhaustive::solve_challenge(&too_big).unwrap().items.is_empty());
    assert!(memoized::solve_challenge(&too_big).unwrap().items.is_empty());
}

#[test]
fn test_exhaustive_and_memoized_agree() {
    for challenge in random_challenges(200, 14) {
        let exhaustive_solution = exhaustive::solve_challenge(&challenge).unwrap();
        let memoized_solution = memoized::solve_challenge(&challenge).unwrap();
        let optimum = exhaustive::max_value(&challenge).unwrap();

        assert_eq!(memoized::max_value(&challenge).unwrap(), optimum);
        assert_eq!(
            challenge.evaluate_total_value(&exhaustive_solution).unwrap(),
            optimum
        );
        assert_eq!(
            challenge.evaluate_total_value(&memoized_solution).unwrap(),
            optimum
        );
        // both leave an item out on ties, so they settle on the same subset
        assert_eq!(exhaustive_solution, memoized_solution);
    }
}

#[test]
fn test_greedy_is_feasible_and_never_beats_optimum() {
    for challenge in random_challenges(200, 14) {
        let greedy_solution = greedy::solve_challenge(&challenge).unwrap();
        let greedy_value = challenge.evaluate_total_value(&greedy_solution).unwrap();
        assert!(greedy_value <= exhaustive::max_value(&challenge).unwrap());
    }
}

#[test]
fn test_optimum_is_monotone_in_budget() {
    let items = [
        ("A", 12, 4),
        ("B", 10, 3),
        ("C", 7, 2),
        ("D", 4, 3),
        ("E", 15, 7),
        ("F", 1, 1),
    ];
    let mut previous = 0;
    for budget in -2..=25 {
        let challenge = Challenge::from_tuples(&items, budget).unwrap();
        let optimum = memoized::max_value(&challenge).unwrap();
        assert_eq!(optimum, exhaustive::max_value(&challenge).unwrap());
        assert!(optimum >= previous, "budget {} lowered the optimum", budget);
        previous = optimum;
    }
    assert_eq!(previous, 49);
}

#[test]
fn test_memoized_handles_many_items() {
    let track = Track {
        num_items: 1000,
        budget_pct: 5,
    };
    let challenge = Challenge::generate_instance(&[42u8; 32], &track).unwrap();
    let solution = memoized::solve_challenge(&challenge).unwrap();
    let value = challenge.evaluate_total_value(&solution).unwrap();
    assert_eq!(value, memoized::max_value(&challenge).unwrap());

    let greedy_solution = greedy::solve_challenge(&challenge).unwrap();
    assert!(challenge.evaluate_total_value(&greedy_solution).unwrap() <= value);
}

#[test]
fn test_memo_is_built_per_call() {
    let challenge = samples::projects();
    let (first, first_stats) = memoized::solve_with_stats(&challenge).unwrap();
    let (second, second_stats) = memoized::solve_with_stats(&challenge).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_stats, second_stats);
    assert_eq!(first_stats.table_size, 5 * 11);
    assert!(first_stats.states <= first_stats.table_size);

    // a smaller budget right after must not reuse the earlier results
    let tighter = Challenge::from_tuples(
        &[
            ("Project A", 12, 4),
            ("Project B", 10, 3),
            ("Project C", 7, 2),
            ("Project D", 4, 3),
        ],
        5,
    )
    .unwrap();
    assert_eq!(memoized::max_value(&tighter).unwrap(), 17);
}

#[test]
fn test_memoized_large_costs_use_sparse_cache() {
    // a dense table here would need 10^9 + 1 entries per item
    let challenge = Challenge::from_tuples(&[("A", 7, 1_000_000_000)], 1_000_000_000).unwrap();
    assert_eq!(exhaustive::max_value(&challenge).unwrap(), 7);
    assert_eq!(memoized::max_value(&challenge).unwrap(), 7);

    let (solution, stats) = memoized::solve_with_stats(&challenge).unwrap();
    assert_eq!(solution.items, vec![0]);
    assert_eq!(stats.table_size, stats.states);
    assert!(stats.table_size < memoized::MAX_DENSE_ENTRIES);
}

#[test]
fn test_sparse_cache_matches_exhaustive() {
    let challenge = Challenge::from_tuples(
        &[
            ("A", 60, 400_000_000),
            ("B", 50, 300_000_000),
            ("C", 45, 350_000_000),
            ("D", 10, 100_000_000),
            ("E", 80, 700_000_000),
        ],
        1_000_000_000,
    )
    .unwrap();
    let optimum = exhaustive::max_value(&challenge).unwrap();
    assert_eq!(optimum, 130);
    assert_eq!(memoized::max_value(&challenge).unwrap(), optimum);
    assert_eq!(
        memoized::solve_challenge(&challenge).unwrap(),
        exhaustive::solve_challenge(&challenge).unwrap()
    );
}
