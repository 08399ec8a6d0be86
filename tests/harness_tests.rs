mod common;

use common::{eval_params, toy_split};
use evobench::config::Algorithm;
use evobench::sweep::{BenchmarkHarness, Combination, ResultSink, LOG_HEADER};
use std::fs;

fn combination(n_generations: usize, repeats: usize) -> Combination {
    Combination {
        n_generations,
        population_size: 8,
        crossover_prob: 0.8,
        mutation_prob: 0.9,
        mutation_radius: 0.2,
        selection_pressure: 0.3,
        repeats,
    }
}

#[test]
fn every_combination_reaches_the_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let harness = BenchmarkHarness::new(
        toy_split(),
        eval_params(Algorithm::Ga),
        ResultSink::new(&path),
    );

    let grid = vec![combination(2, 2), combination(3, 1)];
    let outcome = harness.run(&grid).unwrap();

    assert_eq!(outcome.completed, 3);
    assert!(outcome.failures.is_empty());

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], LOG_HEADER);
    assert_eq!(lines.len(), 4);

    // n_generations is the second column and distinguishes the two units.
    let with_two = lines[1..].iter().filter(|l| l.contains(",2,8,")).count();
    let with_three = lines[1..].iter().filter(|l| l.contains(",3,8,")).count();
    assert_eq!(with_two, 2);
    assert_eq!(with_three, 1);
}

#[test]
fn empty_grid_writes_only_the_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let harness = BenchmarkHarness::new(
        toy_split(),
        eval_params(Algorithm::Ga),
        ResultSink::new(&path),
    );

    let outcome = harness.run(&[]).unwrap();
    assert_eq!(outcome.completed, 0);
    assert!(outcome.failures.is_empty());

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, format!("{}\n", LOG_HEADER));
}

#[test]
fn a_failing_unit_does_not_take_down_its_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let harness = BenchmarkHarness::new(
        toy_split(),
        eval_params(Algorithm::Ga),
        ResultSink::new(&path),
    );

    let mut broken = combination(2, 1);
    broken.population_size = 0;
    let grid = vec![broken, combination(2, 2)];

    let outcome = harness.run(&grid).unwrap();
    assert_eq!(outcome.completed, 2);
    assert_eq!(outcome.failures.len(), 1);

    let failure = &outcome.failures[0];
    assert_eq!(failure.combination.population_size, 0);
    assert_eq!(failure.repeat, 0);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn reruns_of_the_same_grid_log_the_same_results() {
    let dir = tempfile::tempdir().unwrap();
    let grid = vec![combination(2, 2), combination(3, 1)];

    let mut runs = Vec::new();
    for name in ["a.csv", "b.csv"] {
        let path = dir.path().join(name);
        let harness = BenchmarkHarness::new(
            toy_split(),
            eval_params(Algorithm::Ga),
            ResultSink::new(&path),
        );
        harness.run(&grid).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Dispatch order varies with the pool, so compare as a sorted multiset
        // with the wall-clock column stripped.
        let mut lines: Vec<String> = content
            .lines()
            .skip(1)
            .map(|l| l.rsplit_once(',').unwrap().0.to_string())
            .collect();
        lines.sort();
        runs.push(lines);
    }

    assert_eq!(runs[0], runs[1]);
}
