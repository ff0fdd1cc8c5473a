//! End-to-end checks on small hand-written instances.

use kcmc_heur::error::InvalidInstanceError;
use kcmc_heur::evaluator::{evaluate, EvaluationRecord};
use kcmc_heur::flow::KCoverage;
use kcmc_heur::ga::{best_of, create, from_active, ReportConfig};
use kcmc_heur::instance::Instance;
use kcmc_heur::KcmcError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

const SCENARIO: &str = "KCMC;2 3 1;10 5 5;42;PI;0 0;0 1;1 2;II;0 1;IS;1 0;END";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn scenario_coverage_counts() {
    let inst: Instance = SCENARIO.parse().unwrap();
    assert_eq!(inst.serialize(), SCENARIO);

    let coverage = inst.coverage(&BTreeSet::new());
    assert_eq!(coverage.counts, vec![2, 1]);
    assert_eq!(coverage.nonzero, 2);

    let inactive = BTreeSet::from([2]);
    assert_eq!(
        inst.fast_k_coverage(1, &inactive),
        KCoverage::Deficient {
            poi: 1,
            coverage: 0
        }
    );
    assert_eq!(inst.coverage(&inactive).counts, vec![2, 0]);
}

#[test]
fn scenario_validation_modes() {
    init_tracing();
    let inst: Instance = SCENARIO.parse().unwrap();
    let none = BTreeSet::new();

    // sensor 2 covers POI 1 but has no route to the sink
    assert!(!inst.is_valid(1, 1, &none).unwrap());
    assert_eq!(
        inst.validate(1, 1, &none).unwrap_err(),
        KcmcError::InvalidInstance(InvalidInstanceError::InsufficientConnectivity {
            poi: 1,
            paths: 0,
            m: 1
        })
    );
    assert!(inst.is_valid(1, 0, &none).unwrap());
    assert!(evaluate(&inst, 1, 1).is_err());
}

#[test]
fn evaluator_lines_on_feasible_instance() {
    init_tracing();
    let text = "KCMC;2 4 1;10 5 5;7;PI;0 0;0 1;1 2;II;0 1;2 3;IS;1 0;3 0;END";
    let inst: Instance = text.parse().unwrap();
    let records = evaluate(&inst, 1, 1).unwrap();
    let lines: Vec<String> = records.iter().map(ToString::to_string).collect();

    assert_eq!(lines.len(), 3);
    let fields: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(fields[0], "2 4 1;10 5 5;7");
    assert_eq!(&fields[1..4], &["1", "1", "dinic"]);
    assert_eq!(fields[5], "OK");
    assert!(lines[1].contains("\tmin_flood_2\t"));
    assert!(lines[2].contains("\tmax_flood_"));

    for (line, record) in lines.iter().zip(&records) {
        let parsed: EvaluationRecord = line.parse().unwrap();
        assert_eq!(parsed.operation, record.operation);
        assert_eq!(parsed.solution, record.solution);
        assert_eq!(parsed.to_string(), *line);
    }
}

#[test]
fn ga_round_over_instance() {
    init_tracing();
    let inst: Instance = SCENARIO.parse().unwrap();
    let n = inst.num_sensors();
    let mut rng = StdRng::seed_from_u64(5);

    let mut population: Vec<_> = (0..6).map(|_| create(0.5, n, &mut rng).0).collect();
    population.push(from_active(&BTreeSet::from([0, 1, 2]), n));
    let fitness: Vec<f64> = population
        .iter()
        .map(|c| c.iter().filter(|&&g| g == 0).count() as f64 + 1.0)
        .collect();

    let config = ReportConfig::default();
    let best = best_of(&population, &fitness, 0, usize::MAX, &config);
    let record = best.record.unwrap();
    assert!(record.header);
    assert_eq!(record.used, best.used);
    assert_eq!(best.used + best.unused.len(), n);
}
