#![cfg(feature = "serde")]

use std::time::Duration;

use pathlab_search::{Algorithm, HeuristicKind, Outcome, Phases, Report, SearchConfig};

#[test]
fn config_round_trip() {
    let config = SearchConfig::default().with_max_expansions(500);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"max_expansions":500}"#);
    let back: SearchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn report_round_trip() {
    let report = Report {
        algorithm: Algorithm::AStar(HeuristicKind::GeoManhattan { inflation: 1.2 }).to_string(),
        outcome: Outcome::Found,
        phases: Phases {
            setup: Duration::from_micros(3),
            traversal: Duration::from_micros(250),
            reconstruction: Duration::from_micros(7),
        },
        elapsed: Duration::from_micros(270),
        peak_memory: 4096,
        visited: 41,
        path_len: 12,
        cost: 1834.5,
        frontier_peak: 19,
    };
    let json = serde_json::to_string(&report).unwrap();
    let back: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn algorithm_round_trip() {
    for alg in Algorithm::GEO {
        let json = serde_json::to_string(&alg).unwrap();
        let back: Algorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alg);
    }
    assert_eq!(serde_json::to_string(&Outcome::NoPath).unwrap(), r#""NoPath""#);
}
