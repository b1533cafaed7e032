#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_analytics::{FilterCriteria, Paper, analytics::filter_papers};

fuzz_target!(|data: &[u8]| {
    if let Ok(criteria) = serde_json::from_slice::<FilterCriteria>(data) {
        let papers = [
            Paper::new(1, "Graph Algorithms", &["Ada", "Bob"], 2020, "ICML", 10),
            Paper::new(2, "Vision", &["Carol"], 2022, "CVPR", 0),
        ];
        // Filtering is idempotent whenever the criteria are accepted
        if let Ok(once) = filter_papers(&papers, &criteria) {
            let twice = filter_papers(&once, &criteria).expect("criteria already validated");
            assert_eq!(once, twice);
        }
        let _ = criteria.canonical_key();
    }
});
