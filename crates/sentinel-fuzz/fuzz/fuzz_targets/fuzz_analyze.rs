#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_analytics::{AnalysisConfig, RecordStore, analytics::analyze};

fuzz_target!(|data: &[u8]| {
    // Any collection that validates must analyze without panicking
    if let Ok(store) = std::str::from_utf8(data).map(RecordStore::from_json_str) {
        if let Ok(store) = store {
            let report = analyze(store.papers(), &AnalysisConfig::for_testing());
            assert_eq!(report.basic.total_papers, store.len());
        }
    }
});
