#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_analytics::RecordStore;

fuzz_target!(|data: &[u8]| {
    // Validation must reject bad records with an error, never a panic
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = RecordStore::from_json_str(text);
    }
});
