#![no_main]
use libfuzzer_sys::fuzz_target;
use record_diff::diff::{classify, DiffReport};

/// Fuzz classification of externally supplied diff reports.
fuzz_target!(|data: &[u8]| {
    if let Ok(report) = serde_json::from_slice::<DiffReport>(data) {
        let _ = classify(&report);
    }
});
