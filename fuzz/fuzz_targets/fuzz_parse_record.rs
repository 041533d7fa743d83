#![no_main]
use libfuzzer_sys::fuzz_target;
use record_diff::pipeline::{parse_record_str, RecordFormat};

/// Fuzz record parsing, flattening and self-comparison.
///
/// Any input that parses as YAML is flattened and diffed against itself,
/// which must always produce an empty report.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_record_str(s, RecordFormat::Json);
        if let Ok(record) = parse_record_str(s, RecordFormat::Yaml) {
            let flat = record_diff::flatten(&record);
            assert_eq!(flat.len(), record_diff::leaf_count(&record));
            if let Ok(result) = record_diff::DiffEngine::new().compare(&record, &record) {
                assert!(!result.has_changes());
            }
        }
    }
});
