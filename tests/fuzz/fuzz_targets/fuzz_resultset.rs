#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Deserialization and model building must not panic on any input.
    if let Ok(resultset) = covset::resultset::Resultset::from_json_slice(data) {
        let _ = covset::loader::build_models(&resultset);
    }
});
