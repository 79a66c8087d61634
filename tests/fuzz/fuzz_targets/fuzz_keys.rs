#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Key parsing must not panic on any input.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = covset::keys::parse_fields(s);
        let _ = covset::keys::ConditionKey::parse(s);
        let _ = covset::keys::BranchKey::parse(s);
    }
});
