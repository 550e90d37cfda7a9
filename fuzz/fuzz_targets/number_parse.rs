#![no_main]

use libfuzzer_sys::fuzz_target;

// Crash/hang oracle only: arbitrary bytes can't be checked for bit-exactness
// without a second, independent reference converter, but `parse_double_bytes`
// must never panic on any input, valid UTF-8 or not.
fuzz_target!(|data: &[u8]| {
    _ = fast_double_parse::parse_double_bytes(data);
});
