#![no_main]

use collage_engine::engine::{decode_image, InputLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let _ = decode_image(data, &InputLimits::strict());
});
