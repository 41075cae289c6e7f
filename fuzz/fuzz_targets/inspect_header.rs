#![no_main]

use collage_engine::engine::{decode_image, inspect, InputLimits};
use collage_engine::ErrorCategory;
use libfuzzer_sys::fuzz_target;

// The header must agree with the decoder, and anything the header says is
// over the strict budget must be refused before pixels are decoded.
fuzz_target!(|data: &[u8]| {
    let limits = InputLimits::strict();
    let header = inspect(data);
    let decoded = decode_image(data, &limits);

    match (header, decoded) {
        (Ok(info), Ok(img)) => {
            assert_eq!((img.width(), img.height()), (info.width, info.height));
            assert!(limits.enforce_pixels(info.width, info.height).is_ok());
        }
        (Ok(info), Err(err)) => {
            if limits.enforce_pixels(info.width, info.height).is_err() {
                assert_eq!(err.category(), ErrorCategory::ResourceLimit);
            }
        }
        (Err(_), decoded) => assert!(decoded.is_err()),
    }
});
