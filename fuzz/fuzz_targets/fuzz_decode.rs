#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Full pipeline — must never panic
    let _ = zenilbm::decode(data);

    // Probe and raw chunk-tree paths — must never panic
    let _ = zenilbm::ImageInfo::from_bytes(data);
    let _ = zenilbm::parse_chunks(data);
});
