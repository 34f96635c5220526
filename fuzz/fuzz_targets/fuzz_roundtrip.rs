#![no_main]
use libfuzzer_sys::fuzz_target;

use zenilbm::{Compression, DecodeRequest, EncodeRequest};

fuzz_target!(|data: &[u8]| {
    // Treat the input as chunky indices for a fixed-width image; the
    // encoded FORM must decode back to the same indices.
    const WIDTH: usize = 31;
    let height = data.len() / WIDTH;
    if height == 0 || height > u16::MAX as usize {
        return;
    }
    let pixels = &data[..WIDTH * height];

    for compression in [Compression::None, Compression::ByteRun1] {
        let encoded = EncodeRequest::pbm()
            .with_compression(compression)
            .encode(pixels, WIDTH as u32, height as u32)
            .unwrap();
        let parts = DecodeRequest::new(&encoded).decode_full().unwrap();
        assert_eq!(parts.chunky, pixels);
    }
});
