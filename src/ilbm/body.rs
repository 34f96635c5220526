//! BODY payload handling: ByteRun1 (de)compression and conversion between
//! planar bitplanes and chunky one-byte-per-pixel layout.
//!
//! ByteRun1 state resets at every output row. Letting a run spill across a
//! row boundary corrupts every following scanline, so overruns are rejected
//! instead of clamped.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::IlbmError;

// ── ByteRun1 ────────────────────────────────────────────────────────

/// Decompress a ByteRun1 stream into `rows` rows of `row_bytes` each.
///
/// Count byte `0..=127`: copy the next `n + 1` literal bytes. Count byte
/// `129..=255` (two's-complement `-127..=-1`): repeat the following byte
/// `257 - n` times. Count byte `128` is a no-op marker, skipped without
/// consuming further bytes.
pub(crate) fn unpack_byte_run(
    src: &[u8],
    row_bytes: usize,
    rows: usize,
) -> Result<Vec<u8>, IlbmError> {
    let mut out = Vec::with_capacity(row_bytes * rows);
    let mut pos = 0usize;
    for _ in 0..rows {
        let row_end = out.len() + row_bytes;
        while out.len() < row_end {
            let Some(&count) = src.get(pos) else {
                return Err(IlbmError::TruncatedInput(alloc::format!(
                    "ByteRun1 stream ended {} bytes short of a row",
                    row_end - out.len()
                )));
            };
            pos += 1;
            match count {
                0x80 => {}
                0x00..=0x7f => {
                    let n = usize::from(count) + 1;
                    if out.len() + n > row_end {
                        return Err(IlbmError::BodySizeMismatch {
                            expected: row_end,
                            actual: out.len() + n,
                        });
                    }
                    let literals = src.get(pos..pos + n).ok_or_else(|| {
                        IlbmError::TruncatedInput(alloc::format!(
                            "ByteRun1 literal run of {n} bytes past end of stream"
                        ))
                    })?;
                    out.extend_from_slice(literals);
                    pos += n;
                }
                0x81..=0xff => {
                    let n = 257 - usize::from(count);
                    if out.len() + n > row_end {
                        return Err(IlbmError::BodySizeMismatch {
                            expected: row_end,
                            actual: out.len() + n,
                        });
                    }
                    let Some(&value) = src.get(pos) else {
                        return Err(IlbmError::TruncatedInput(
                            "ByteRun1 replicate run missing its value byte".into(),
                        ));
                    };
                    pos += 1;
                    out.resize(out.len() + n, value);
                }
            }
        }
    }
    Ok(out)
}

/// Compress rows of `row_bytes` with ByteRun1, restarting at each row.
///
/// Repeats of three or more bytes become replicate runs; everything else
/// is emitted as literal runs of up to 128 bytes. The no-op marker `0x80`
/// is never produced.
pub(crate) fn pack_byte_run(src: &[u8], row_bytes: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for row in src.chunks(row_bytes) {
        pack_row(row, &mut out);
    }
    out
}

fn pack_row(row: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < row.len() {
        let value = row[i];
        let mut run = 1;
        while i + run < row.len() && row[i + run] == value && run < 128 {
            run += 1;
        }
        if run >= 3 {
            out.push((257 - run) as u8);
            out.push(value);
            i += run;
        } else {
            // Literal: extend until a run of >= 3 starts or 128 bytes.
            let start = i;
            let mut end = i;
            while end < row.len() && end - start < 128 {
                let ahead = row[end];
                let mut repeat = 1;
                while end + repeat < row.len() && row[end + repeat] == ahead && repeat < 3 {
                    repeat += 1;
                }
                if repeat >= 3 {
                    break;
                }
                end += 1;
            }
            out.push((end - start - 1) as u8);
            out.extend_from_slice(&row[start..end]);
            i = end;
        }
    }
}

// ── Planar / chunky conversion ──────────────────────────────────────

/// Deinterleave a row-interleaved planar body into one byte per pixel.
///
/// The body carries, for each scanline top to bottom, one byte-aligned row
/// per plane (plane 0 first) followed by an optional mask row. Plane `p`
/// contributes bit `p` of the pixel's color index; bit `7 - x % 8` of byte
/// `x / 8` selects the column.
pub(crate) fn planar_to_chunky(
    body: &[u8],
    width: usize,
    height: usize,
    n_planes: usize,
    has_mask: bool,
) -> Result<Vec<u8>, IlbmError> {
    let row_bytes = width.div_ceil(8);
    let rows_per_line = n_planes + usize::from(has_mask);
    let expected = row_bytes * rows_per_line * height;
    if body.len() != expected {
        return Err(IlbmError::BodySizeMismatch {
            expected,
            actual: body.len(),
        });
    }

    let mut chunky = vec![0u8; width * height];
    for y in 0..height {
        let line = y * rows_per_line * row_bytes;
        let pixels = &mut chunky[y * width..(y + 1) * width];
        for p in 0..n_planes {
            let row = &body[line + p * row_bytes..line + (p + 1) * row_bytes];
            for (x, px) in pixels.iter_mut().enumerate() {
                let bit = (row[x / 8] >> (7 - x % 8)) & 1;
                *px |= bit << p;
            }
        }
        // Mask rows are skipped; transparency is not carried into the
        // chunky buffer.
    }
    Ok(chunky)
}

/// Interleave chunky indices into `n_planes` byte-aligned bitplane rows,
/// the exact inverse of [`planar_to_chunky`] without a mask.
pub(crate) fn chunky_to_planar(
    chunky: &[u8],
    width: usize,
    height: usize,
    n_planes: usize,
) -> Vec<u8> {
    let row_bytes = width.div_ceil(8);
    let mut body = vec![0u8; row_bytes * n_planes * height];
    for y in 0..height {
        let line = y * n_planes * row_bytes;
        for p in 0..n_planes {
            let row = &mut body[line + p * row_bytes..line + (p + 1) * row_bytes];
            for x in 0..width {
                let bit = (chunky[y * width + x] >> p) & 1;
                row[x / 8] |= bit << (7 - x % 8);
            }
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_run_unpacks() {
        // Count byte 2 => 3 literal bytes.
        let out = unpack_byte_run(&[0x02, 0x41, 0x42, 0x43], 3, 1).unwrap();
        assert_eq!(out, [0x41, 0x42, 0x43]);
    }

    #[test]
    fn replicate_run_unpacks() {
        // Count byte -2 (0xFE) => 3 repeats of the next byte.
        let out = unpack_byte_run(&[0xFE, 0x41], 3, 1).unwrap();
        assert_eq!(out, [0x41, 0x41, 0x41]);
    }

    #[test]
    fn noop_marker_skipped() {
        let out = unpack_byte_run(&[0x80, 0x01, 0xAA, 0xBB, 0x80, 0x00, 0xCC], 3, 1).unwrap();
        assert_eq!(out, [0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn runs_reset_per_row() {
        // Two rows of 2, each its own stream segment.
        let out = unpack_byte_run(&[0x01, 1, 2, 0xFF, 9], 2, 2).unwrap();
        assert_eq!(out, [1, 2, 9, 9]);
    }

    #[test]
    fn run_crossing_row_boundary_rejected() {
        // 4 repeats against a 3-byte row.
        assert!(matches!(
            unpack_byte_run(&[0xFD, 0x41], 3, 1),
            Err(IlbmError::BodySizeMismatch { .. })
        ));
    }

    #[test]
    fn exhausted_stream_rejected() {
        assert!(matches!(
            unpack_byte_run(&[0x05, 0x41], 6, 1),
            Err(IlbmError::TruncatedInput(_))
        ));
        assert!(matches!(
            unpack_byte_run(&[0xFE], 3, 1),
            Err(IlbmError::TruncatedInput(_))
        ));
        assert!(matches!(
            unpack_byte_run(&[], 1, 1),
            Err(IlbmError::TruncatedInput(_))
        ));
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let row_bytes = 37;
        let mut data = vec![0u8; row_bytes * 5];
        let mut state: u32 = 0xDEAD_BEEF;
        for (i, b) in data.iter_mut().enumerate() {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            // Mix of noise and flat stretches so both run kinds appear.
            *b = if (i / 7) % 2 == 0 { 0x55 } else { state as u8 };
        }
        let packed = pack_byte_run(&data, row_bytes);
        let unpacked = unpack_byte_run(&packed, row_bytes, 5).unwrap();
        assert_eq!(unpacked, data);
    }

    #[test]
    fn pack_long_flat_run_roundtrip() {
        let data = vec![7u8; 300];
        let packed = pack_byte_run(&data, 300);
        assert!(packed.len() < 10);
        assert_eq!(unpack_byte_run(&packed, 300, 1).unwrap(), data);
    }

    #[test]
    fn deinterleave_two_planes() {
        // 2x2, indices [0, 1, 2, 3]: rows are (plane0, plane1) per line.
        let body = [0x40, 0x00, 0x40, 0xC0];
        let chunky = planar_to_chunky(&body, 2, 2, 2, false).unwrap();
        assert_eq!(chunky, [0, 1, 2, 3]);
    }

    #[test]
    fn interleave_is_inverse_of_deinterleave() {
        let width = 19; // not a multiple of 8
        let height = 7;
        let n_planes = 5;
        let mut chunky = vec![0u8; width * height];
        let mut state: u32 = 0x1234_5678;
        for px in chunky.iter_mut() {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            *px = (state >> 24) as u8 & ((1u8 << n_planes) - 1);
        }
        let planar = chunky_to_planar(&chunky, width, height, n_planes);
        let back = planar_to_chunky(&planar, width, height, n_planes, false).unwrap();
        assert_eq!(back, chunky);
    }

    #[test]
    fn mask_rows_skipped() {
        // 8x1, 1 plane + mask row. Pixel row sets pixel 0, mask row is
        // all ones and must not leak into the indices.
        let body = [0x80, 0xFF];
        let chunky = planar_to_chunky(&body, 8, 1, 1, true).unwrap();
        assert_eq!(chunky, [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn wrong_body_size_rejected() {
        assert!(matches!(
            planar_to_chunky(&[0u8; 5], 8, 2, 2, false),
            Err(IlbmError::BodySizeMismatch {
                expected: 4,
                actual: 5
            })
        ));
    }
}
