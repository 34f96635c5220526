//! Fixed-format diagnostic hexdump.

use alloc::string::String;
use core::fmt::Write;

/// Format `data` 16 bytes per line: an 8-hex-digit offset, two spaces,
/// space-separated hex byte pairs with an extra space after the 8th byte,
/// right-padded to 49 columns, then ` |ascii|` where non-printable bytes
/// render as `.`.
///
/// The layout is a fixed textual contract; consumers line up columns
/// across dumps, so the padding never varies with content.
pub fn hexdump(data: &[u8]) -> String {
    let mut out = String::new();
    for (i, row) in data.chunks(16).enumerate() {
        let _ = write!(out, "{:08x}  ", i * 16);

        let mut hex = String::new();
        for (col, byte) in row.iter().enumerate() {
            if col > 0 {
                hex.push(' ');
                if col == 8 {
                    hex.push(' ');
                }
            }
            let _ = write!(hex, "{byte:02x}");
        }
        while hex.len() < 49 {
            hex.push(' ');
        }
        out.push_str(&hex);

        out.push_str(" |");
        for &byte in row {
            out.push(if (0x20..=0x7e).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_row_layout() {
        let data: alloc::vec::Vec<u8> = (0..16).collect();
        assert_eq!(
            hexdump(&data),
            "00000000  00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f  |................|\n"
        );
    }

    #[test]
    fn short_row_padded_to_column() {
        assert_eq!(
            hexdump(b"Hi"),
            "00000000  48 69                                             |Hi|\n"
        );
    }

    #[test]
    fn printable_gutter_and_offsets() {
        let mut data = [b'A'; 20];
        data[17] = 0x00;
        let dump = hexdump(&data);
        let mut lines = dump.lines();
        let first = lines.next().unwrap();
        let second = lines.next().unwrap();
        assert!(first.starts_with("00000000  41 41"));
        assert!(first.ends_with("|AAAAAAAAAAAAAAAA|"));
        assert!(second.starts_with("00000010  41 00 41 41"));
        assert!(second.ends_with("|A.AA|"));
    }

    #[test]
    fn empty_input_empty_dump() {
        assert_eq!(hexdump(&[]), "");
    }
}
