//! IFF chunk reader.
//!
//! Parses an in-memory byte buffer into a tree of typed chunks: `FORM`
//! containers carrying a form-type tag and ordered children, and leaf
//! chunks borrowing their payload from the input (zero-copy). Tags and
//! lengths are big-endian per EA IFF-85, and a chunk with an odd declared
//! length is followed by one pad byte that is not counted in the length.
//!
//! Unrecognized leaf tags are retained as opaque chunks rather than
//! rejected, so files carrying `CRNG`, `CAMG`, `ANNO` and friends still
//! parse.

use alloc::vec::Vec;
use core::fmt;

use crate::error::IlbmError;

// ── Chunk identifiers ───────────────────────────────────────────────

/// A 4-byte ASCII chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const FORM: ChunkId = ChunkId(*b"FORM");
    pub const ILBM: ChunkId = ChunkId(*b"ILBM");
    pub const PBM: ChunkId = ChunkId(*b"PBM ");
    pub const ACBM: ChunkId = ChunkId(*b"ACBM");
    pub const BMHD: ChunkId = ChunkId(*b"BMHD");
    pub const CMAP: ChunkId = ChunkId(*b"CMAP");
    pub const BODY: ChunkId = ChunkId(*b"BODY");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if (0x20..=0x7e).contains(&b) {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({self})")
    }
}

// ── Chunk tree ──────────────────────────────────────────────────────

/// A node in the IFF tree. Leaf payloads borrow from the input buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunk<'a> {
    Leaf {
        id: ChunkId,
        data: &'a [u8],
    },
    Container {
        form_type: ChunkId,
        children: Vec<Chunk<'a>>,
    },
}

impl<'a> Chunk<'a> {
    /// Payload of the first direct child leaf with the given id, if any.
    pub fn find(&self, id: ChunkId) -> Option<&'a [u8]> {
        match self {
            Chunk::Container { children, .. } => children.iter().find_map(|c| match c {
                Chunk::Leaf { id: child_id, data } if *child_id == id => Some(*data),
                _ => None,
            }),
            Chunk::Leaf { .. } => None,
        }
    }

    /// Form-type tag, for container chunks.
    pub fn form_type(&self) -> Option<ChunkId> {
        match self {
            Chunk::Container { form_type, .. } => Some(*form_type),
            Chunk::Leaf { .. } => None,
        }
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], IlbmError> {
        if self.remaining() < n {
            return Err(IlbmError::TruncatedInput(alloc::format!(
                "{what}: need {n} bytes, {} remain",
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn id(&mut self, what: &str) -> Result<ChunkId, IlbmError> {
        let b = self.take(4, what)?;
        Ok(ChunkId([b[0], b[1], b[2], b[3]]))
    }

    fn be_u32(&mut self, what: &str) -> Result<u32, IlbmError> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Skip the pad byte after an odd-length chunk. A pad missing at the
    /// very end of the input is tolerated.
    fn skip_pad(&mut self) {
        if self.remaining() > 0 {
            self.pos += 1;
        }
    }
}

/// Parse a complete IFF byte buffer into its chunk tree.
///
/// The outermost chunk must be a `FORM`; anything else fails with
/// [`IlbmError::MalformedHeader`]. Declared lengths that exceed the bytes
/// actually present fail with [`IlbmError::TruncatedInput`].
pub fn parse(data: &[u8]) -> Result<Chunk<'_>, IlbmError> {
    let mut r = Reader::new(data);
    let id = r.id("chunk id")?;
    if id != ChunkId::FORM {
        return Err(IlbmError::MalformedHeader(id));
    }
    let len = r.be_u32("chunk length")? as usize;
    let payload = r.take(len, "FORM payload")?;
    parse_form(payload)
}

fn parse_form(payload: &[u8]) -> Result<Chunk<'_>, IlbmError> {
    let mut r = Reader::new(payload);
    let form_type = r.id("form type")?;
    let mut children = Vec::new();
    while r.remaining() > 0 {
        children.push(parse_child(&mut r)?);
    }
    Ok(Chunk::Container {
        form_type,
        children,
    })
}

fn parse_child<'a>(r: &mut Reader<'a>) -> Result<Chunk<'a>, IlbmError> {
    let id = r.id("chunk id")?;
    let len = r.be_u32("chunk length")? as usize;
    let chunk = if id == ChunkId::FORM {
        let payload = r.take(len, "nested FORM payload")?;
        parse_form(payload)?
    } else {
        let data = r.take(len, "chunk payload")?;
        Chunk::Leaf { id, data }
    };
    if len % 2 == 1 {
        r.skip_pad();
    }
    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn raw_chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    fn raw_form(form_type: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(form_type);
        payload.extend_from_slice(body);
        let mut out = Vec::new();
        out.extend_from_slice(b"FORM");
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&payload);
        out
    }

    #[test]
    fn leaf_and_container_roundtrip() {
        let mut body = raw_chunk(b"BMHD", &[1, 2, 3, 4]);
        body.extend_from_slice(&raw_chunk(b"BODY", &[9, 9]));
        let data = raw_form(b"ILBM", &body);

        let form = parse(&data).unwrap();
        assert_eq!(form.form_type(), Some(ChunkId::ILBM));
        assert_eq!(form.find(ChunkId::BMHD), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(form.find(ChunkId::BODY), Some(&[9u8, 9][..]));
        assert_eq!(form.find(ChunkId::CMAP), None);
    }

    #[test]
    fn odd_length_pads_between_siblings() {
        let mut body = raw_chunk(b"CMAP", &[10, 20, 30]); // 3 bytes, padded
        body.extend_from_slice(&raw_chunk(b"BODY", &[7]));
        let data = raw_form(b"PBM ", &body);

        let form = parse(&data).unwrap();
        assert_eq!(form.find(ChunkId::CMAP), Some(&[10u8, 20, 30][..]));
        assert_eq!(form.find(ChunkId::BODY), Some(&[7u8][..]));
    }

    #[test]
    fn missing_final_pad_tolerated() {
        // Last chunk has odd length and no trailing pad byte.
        let mut payload = Vec::new();
        payload.extend_from_slice(b"ILBM");
        payload.extend_from_slice(b"BODY");
        payload.extend_from_slice(&3u32.to_be_bytes());
        payload.extend_from_slice(&[1, 2, 3]);
        let mut data = Vec::new();
        data.extend_from_slice(b"FORM");
        data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        data.extend_from_slice(&payload);

        let form = parse(&data).unwrap();
        assert_eq!(form.find(ChunkId::BODY), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn unrecognized_leaf_retained() {
        let body = raw_chunk(b"CRNG", &[0; 8]);
        let data = raw_form(b"ILBM", &body);

        let form = parse(&data).unwrap();
        let Chunk::Container { children, .. } = &form else {
            panic!("expected container");
        };
        assert!(matches!(
            children[0],
            Chunk::Leaf { id: ChunkId(tag), .. } if &tag == b"CRNG"
        ));
    }

    #[test]
    fn nested_form_parses_recursively() {
        let inner = raw_form(b"ILBM", &raw_chunk(b"BMHD", &[0; 20]));
        let data = raw_form(b"ILBM", &inner);

        let form = parse(&data).unwrap();
        let Chunk::Container { children, .. } = &form else {
            panic!("expected container");
        };
        assert_eq!(children[0].form_type(), Some(ChunkId::ILBM));
    }

    #[test]
    fn outer_non_form_rejected() {
        let data = raw_chunk(b"LIST", &[0; 4]);
        match parse(&data) {
            Err(IlbmError::MalformedHeader(id)) => assert_eq!(id, ChunkId(*b"LIST")),
            other => panic!("expected MalformedHeader, got {other:?}"),
        }
    }

    #[test]
    fn declared_length_past_eof_rejected() {
        let mut data = vec![];
        data.extend_from_slice(b"FORM");
        data.extend_from_slice(&100u32.to_be_bytes());
        data.extend_from_slice(b"ILBM");
        assert!(matches!(parse(&data), Err(IlbmError::TruncatedInput(_))));
    }

    #[test]
    fn child_length_past_parent_rejected() {
        let mut body = Vec::new();
        body.extend_from_slice(b"BODY");
        body.extend_from_slice(&50u32.to_be_bytes()); // claims 50, has 2
        body.extend_from_slice(&[1, 2]);
        let data = raw_form(b"ILBM", &body);
        assert!(matches!(parse(&data), Err(IlbmError::TruncatedInput(_))));
    }

    #[test]
    fn empty_input_is_truncated() {
        assert!(matches!(parse(&[]), Err(IlbmError::TruncatedInput(_))));
    }
}
