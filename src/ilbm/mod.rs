//! ILBM decoder: walks a parsed FORM tree, validates the bitmap header and
//! color map, decompresses the body, and produces one color index byte per
//! pixel.
//!
//! Follows the conventions of the IFF ILBM family: the first
//! `BMHD`/`CMAP`/`BODY` in the top-level FORM wins, `ILBM` bodies are
//! bit-plane interleaved, and `PBM `/`ACBM` bodies already hold chunky
//! indices.

mod body;
mod header;

pub use header::{BitMapHeader, ColorMap, ColorRegister, Compression, Masking};

pub(crate) use body::{chunky_to_planar, pack_byte_run};
pub(crate) use header::BMHD_SIZE;

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::chunk::{Chunk, ChunkId};
use crate::error::IlbmError;
use crate::limits::Limits;

/// How pixel data is laid out in the FORM body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    /// `ILBM`: bit-plane interleaved rows.
    Ilbm,
    /// `PBM `: one byte per pixel.
    Pbm,
    /// `ACBM`: one byte per pixel (carried unconverted).
    Acbm,
}

impl FormKind {
    pub(crate) fn from_id(id: ChunkId) -> Result<Self, IlbmError> {
        match id {
            ChunkId::ILBM => Ok(Self::Ilbm),
            ChunkId::PBM => Ok(Self::Pbm),
            ChunkId::ACBM => Ok(Self::Acbm),
            other => Err(IlbmError::UnsupportedFormat(alloc::format!(
                "form type '{other}'"
            ))),
        }
    }

    pub(crate) fn id(self) -> ChunkId {
        match self {
            Self::Ilbm => ChunkId::ILBM,
            Self::Pbm => ChunkId::PBM,
            Self::Acbm => ChunkId::ACBM,
        }
    }
}

/// Decode a parsed FORM into header, color map, and chunky pixel indices.
pub(crate) fn decode_form(
    form: &Chunk<'_>,
    limits: Option<&Limits>,
) -> Result<(BitMapHeader, ColorMap, Vec<u8>), IlbmError> {
    let kind = match form {
        Chunk::Container { form_type, .. } => FormKind::from_id(*form_type)?,
        Chunk::Leaf { id, .. } => return Err(IlbmError::MalformedHeader(*id)),
    };

    let bmhd = form.find(ChunkId::BMHD).ok_or(IlbmError::MissingHeader)?;
    let header = BitMapHeader::parse(bmhd)?;

    let width = u32::from(header.width);
    let height = u32::from(header.height);
    let rgba_bytes = usize::from(header.width)
        .checked_mul(usize::from(header.height))
        .and_then(|px| px.checked_mul(4))
        .ok_or(IlbmError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_output(rgba_bytes)?;
    }

    let cmap = form.find(ChunkId::CMAP).ok_or(IlbmError::MissingColorMap)?;
    let color_map = ColorMap::from_cmap(cmap);

    let raw_body = form.find(ChunkId::BODY).ok_or(IlbmError::MissingBody)?;
    let chunky = decode_body(raw_body, &header, kind)?;
    Ok((header, color_map, chunky))
}

/// Decompress (if needed) and convert the BODY payload to chunky indices
/// of exactly `width * height` bytes.
fn decode_body(raw: &[u8], header: &BitMapHeader, kind: FormKind) -> Result<Vec<u8>, IlbmError> {
    let width = usize::from(header.width);
    let height = usize::from(header.height);
    let has_mask = header.masking == Masking::HasMask;

    match kind {
        FormKind::Ilbm => {
            if header.n_planes == 0 || header.n_planes > 8 {
                return Err(IlbmError::UnsupportedFormat(alloc::format!(
                    "{} bitplanes",
                    header.n_planes
                )));
            }
            let n_planes = usize::from(header.n_planes);
            let rows = (n_planes + usize::from(has_mask)) * height;
            let planar: Cow<'_, [u8]> = match header.compression {
                Compression::ByteRun1 => {
                    Cow::Owned(body::unpack_byte_run(raw, header.row_bytes(), rows)?)
                }
                Compression::None => Cow::Borrowed(raw),
            };
            body::planar_to_chunky(&planar, width, height, n_planes, has_mask)
        }
        FormKind::Pbm | FormKind::Acbm => {
            let chunky = match header.compression {
                Compression::ByteRun1 => body::unpack_byte_run(raw, width, height)?,
                Compression::None => raw.to_vec(),
            };
            if chunky.len() != width * height {
                return Err(IlbmError::BodySizeMismatch {
                    expected: width * height,
                    actual: chunky.len(),
                });
            }
            Ok(chunky)
        }
    }
}
