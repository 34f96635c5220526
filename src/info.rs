use crate::chunk::{self, ChunkId};
use crate::error::IlbmError;
use crate::ilbm::{BitMapHeader, Compression, FormKind};

/// Image properties read from the FORM and first BMHD without decoding
/// pixels.
#[derive(Clone, Copy, Debug)]
pub struct ImageInfo {
    pub width: u16,
    pub height: u16,
    pub n_planes: u8,
    pub compression: Compression,
    pub kind: FormKind,
}

impl ImageInfo {
    /// Probe a byte buffer. Parses the chunk tree (zero-copy) and the
    /// first BMHD; the BODY payload is left untouched.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IlbmError> {
        let form = chunk::parse(data)?;
        let kind = match form.form_type() {
            Some(id) => FormKind::from_id(id)?,
            // parse() only yields containers; keep the error total anyway.
            None => return Err(IlbmError::MissingHeader),
        };
        let bmhd = form.find(ChunkId::BMHD).ok_or(IlbmError::MissingHeader)?;
        let header = BitMapHeader::parse(bmhd)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            n_planes: header.n_planes,
            compression: header.compression,
            kind,
        })
    }
}
