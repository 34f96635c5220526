//! IFF writer: assembles well-formed `FORM` files that this crate's own
//! decoder round-trips.

use alloc::vec::Vec;

use crate::chunk::ChunkId;
use crate::error::IlbmError;
use crate::ilbm::{chunky_to_planar, pack_byte_run, ColorMap, Compression, FormKind, BMHD_SIZE};

/// Builder for writing a single IFF image.
///
/// [`pbm`](Self::pbm) writes the pixel bytes as-is (one color index per
/// pixel); [`ilbm`](Self::ilbm) packs the indices into byte-aligned
/// bitplane rows first. Without a caller-supplied palette a grayscale ramp
/// CMAP is written, matching what the index value then renders as.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a> {
    kind: FormKind,
    n_planes: u8,
    compression: Compression,
    color_map: Option<&'a ColorMap>,
}

impl<'a> EncodeRequest<'a> {
    /// Chunky `PBM ` form, 8 planes.
    pub fn pbm() -> Self {
        Self {
            kind: FormKind::Pbm,
            n_planes: 8,
            compression: Compression::None,
            color_map: None,
        }
    }

    /// Planar `ILBM` form with `n_planes` bitplanes (1..=8).
    pub fn ilbm(n_planes: u8) -> Self {
        Self {
            kind: FormKind::Ilbm,
            n_planes,
            compression: Compression::None,
            color_map: None,
        }
    }

    /// Compress the BODY with per-row ByteRun1.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Write this palette instead of the grayscale ramp.
    pub fn with_color_map(mut self, color_map: &'a ColorMap) -> Self {
        self.color_map = Some(color_map);
        self
    }

    /// Encode `pixels` (one color index byte per pixel, rows top to
    /// bottom) into a complete FORM byte buffer.
    pub fn encode(self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, IlbmError> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(IlbmError::DimensionsTooLarge { width, height });
        };
        if self.n_planes == 0 || self.n_planes > 8 {
            return Err(IlbmError::InvalidInput(alloc::format!(
                "{} bitplanes, expected 1..=8",
                self.n_planes
            )));
        }
        let pixel_count = usize::from(w) * usize::from(h);
        if pixels.len() != pixel_count {
            return Err(IlbmError::InvalidInput(alloc::format!(
                "expected {pixel_count} index bytes, got {}",
                pixels.len()
            )));
        }
        if self.kind == FormKind::Ilbm
            && self.n_planes < 8
            && pixels.iter().any(|&p| p >> self.n_planes != 0)
        {
            return Err(IlbmError::InvalidInput(alloc::format!(
                "color index wider than {} planes",
                self.n_planes
            )));
        }

        let (body, row_bytes) = match self.kind {
            FormKind::Ilbm => (
                chunky_to_planar(pixels, w.into(), h.into(), self.n_planes.into()),
                usize::from(w).div_ceil(8),
            ),
            FormKind::Pbm | FormKind::Acbm => (pixels.to_vec(), usize::from(w)),
        };
        let body = match self.compression {
            Compression::ByteRun1 => pack_byte_run(&body, row_bytes),
            Compression::None => body,
        };

        let ramp;
        let color_map = match self.color_map {
            Some(cm) => cm,
            None => {
                ramp = ColorMap::grayscale(self.n_planes);
                &ramp
            }
        };

        let mut out = Vec::with_capacity(12 + BMHD_SIZE + color_map.len() * 3 + body.len() + 24);
        out.extend_from_slice(&ChunkId::FORM.0);
        out.extend_from_slice(&[0; 4]); // patched once the length is known
        out.extend_from_slice(&self.kind.id().0);
        push_chunk(&mut out, ChunkId::BMHD, &self.bmhd_bytes(w, h));
        push_chunk(&mut out, ChunkId::CMAP, &color_map.to_cmap_bytes());
        push_chunk(&mut out, ChunkId::BODY, &body);
        let form_len = (out.len() - 8) as u32;
        out[4..8].copy_from_slice(&form_len.to_be_bytes());
        Ok(out)
    }

    fn bmhd_bytes(&self, w: u16, h: u16) -> [u8; BMHD_SIZE] {
        let mut bmhd = [0u8; BMHD_SIZE];
        bmhd[0..2].copy_from_slice(&w.to_be_bytes());
        bmhd[2..4].copy_from_slice(&h.to_be_bytes());
        bmhd[8] = self.n_planes;
        // masking off, pad byte zero, transparent color 0
        bmhd[10] = self.compression.to_u8();
        bmhd[14] = 1; // square pixels
        bmhd[15] = 1;
        bmhd[16..18].copy_from_slice(&w.to_be_bytes());
        bmhd[18..20].copy_from_slice(&h.to_be_bytes());
        bmhd
    }
}

fn push_chunk(out: &mut Vec<u8>, id: ChunkId, payload: &[u8]) {
    out.extend_from_slice(&id.0);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}
