//! Decode pipeline front door: chunk reader → ILBM decoder → raster
//! composer, one synchronous call with no internal suspension points.

use alloc::vec::Vec;

use crate::chunk;
use crate::compose::compose;
use crate::error::IlbmError;
use crate::ilbm::{self, BitMapHeader, ColorMap};
use crate::image::DecodedImage;
use crate::limits::Limits;

/// Builder for a single decode call.
///
/// A call runs to completion or failure; there is no cancellation. The
/// pipeline mutates nothing after construction, so independent requests
/// may run concurrently on their own input buffers.
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Apply resource limits, checked after the BMHD parse and before any
    /// pixel allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the full pipeline and return the composed image.
    pub fn decode(self) -> Result<DecodedImage, IlbmError> {
        Ok(self.decode_full()?.image)
    }

    /// Like [`decode`](Self::decode), but also keeps the parsed header,
    /// color map, and raw chunky index buffer. The chunky buffer is what
    /// diagnostic views (see [`crate::hexdump`]) want to show.
    pub fn decode_full(self) -> Result<DecodeParts, IlbmError> {
        let form = chunk::parse(self.data)?;
        let (header, color_map, chunky) = ilbm::decode_form(&form, self.limits)?;
        let image = compose(
            &chunky,
            u32::from(header.width),
            u32::from(header.height),
            &color_map,
        );
        Ok(DecodeParts {
            image,
            header,
            color_map,
            chunky,
        })
    }
}

/// Output of [`DecodeRequest::decode_full`].
#[derive(Clone, Debug)]
pub struct DecodeParts {
    pub image: DecodedImage,
    pub header: BitMapHeader,
    pub color_map: ColorMap,
    /// One color index byte per pixel, after decompression and
    /// planar-to-chunky conversion.
    pub chunky: Vec<u8>,
}

/// Decode an in-memory IFF/ILBM file with default settings.
pub fn decode(data: &[u8]) -> Result<DecodedImage, IlbmError> {
    DecodeRequest::new(data).decode()
}
