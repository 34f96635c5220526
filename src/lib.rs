//! # zenilbm
//!
//! IFF/ILBM (Amiga Interchange File Format) image decoder and encoder.
//!
//! The decode pipeline is three stages wired left to right: the chunk
//! reader parses bytes into a `FORM` tree, the ILBM decoder locates
//! `BMHD`/`CMAP`/`BODY` and produces one color index byte per pixel
//! (ByteRun1 decompression and planar-to-chunky conversion included), and
//! the raster composer maps the indices through the color map into packed
//! opaque RGBA.
//!
//! ## Supported Forms
//!
//! - **ILBM** — bit-plane-interleaved rows, 1..=8 planes, optional mask rows
//! - **PBM ** / **ACBM** — already chunky, one byte per pixel
//! - ByteRun1 or uncompressed bodies for all of the above
//!
//! ## Non-Goals
//!
//! - HAM/EHB display modes, CAMG interpretation, color cycling
//! - Deep (24-bit) ILBM
//! - Anything downstream of the RGBA buffer (rendering, PNG export)
//!
//! ## Usage
//!
//! ```no_run
//! use zenilbm::{DecodeRequest, ImageInfo};
//!
//! let data: &[u8] = &[]; // your IFF/ILBM bytes
//!
//! // Probe without decoding pixels
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.kind);
//!
//! // Decode to packed RGBA (straight alpha, always opaque)
//! let image = DecodeRequest::new(data).decode()?;
//! assert_eq!(
//!     image.rgba().len(),
//!     image.width as usize * image.height as usize * 4
//! );
//! # Ok::<(), zenilbm::IlbmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod chunk;
mod compose;
mod decode;
mod encode;
mod error;
mod hexdump;
mod ilbm;
mod image;
mod info;
mod limits;

// Re-exports
pub use chunk::{parse as parse_chunks, Chunk, ChunkId};
pub use compose::compose;
pub use decode::{decode, DecodeParts, DecodeRequest};
pub use encode::EncodeRequest;
pub use error::IlbmError;
pub use hexdump::hexdump;
pub use ilbm::{BitMapHeader, ColorMap, ColorRegister, Compression, FormKind, Masking};
pub use image::DecodedImage;
pub use info::ImageInfo;
pub use limits::Limits;
