use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

/// Final decode output: a tightly packed 8-bit RGBA raster.
///
/// Alpha is straight (non-premultiplied) and always 255; the formats
/// handled here carry no native alpha channel.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    rgba: Vec<u8>,
    /// Pixels whose color index fell outside the CMAP and were rendered
    /// as opaque black. Non-zero is a degraded but successful decode.
    pub unmapped_pixels: u32,
}

impl DecodedImage {
    pub(crate) fn new(width: u32, height: u32, rgba: Vec<u8>, unmapped_pixels: u32) -> Self {
        Self {
            width,
            height,
            rgba,
            unmapped_pixels,
        }
    }

    /// The RGBA pixel data, `width * height * 4` bytes.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Take ownership of the pixel data.
    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }

    /// View the pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::RGBA8] {
        self.rgba.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(self.as_pixels(), self.width as usize, self.height as usize)
    }
}
