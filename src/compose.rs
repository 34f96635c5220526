//! Raster composer: chunky color indices to packed RGBA.

use alloc::vec::Vec;

use crate::ilbm::ColorMap;
use crate::image::DecodedImage;

/// Map each chunky color index through `color_map` into a tightly packed
/// RGBA buffer (straight alpha, always fully opaque).
///
/// An index outside the color map produces opaque black at that pixel and
/// bumps [`DecodedImage::unmapped_pixels`] instead of failing; the result
/// is a best-effort image, never an error. Pure function: no shared state,
/// safe to call concurrently for independent inputs.
pub fn compose(chunky: &[u8], width: u32, height: u32, color_map: &ColorMap) -> DecodedImage {
    let pixel_count = (width as usize).saturating_mul(height as usize);
    let mut rgba = Vec::with_capacity(pixel_count.saturating_mul(4));
    let mut unmapped = 0u32;
    for i in 0..pixel_count {
        match chunky.get(i).and_then(|&v| color_map.get(v)) {
            Some(c) => rgba.extend_from_slice(&[c.red, c.green, c.blue, 255]),
            None => {
                unmapped = unmapped.saturating_add(1);
                rgba.extend_from_slice(&[0, 0, 0, 255]);
            }
        }
    }
    DecodedImage::new(width, height, rgba, unmapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilbm::ColorRegister;
    use alloc::vec;

    #[test]
    fn in_range_indices_map_through_palette() {
        let cmap = ColorMap::new(vec![
            ColorRegister {
                red: 255,
                green: 0,
                blue: 0,
            },
            ColorRegister {
                red: 0,
                green: 255,
                blue: 0,
            },
        ]);
        let image = compose(&[0, 1, 1, 0], 2, 2, &cmap);
        assert_eq!(
            image.rgba(),
            [255, 0, 0, 255, 0, 255, 0, 255, 0, 255, 0, 255, 255, 0, 0, 255]
        );
        assert_eq!(image.unmapped_pixels, 0);
    }

    #[test]
    fn out_of_range_index_is_opaque_black_and_counted() {
        let cmap = ColorMap::new(vec![ColorRegister {
            red: 9,
            green: 9,
            blue: 9,
        }]);
        let image = compose(&[0, 5], 2, 1, &cmap);
        assert_eq!(image.rgba(), [9, 9, 9, 255, 0, 0, 0, 255]);
        assert_eq!(image.unmapped_pixels, 1);
    }

    #[test]
    fn output_is_always_width_height_times_four() {
        let cmap = ColorMap::grayscale(4);
        let image = compose(&[0; 12], 4, 3, &cmap);
        assert_eq!(image.rgba().len(), 4 * 3 * 4);
    }
}
