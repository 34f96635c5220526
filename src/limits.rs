/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Checks run after the BMHD is
/// parsed and before any pixel buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded RGBA buffer.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::IlbmError> {
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(crate::IlbmError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(crate::IlbmError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::IlbmError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that the output allocation is within the memory limit.
    pub(crate) fn check_output(&self, bytes: usize) -> Result<(), crate::IlbmError> {
        if let Some(max_mem) = self.max_output_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::IlbmError::LimitExceeded(alloc::format!(
                    "output allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
