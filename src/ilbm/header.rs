//! BMHD header and CMAP color map parsing.

use alloc::vec::Vec;

use crate::error::IlbmError;

/// How the BODY pixel rows are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    /// Per-row run-length encoding; runs never cross a row boundary.
    ByteRun1,
}

impl Compression {
    fn from_u8(v: u8) -> Result<Self, IlbmError> {
        match v {
            0 => Ok(Self::None),
            1 => Ok(Self::ByteRun1),
            other => Err(IlbmError::UnsupportedFormat(alloc::format!(
                "compression mode {other}"
            ))),
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::ByteRun1 => 1,
        }
    }
}

/// BMHD masking mode. Only `HasMask` affects decoding (one extra mask row
/// per scanline in planar bodies); the others are carried through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Masking {
    None,
    HasMask,
    HasTransparentColor,
    Lasso,
    Unknown(u8),
}

impl Masking {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::None,
            1 => Self::HasMask,
            2 => Self::HasTransparentColor,
            3 => Self::Lasso,
            other => Self::Unknown(other),
        }
    }
}

pub(crate) const BMHD_SIZE: usize = 20;

/// Parsed `BMHD` chunk. Immutable once read; all fields big-endian on disk.
#[derive(Clone, Copy, Debug)]
pub struct BitMapHeader {
    pub width: u16,
    pub height: u16,
    pub x: u16,
    pub y: u16,
    /// Bit depth: number of bitplanes (1..=8 supported for planar forms).
    pub n_planes: u8,
    pub masking: Masking,
    pub compression: Compression,
    pub transparent_color: u16,
    pub x_aspect: u8,
    pub y_aspect: u8,
    pub page_width: u16,
    pub page_height: u16,
}

impl BitMapHeader {
    pub(crate) fn parse(data: &[u8]) -> Result<Self, IlbmError> {
        if data.len() < BMHD_SIZE {
            return Err(IlbmError::TruncatedInput(alloc::format!(
                "BMHD payload is {} bytes, need {BMHD_SIZE}",
                data.len()
            )));
        }
        let be_u16 = |i: usize| u16::from_be_bytes([data[i], data[i + 1]]);
        Ok(Self {
            width: be_u16(0),
            height: be_u16(2),
            x: be_u16(4),
            y: be_u16(6),
            n_planes: data[8],
            masking: Masking::from_u8(data[9]),
            compression: Compression::from_u8(data[10])?,
            transparent_color: be_u16(12),
            x_aspect: data[14],
            y_aspect: data[15],
            page_width: be_u16(16),
            page_height: be_u16(18),
        })
    }

    /// Bytes per bitplane row. Rows are byte-aligned.
    pub fn row_bytes(&self) -> usize {
        usize::from(self.width).div_ceil(8)
    }
}

/// One CMAP color register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorRegister {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Ordered palette from a `CMAP` chunk; index = color register number.
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
    registers: Vec<ColorRegister>,
}

impl ColorMap {
    pub fn new(registers: Vec<ColorRegister>) -> Self {
        Self { registers }
    }

    /// Build from a raw CMAP payload: length / 3 RGB triplets. Trailing
    /// 1-2 bytes that do not form a whole triplet are ignored.
    pub fn from_cmap(data: &[u8]) -> Self {
        let registers = data
            .chunks_exact(3)
            .map(|c| ColorRegister {
                red: c[0],
                green: c[1],
                blue: c[2],
            })
            .collect();
        Self { registers }
    }

    /// Synthetic grayscale ramp with `1 << n_planes` entries, used when
    /// writing new files without a caller-supplied palette. Never a
    /// substitute for a missing CMAP when reading.
    pub fn grayscale(n_planes: u8) -> Self {
        let count = 1usize << n_planes.clamp(1, 8);
        let registers = (0..count)
            .map(|i| {
                let v = (i * 255 / (count - 1)) as u8;
                ColorRegister {
                    red: v,
                    green: v,
                    blue: v,
                }
            })
            .collect();
        Self { registers }
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Color for a register number, or `None` when the index is out of
    /// range.
    pub fn get(&self, index: u8) -> Option<ColorRegister> {
        self.registers.get(usize::from(index)).copied()
    }

    pub fn registers(&self) -> &[ColorRegister] {
        &self.registers
    }

    pub(crate) fn to_cmap_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.registers.len() * 3);
        for c in &self.registers {
            out.extend_from_slice(&[c.red, c.green, c.blue]);
        }
        out
    }
}
