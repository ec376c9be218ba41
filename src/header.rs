use std::io::{Read, Write};

use crate::{
    buffer::{Reader, Writer},
    consts::{END_MARKER, MAGIC_BYTES},
    error::QoiError,
};

/// The colorspace tag of a QOI image.
///
/// Purely informative: the codec carries it through without converting any channel values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    /// sRGB channels with a linear alpha. Stored as `0`.
    Srgb,
    /// All channels linear. Stored as `1`.
    Linear,
}

impl ColorSpace {
    pub(crate) fn from_byte(byte: u8) -> Result<Self, QoiError> {
        match byte {
            0 => Ok(Self::Srgb),
            1 => Ok(Self::Linear),
            _ => Err(QoiError::InvalidColorspaceValue(byte)),
        }
    }
    #[must_use]
    pub(crate) const fn to_byte(self) -> u8 {
        match self {
            Self::Srgb => 0,
            Self::Linear => 1,
        }
    }
}

/// The header data of a QOI image.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QoiHeader {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub colorspace: ColorSpace,
}

impl QoiHeader {
    // writes magic bytes, dimensions, channels and colorspace in wire order.
    pub(crate) fn write_to<W: Write>(self, writer: &mut Writer<W>) -> Result<(), QoiError> {
        writer.write_bytes(&MAGIC_BYTES)?;
        writer.write_be_u32(self.width)?;
        writer.write_be_u32(self.height)?;
        writer.write_byte(self.channels)?;
        writer.write_byte(self.colorspace.to_byte())
    }
    // validates and extracts the 14 header bytes. fails before any pixel data is consumed.
    pub(crate) fn read_from<R: Read>(reader: &mut Reader<R>) -> Result<Self, QoiError> {
        let magic: [u8; 4] = reader.read_array()?;
        if magic != MAGIC_BYTES {
            return Err(QoiError::InvalidMagicBytes(magic[0], magic[1], magic[2], magic[3]));
        }
        let width = reader.read_be_u32()?;
        let height = reader.read_be_u32()?;
        if width == 0 || height == 0 {return Err(QoiError::InvalidWidthHeight(width, height));}
        let channels = reader.read_byte()?;
        if channels != 3 && channels != 4 {return Err(QoiError::InvalidChannelsValue(channels));}
        let colorspace = ColorSpace::from_byte(reader.read_byte()?)?;
        Ok(Self {width, height, channels, colorspace})
    }
}

// verifies the fixed 8 byte end marker that terminates every stream.
pub(crate) fn check_end_marker<R: Read>(reader: &mut Reader<R>) -> Result<(), QoiError> {
    let end: [u8; 8] = reader.read_array()?;
    if end == END_MARKER {Ok(())} else {Err(QoiError::BadEndMarkerBytes(end))}
}
