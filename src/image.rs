use crate::{error::QoiError, header::ColorSpace};

/// A decoded image: its dimensions, channel layout, colorspace tag and raw pixel bytes.
///
/// The pixel buffer is interleaved and row-major: `channels` bytes per pixel, scanning
/// left to right, top to bottom. Construction guarantees the buffer length matches
/// `width * height * channels` exactly.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QoiImage {
    width: u32,
    height: u32,
    channels: u8,
    colorspace: ColorSpace,
    data: Vec<u8>,
}

impl QoiImage {
    /// Wraps raw pixel bytes into an image after validating the dimensions against them.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the following is true:
    ///
    /// 1: The width or height values are `0`.\
    /// 2: The channels value is not `3` (RGB) or `4` (RGBA).\
    /// 3: The buffer size for the dimensions overflows.\
    /// 4: The data length is not exactly `width * height * channels` bytes.
    pub fn new(width: u32, height: u32, channels: u8, colorspace: ColorSpace, data: Vec<u8>) -> Result<Self, QoiError> {
        if width == 0 || height == 0 {return Err(QoiError::InvalidWidthHeight(width, height));}
        if channels != 3 && channels != 4 {return Err(QoiError::InvalidChannelsValue(channels));}
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(QoiError::InputSizeMismatch(data.len(), width, height, channels));
        }
        Ok(Self {width, height, channels, colorspace, data})
    }
    /// The width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }
    /// The height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
    /// The channels of the image. Valid values: `3` (RGB) or `4` (RGBA).
    #[must_use]
    pub const fn channels(&self) -> u8 {
        self.channels
    }
    /// The colorspace tag of the image.
    #[must_use]
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }
    /// The raw interleaved pixel bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    /// Consumes the image and returns the raw interleaved pixel bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

// the exact pixel buffer length for the dimensions, checked against overflow.
// width * height always fits a u64 but a further * 4 may not, and the result
// may exceed usize on 32bit targets.
pub(crate) fn buffer_len(width: u32, height: u32, channels: u8) -> Result<usize, QoiError> {
    (width as u64 * height as u64)
        .checked_mul(channels as u64)
        .and_then(|len| usize::try_from(len).ok())
        .ok_or(QoiError::ImageTooLarge(width, height, channels))
}
