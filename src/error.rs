/// The possible errors when decoding or encoding QOI images.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum QoiError {
    /// The magic bytes of the header are incorrect. Correct value is: "qoif" ([`113`, `111`, `105`, `102`]).
    /// Shows the encountered values.
    #[error("invalid magic bytes: {0}, {1}, {2}, {3}")]
    InvalidMagicBytes(u8, u8, u8, u8),
    /// The width or height is `0`. Shows the encountered values.
    #[error("width or height cannot be 0: detected {0} width and {1} height")]
    InvalidWidthHeight(u32, u32),
    /// The channels value is incorrect. Correct values are: `3` (RGB) or `4` (RGBA). Shows the encountered value.
    #[error("invalid channels value: {0}")]
    InvalidChannelsValue(u8),
    /// The colorspace value is incorrect. Correct values are: `0` (sRGB with linear alpha) or `1` (all channels
    /// linear). Shows the encountered value.
    #[error("invalid colorspace value: {0}")]
    InvalidColorspaceValue(u8),
    /// The channels requested from [`decode`](crate::decode) are not `0` (keep the header value), `3` or `4`.
    /// Shows the encountered value.
    #[error("requested channels must be 0, 3 or 4: detected {0}")]
    InvalidChannelRequest(u8),
    /// The pixel buffer size for the specified dimensions does not fit in memory. Shows width, height and channels.
    #[error("pixel buffer size for {0}x{1} with {2} channels overflows")]
    ImageTooLarge(u32, u32, u8),
    /// The pixel buffer length does not match the specified dimensions. Shows the length, width, height and channels.
    #[error("pixel buffer of {0} bytes cannot represent a {1}x{2} image with {3} channels")]
    InputSizeMismatch(usize, u32, u32, u8),
    /// The bytes for the end marker are incorrect. Correct end marker bytes are
    /// [`0`, `0`, `0`, `0`, `0`, `0`, `0`, `1`]. Shows the detected bytes.
    #[error("wrong bytes for end marker, detected: {0:?}")]
    BadEndMarkerBytes([u8; 8]),
    /// The underlying stream ended before the header, pixel data or end marker were fully read.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,
    /// The underlying stream failed to read or write.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
}
