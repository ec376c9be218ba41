//! # A streaming QOI (Quite Okay Image) decoding and encoding library
//!
//! This crate converts between raw interleaved pixel buffers and byte streams
//! in the format laid out by the [QOI specification], losslessly and
//! byte-exactly in both directions.
//!
//! Encoding and decoding run against any [`std::io::Read`] source or
//! [`std::io::Write`] sink. The codec buffers the underlying stream in fixed
//! size chunks itself, so plain [`File`](std::fs::File) handles and in-memory
//! slices both work without extra wrapping.
//!
//! ## Decoding
//!
//! [`decode`] reads a full QOI stream and returns a [`QoiImage`]. The second
//! argument picks the channel layout of the returned pixel buffer: `0` keeps
//! whatever the stream's header declares, `3` or `4` convert it (dropping the
//! alpha byte, or filling it with `255`).
//!
//! ```
//! use qoi_stream::{decode, encode, ColorSpace, QoiImage};
//!
//! # fn main() -> Result<(), qoi_stream::QoiError> {
//! let image = QoiImage::new(2, 1, 3, ColorSpace::Srgb, vec![10, 10, 10, 10, 10, 10])?;
//! let mut stream = Vec::new();
//! encode(&image, &mut stream)?;
//! let decoded = decode(&stream[..], 0)?;
//! assert_eq!(decoded, image);
//! # Ok(())
//! # }
//! ```
//!
//! ## Encoding
//!
//! [`encode`] validates nothing beyond what [`QoiImage::new`] already
//! guaranteed: the stream it writes is complete (header, chunk data, end
//! marker) and flushed, or an error is returned and the sink contents must be
//! discarded.
//!
//! For whole files, [`decode_file`] and [`encode_file`] wrap the same calls
//! around [`File`](std::fs::File) handles.
//!
//! [QOI specification]: <https://qoiformat.org/qoi-specification.pdf>
#![forbid(unsafe_code)]

mod buffer;
mod consts;
mod decoder;
mod encoder;
mod error;
mod header;
mod image;
mod pixel;

use std::{fs::File, io::{Read, Write}, path::Path};

pub use crate::error::QoiError;
pub use crate::header::ColorSpace;
pub use crate::image::QoiImage;

/// Decodes a QOI stream from `source` into a [`QoiImage`].
///
/// `channels` selects the layout of the returned pixel buffer: `0` keeps the
/// channel count recorded in the stream's header, `3` or `4` force that layout,
/// dropping the alpha byte or filling it with `255` as needed. The conversion
/// only changes the delivered buffer; the chunk stream is interpreted the same
/// way regardless.
///
/// # Errors
///
/// Will return `Err` if the following is true:
///
/// 1: The `channels` value is not `0`, `3` or `4`.\
/// 2: The header is malformed (magic bytes, zero width or height, channels, colorspace).\
/// 3: The pixel buffer size for the header's dimensions overflows.\
/// 4: The source ends before the header, pixel data or end marker are complete, or fails to read.\
/// 5: The end marker bytes after the pixel data are incorrect.
pub fn decode<R: Read>(source: R, channels: u8) -> Result<QoiImage, QoiError> {
    decoder::decode_from(&mut buffer::Reader::new(source), channels)
}

/// Encodes `image` as a complete QOI stream into `sink`.
///
/// The sink receives the header, the chunk data and the end marker, then gets
/// flushed. On error the sink may hold a partial stream which must not be
/// treated as a valid image.
///
/// # Errors
///
/// Will return `Err` if the sink fails to write or flush.
pub fn encode<W: Write>(image: &QoiImage, sink: W) -> Result<(), QoiError> {
    encoder::encode_into(image, &mut buffer::Writer::new(sink))
}

/// Opens the file at `path` and decodes it as a QOI stream.
///
/// `channels` behaves as in [`decode`].
///
/// # Errors
///
/// Will return `Err` if the file cannot be opened or for any [`decode`] error.
pub fn decode_file<P: AsRef<Path>>(path: P, channels: u8) -> Result<QoiImage, QoiError> {
    decode(File::open(path)?, channels)
}

/// Creates the file at `path` and encodes `image` into it as a QOI stream.
///
/// # Errors
///
/// Will return `Err` if the file cannot be created or for any [`encode`] error.
pub fn encode_file<P: AsRef<Path>>(image: &QoiImage, path: P) -> Result<(), QoiError> {
    encode(image, File::create(path)?)
}
