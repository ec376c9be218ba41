use std::io::Write;

use crate::{
    buffer::Writer,
    consts::{DEFAULT_PIXEL, END_MARKER, MAX_RUN, OP_INDEX, OP_RGB, OP_RGBA, OP_RUN},
    error::QoiError,
    header::QoiHeader,
    image::QoiImage,
    pixel::{Pixel, PixelCache},
};

// writes the complete stream: header, chunk data, end marker. flushes the sink once at the end.
pub(crate) fn encode_into<W: Write>(image: &QoiImage, writer: &mut Writer<W>) -> Result<(), QoiError> {
    let header = QoiHeader {
        width: image.width(),
        height: image.height(),
        channels: image.channels(),
        colorspace: image.colorspace(),
    };
    header.write_to(writer)?;
    encode_pixels(writer, image.data(), image.channels())?;
    writer.write_bytes(&END_MARKER)?;
    writer.flush()
}

// the encoder engine. every pixel walks the same decision order the decoder dispatches on:
// run extension first, then a cache probe, then diff, luma and the raw fallbacks.
#[allow(clippy::cast_possible_truncation)] // hash index guaranteed to be 0..=63 so cannot truncate when casting to u8
fn encode_pixels<W: Write>(writer: &mut Writer<W>, data: &[u8], channels: u8) -> Result<(), QoiError> {
    let mut cache = PixelCache::new();
    let mut previous = DEFAULT_PIXEL;
    let mut run: u8 = 0;
    for bytes in data.chunks_exact(channels as usize) {
        let pixel = if channels == 4 {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        } else {
            Pixel::new(bytes[0], bytes[1], bytes[2], 255)
        };
        if pixel == previous {
            run += 1;
            if run == MAX_RUN { // the 6bit length field saturates, emit and start over
                writer.write_byte(OP_RUN | (run - 1))?; // bias -1 (61 means a run of 62)
                run = 0;
            }
            continue;
        }
        if run > 0 { // moving past run extension flushes the pending run
            writer.write_byte(OP_RUN | (run - 1))?;
            run = 0;
        }
        let slot = pixel.hash_index();
        if cache.lookup(slot) == pixel {
            writer.write_byte(OP_INDEX | slot as u8)?; // slot already holds this color, no store
        } else {
            cache.store(pixel);
            if pixel.alpha == previous.alpha {
                if let Some(diff) = pixel.diff(previous) {
                    writer.write_byte(diff)?;
                } else if let Some((tag_green, red_blue)) = pixel.luma(previous) {
                    writer.write_byte(tag_green)?;
                    writer.write_byte(red_blue)?;
                } else {
                    writer.write_byte(OP_RGB)?;
                    writer.write_bytes(&[pixel.red, pixel.green, pixel.blue])?;
                }
            } else {
                writer.write_byte(OP_RGBA)?;
                writer.write_bytes(&[pixel.red, pixel.green, pixel.blue, pixel.alpha])?;
            }
        }
        previous = pixel;
    }
    if run > 0 { // a trailing run ends with the pixel data
        writer.write_byte(OP_RUN | (run - 1))?;
    }
    Ok(())
}
