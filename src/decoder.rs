use std::io::Read;

use crate::{
    buffer::Reader,
    consts::DEFAULT_PIXEL,
    error::QoiError,
    header::{check_end_marker, QoiHeader},
    image::{buffer_len, QoiImage},
    pixel::{Pixel, PixelCache},
};

// reads the complete stream: header, chunk data, end marker.
//
// `channels` of 0 delivers the channel count recorded in the header. 3 or 4 convert
// the returned buffer: requesting 3 from an RGBA stream drops the alpha byte per
// pixel, requesting 4 from an RGB stream emits 255 for it. the chunk state is
// tracked as a full 4 byte pixel either way so the cache evolves identically to
// the encoder's no matter which layout is delivered.
pub(crate) fn decode_from<R: Read>(reader: &mut Reader<R>, channels: u8) -> Result<QoiImage, QoiError> {
    if channels != 0 && channels != 3 && channels != 4 {
        return Err(QoiError::InvalidChannelRequest(channels));
    }
    let header = QoiHeader::read_from(reader)?;
    let delivered = if channels == 0 {header.channels} else {channels};
    let data = decode_pixels(reader, &header, delivered)?;
    check_end_marker(reader)?;
    QoiImage::new(header.width, header.height, delivered, header.colorspace, data)
}

// the decoder engine. walks one pixel position at a time so a run chunk can never
// write past the buffer the header promised; dispatch order mirrors the encoder's
// decision order exactly since the tag byte is the only token boundary.
fn decode_pixels<R: Read>(reader: &mut Reader<R>, header: &QoiHeader, channels: u8) -> Result<Vec<u8>, QoiError> {
    let length = buffer_len(header.width, header.height, channels)?;
    let mut data = vec![0; length];
    let mut cache = PixelCache::new();
    let mut pixel = DEFAULT_PIXEL;
    let mut run: u8 = 0;
    let step = channels as usize;
    let mut offset = 0;
    while offset < length {
        if run > 0 {
            run -= 1; // a pending run repeats the current pixel, the cache is untouched
        } else {
            let tag = reader.read_byte()?;
            match tag {
                254 => { // QOI_OP_RGB: 8bit tag (11111110), alpha kept from the current pixel
                    let [red, green, blue] = reader.read_array()?;
                    pixel = Pixel::new(red, green, blue, pixel.alpha);
                    cache.store(pixel);
                },
                255 => { // QOI_OP_RGBA: 8bit tag (11111111)
                    let [red, green, blue, alpha] = reader.read_array()?;
                    pixel = Pixel::new(red, green, blue, alpha);
                    cache.store(pixel);
                },
                192..=253 => { // QOI_OP_RUN: 2bit tag (11), 6bit val, bias -1 (0 means 1)
                    run = tag & 0x3f; // this position counts too, `run` more follow
                },
                128..=191 => { // QOI_OP_LUMA: 2bit tag (10), 6bit green diff, bias 32 (0 means -32)
                    let green_diff = (tag & 0x3f).wrapping_sub(32); // clear tag with bitwise AND, include bias
                    let from_green = green_diff.wrapping_sub(8); // include bias, used for red and blue diff calcs
                    let red_and_blue = reader.read_byte()?;
                    pixel.red = pixel.red.wrapping_add(from_green.wrapping_add((red_and_blue >> 4) & 0x0f));
                    pixel.green = pixel.green.wrapping_add(green_diff);
                    pixel.blue = pixel.blue.wrapping_add(from_green.wrapping_add(red_and_blue & 0x0f));
                    cache.store(pixel);
                },
                64..=127 => { // QOI_OP_DIFF: 2bit tag (01), 3x2bit vals (00) rgb diffs, bias 2 (0 means -2)
                    pixel.red = pixel.red.wrapping_add((tag >> 4) & 0x03).wrapping_sub(2);
                    pixel.green = pixel.green.wrapping_add((tag >> 2) & 0x03).wrapping_sub(2);
                    pixel.blue = pixel.blue.wrapping_add(tag & 0x03).wrapping_sub(2);
                    cache.store(pixel);
                },
                0..=63 => { // QOI_OP_INDEX: 2bit tag (00), 6bit cache slot, already cached so no store
                    pixel = cache.lookup(tag as usize);
                },
            }
        }
        data[offset] = pixel.red;
        data[offset + 1] = pixel.green;
        data[offset + 2] = pixel.blue;
        if step == 4 {data[offset + 3] = pixel.alpha;}
        offset += step;
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::decode_from;
    use crate::{buffer::Reader, error::QoiError, header::ColorSpace, image::QoiImage};

    fn stream(width: u32, height: u32, channels: u8, chunks: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[113, 111, 105, 102]); // magic bytes
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.push(channels);
        bytes.push(0); // colorspace
        bytes.extend_from_slice(chunks);
        bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]); // end marker
        bytes
    }
    fn decode(bytes: &[u8], channels: u8) -> Result<QoiImage, QoiError> {
        decode_from(&mut Reader::new(bytes), channels)
    }
    #[test]
    fn good_chunk_dispatch() {
        let bytes = stream(2, 2, 4,
                           &[0,                       // index chunk, cold cache slot 0 holds (0, 0, 0, 0)
                             127,                     // diff chunk (+1, +1, +1)
                             255, 255, 255, 255, 255, // rgba chunk
                             192]);                   // run chunk (run of 1)
        let image = decode(&bytes, 0).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.channels(), 4);
        assert_eq!(image.colorspace(), ColorSpace::Srgb);
        assert_eq!(image.data(), [0, 0, 0, 0,
                                  1, 1, 1, 0,
                                  255, 255, 255, 255,
                                  255, 255, 255, 255]);
    }
    #[test]
    fn good_luma_and_run() {
        let bytes = stream(2, 1, 3,
                           &[170, 136, // luma chunk: green +10, red/blue relative 0
                             192]);    // run chunk (run of 1)
        let image = decode(&bytes, 0).unwrap();
        assert_eq!(image.data(), [10, 10, 10,
                                  10, 10, 10]);
    }
    #[test]
    fn good_index_reuses_cached_color() {
        let bytes = stream(3, 1, 4,
                           &[254, 10, 20, 30,  // rgb chunk, stored in cache slot 9
                             254, 41, 210, 234,
                             9]);              // index chunk for slot 9
        let image = decode(&bytes, 0).unwrap();
        assert_eq!(image.data(), [10, 20, 30, 255,
                                  41, 210, 234, 255,
                                  10, 20, 30, 255]);
    }
    #[test]
    fn good_rgb_stream_delivered_as_rgba() {
        let bytes = stream(2, 1, 3, &[170, 136, 192]);
        let image = decode(&bytes, 4).unwrap();
        assert_eq!(image.channels(), 4);
        assert_eq!(image.data(), [10, 10, 10, 255, // alpha never moves for an RGB stream
                                  10, 10, 10, 255]);
    }
    #[test]
    fn good_rgba_stream_delivered_as_rgb() {
        let bytes = stream(2, 1, 4,
                           &[255, 9, 8, 7, 100, // rgba chunk with a non-default alpha
                             192]);
        let image = decode(&bytes, 3).unwrap();
        assert_eq!(image.channels(), 3);
        assert_eq!(image.data(), [9, 8, 7, // alpha dropped from the delivered buffer
                                  9, 8, 7]);
    }
    #[test]
    fn bad_channel_request() {
        let bytes = stream(1, 1, 4, &[192]);
        assert!(matches!(decode(&bytes, 2), Err(QoiError::InvalidChannelRequest(2))));
    }
    #[test]
    fn bad_magic_fails_before_pixels() {
        let mut bytes = stream(1, 1, 4, &[192]);
        bytes[0] = 112;
        assert!(matches!(decode(&bytes, 0), Err(QoiError::InvalidMagicBytes(112, 111, 105, 102))));
    }
    #[test]
    fn bad_end_marker_after_valid_pixels() {
        let mut bytes = stream(1, 1, 4, &[192]);
        let last = bytes.len() - 1;
        bytes[last] = 0; // flip the closing 0x01
        assert!(matches!(decode(&bytes, 0), Err(QoiError::BadEndMarkerBytes([0, 0, 0, 0, 0, 0, 0, 0]))));
    }
    #[test]
    fn bad_truncated_before_end_marker() {
        let mut bytes = stream(1, 1, 4, &[192]);
        bytes.pop();
        assert!(matches!(decode(&bytes, 0), Err(QoiError::UnexpectedEndOfStream)));
    }
    #[test]
    fn bad_truncated_inside_chunk() {
        let bytes = [113, 111, 105, 102,
                     0, 0, 0, 1,
                     0, 0, 0, 1,
                     4,
                     0,
                     254, 10]; // rgb chunk missing two channel bytes
        assert!(matches!(decode(&bytes, 0), Err(QoiError::UnexpectedEndOfStream)));
    }
    #[test]
    fn good_overlong_run_cannot_overflow_output() {
        // a run of 62 against a 1x1 image fills the single pixel and leaves the
        // rest of the chunk ignored; the stream then fails end marker validation
        // because the decoder is already past the pixel data.
        let bytes = stream(1, 1, 4, &[253, 0, 0]);
        assert!(matches!(decode(&bytes, 0), Err(QoiError::BadEndMarkerBytes(_))));
    }
}
