pub const MAGIC_BYTES: [u8; 4] = [b'q', b'o', b'i', b'f'];
pub const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

pub const OP_INDEX: u8 = 0x00; // 2bit tag (00), 6bit cache slot
pub const OP_DIFF: u8 = 0x40;  // 2bit tag (01), 3x2bit rgb diffs, bias 2
pub const OP_LUMA: u8 = 0x80;  // 2bit tag (10), 6bit green diff, bias 32
pub const OP_RUN: u8 = 0xc0;   // 2bit tag (11), 6bit run length, bias -1
pub const OP_RGB: u8 = 0xfe;   // 8bit tag (11111110), 3 raw channel bytes
pub const OP_RGBA: u8 = 0xff;  // 8bit tag (11111111), 4 raw channel bytes

// a run chunk can hold at most 62 pixels. the two remaining 6bit values (62 and 63)
// would collide with the RGB and RGBA tags.
pub const MAX_RUN: u8 = 62;

// how many bytes the stream adapters move per read/write against the underlying source/sink.
pub const CHUNK_SIZE: usize = 8192;

pub const DEFAULT_PIXEL: crate::pixel::Pixel = crate::pixel::Pixel::new(0, 0, 0, 255);
pub const ZERO_PIXEL: crate::pixel::Pixel = crate::pixel::Pixel::new(0, 0, 0, 0);
