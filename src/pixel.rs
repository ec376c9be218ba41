use crate::consts::ZERO_PIXEL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Pixel {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {red, green, blue, alpha}
    }
    #[inline]
    pub fn hash_index(self) -> usize { // guaranteed to output 0..=63
        (self.red as usize * 3 + self.green as usize * 5 + self.blue as usize * 7 + self.alpha as usize * 11) % 64
    }
    // returns diff chunk to put into the stream. must call on new pixel and feed in old. used only in encoder.
    #[inline]
    pub fn diff(self, old: Self) -> Option<u8> { // QOI_OP_DIFF: 2bit tag (01), 3x2bit vals (00) rgb diffs
        let red = self.red.wrapping_sub(old.red).wrapping_add(2);       // Subtracting old from new gives you
        let green = self.green.wrapping_sub(old.green).wrapping_add(2); // the difference. Add bias of 2 for storage.
        let blue = self.blue.wrapping_sub(old.blue).wrapping_add(2);    // (0 means -2 difference, 3 means +1 difference)
        if red > 3 || green > 3 || blue > 3 {return None;}
        Some(crate::consts::OP_DIFF | red << 4 | green << 2 | blue)
    }
    // returns luma chunk to put into the stream. must call on new pixel and feed in old. used only in encoder.
    #[inline] // QOI_OP_LUMA: 2bit tag (10), 6bit val (000000) green diff, bias 32 (0 means -32)
    pub fn luma(self, old: Self) -> Option<(u8, u8)> {
        let red_diff = self.red.wrapping_sub(old.red);                 // Subtract old from new to get the difference
        let green_diff = self.green.wrapping_sub(old.green);           // and then add the bias. Green is 6bit val with
        let blue_diff = self.blue.wrapping_sub(old.blue);              // a bias of 32 (0 means -32, 63 means +31). Red
        let red = red_diff.wrapping_add(8).wrapping_sub(green_diff);   // and blue are 4bit vals with a bias of 8 (0 means
        let green = green_diff.wrapping_add(32);                       // -8, 15 means +7). Red and blue base their diffs
        let blue = blue_diff.wrapping_add(8).wrapping_sub(green_diff); // off of the green difference.
        if red > 15 || green > 63 || blue > 15 {return None;}
        Some((crate::consts::OP_LUMA | green, red << 4 | blue))
    }
}

/// The table of the 64 most recently seen colors.
///
/// Both the encoder and decoder evolve an identical table while walking the chunk stream.
/// A later color hashing to an occupied slot silently overwrites it. There is no collision
/// resolution on purpose: the format relies on both sides applying the same overwrite at
/// the same point in the stream.
pub struct PixelCache {
    slots: [Pixel; 64],
}

impl PixelCache {
    #[inline]
    pub const fn new() -> Self {
        Self {slots: [ZERO_PIXEL; 64]}
    }
    #[inline]
    pub fn lookup(&self, slot: usize) -> Pixel {
        self.slots[slot]
    }
    #[inline]
    pub fn store(&mut self, pixel: Pixel) {
        self.slots[pixel.hash_index()] = pixel;
    }
}
