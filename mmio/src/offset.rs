use core::fmt;

/// Word-aligned byte offset into a register window.
///
/// Registers on the targeted SoCs are 32 bits wide and naturally aligned, so
/// an offset that is not a multiple of four can never name a register.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(u32);

impl Offset {
    /// Create an offset from a byte count, rejecting unaligned values.
    pub const fn new(bytes: u32) -> Option<Self> {
        if bytes % 4 == 0 {
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Create an offset from a count of 32-bit words.
    pub const fn from_words(words: u32) -> Self {
        Self(words * 4)
    }

    /// Offset in bytes.
    pub const fn bytes(self) -> u32 {
        self.0
    }

    /// Whether the whole word at this offset lies within `len` bytes.
    pub const fn fits(self, len: usize) -> bool {
        match (self.0 as usize).checked_add(4) {
            Some(end) => end <= len,
            None => false,
        }
    }

    /// Offset in 32-bit words.
    pub const fn word_index(self) -> usize {
        (self.0 / 4) as usize
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unaligned_offsets() {
        assert!(Offset::new(0x10).is_some());
        assert!(Offset::new(0x12).is_none());
        assert!(Offset::new(0x13).is_none());
    }

    #[test]
    fn fits_checks_the_whole_word() {
        let last = Offset::new(0x3FC).unwrap();
        assert!(last.fits(0x400));
        assert!(!last.fits(0x3FF));
        assert!(!Offset::from_words(0).fits(3));

        let top = Offset::new(u32::MAX - 3).unwrap();
        assert!(!top.fits(0x400));
        assert!(!top.fits(usize::MAX - 8));
    }

    #[test]
    fn words_and_bytes_agree() {
        let off = Offset::from_words(9);
        assert_eq!(off.bytes(), 0x24);
        assert_eq!(off.word_index(), 9);
        assert_eq!(Offset::new(0x24), Some(off));
        assert_eq!(off.to_string(), "0x24");
    }
}
