use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::parse::parse_binary_string;

const WORD_BITS: usize = 32;

/// A growable vector of bits packed into 32-bit words.
///
/// Bit `i` lives in word `i / 32` at bit position `i % 32`, least significant
/// bit first. Every textual or byte representation presents the bits in index
/// order instead, left to right, so index 0 is the first character and the
/// most significant bit of the first byte.
///
/// Storage beyond `len()` is always zero: growing appends zeroed words and
/// shrinking masks the tail of the last kept word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitSet {
    words: Vec<u32>,
    size: usize,
}

impl BitSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a string of `'0'` and `'1'` characters.
    ///
    /// # Errors
    ///
    /// Fails when `text` contains any other character.
    pub fn from_binary_string(text: &str) -> Result<Self> {
        let mut bit_set = Self::new();
        bit_set.set_binary_string(0, text)?;
        Ok(bit_set)
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bit_set = Self::new();
        bit_set.set_bytes(0, bytes);
        bit_set
    }

    /// Logical number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Grows with zeroed bits or truncates to exactly `size` bits.
    pub fn resize(&mut self, size: usize) {
        if size > self.size {
            self.grow(size);
        } else if size < self.size {
            self.shrink(size);
        }
    }

    fn grow(&mut self, size: usize) {
        if size <= self.size {
            return;
        }
        self.words.resize(size.div_ceil(WORD_BITS), 0);
        self.size = size;
    }

    fn shrink(&mut self, size: usize) {
        self.words.truncate(size.div_ceil(WORD_BITS));
        let used = size % WORD_BITS;
        if used != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= (1u32 << used) - 1;
        }
        self.size = size;
    }

    fn locate(index: usize) -> (usize, u32) {
        (index / WORD_BITS, 1u32 << (index % WORD_BITS))
    }

    /// Returns the bit at `index` as 0 or 1, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.get_bool(index).map(u8::from)
    }

    #[must_use]
    pub fn get_bool(&self, index: usize) -> Option<bool> {
        (index < self.size).then(|| {
            let (word, mask) = Self::locate(index);
            self.words[word] & mask != 0
        })
    }

    /// Sets the bit at `index` to 1 when `value` is non-zero, to 0 otherwise.
    ///
    /// See [`BitSet::set_bool`] for the return value.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        self.set_bool(index, value != 0)
    }

    /// Sets the bit at `index`, growing the set when `index` is past the end.
    ///
    /// Returns whether the stored bit changed. Growing always counts as a
    /// change, even when the written value is 0.
    pub fn set_bool(&mut self, index: usize, value: bool) -> bool {
        if index < self.size {
            self.write_bit(index, value)
        } else {
            self.grow(index + 1);
            self.write_bit(index, value);
            true
        }
    }

    fn write_bit(&mut self, index: usize, value: bool) -> bool {
        let (word, mask) = Self::locate(index);
        let old = self.words[word];
        let new = if value { old | mask } else { old & !mask };
        self.words[word] = new;
        old != new
    }

    // Callers grow the set to cover every written index first.
    fn write_bits(&mut self, offset: usize, bits: impl IntoIterator<Item = bool>) {
        for (index, bit) in (offset..).zip(bits) {
            self.write_bit(index, bit);
        }
    }

    /// Writes `text` left to right starting at bit `offset`.
    ///
    /// # Errors
    ///
    /// Fails when `text` is not a binary string. Nothing is written then.
    pub fn set_binary_string(&mut self, offset: usize, text: &str) -> Result<()> {
        let bits = parse_binary_string(text)?;
        self.grow(offset + bits.len());
        self.write_bits(offset, bits);
        Ok(())
    }

    /// Writes `value` as a `bit_width`-bit unsigned number, most significant
    /// bit first, starting at bit `offset`.
    ///
    /// # Errors
    ///
    /// Fails when `value` needs more than `bit_width` bits.
    pub fn set_number(&mut self, offset: usize, value: u64, bit_width: usize) -> Result<()> {
        if bit_width < 64 && value >> bit_width != 0 {
            bail!("{value} does not fit in {bit_width} bits");
        }
        self.grow(offset + bit_width);
        self.write_bits(offset, msb_first(value, bit_width));
        Ok(())
    }

    /// Writes each byte as 8 bits, most significant bit first.
    pub fn set_bytes(&mut self, offset: usize, bytes: &[u8]) {
        self.grow(offset + bytes.len() * 8);
        self.write_bits(
            offset,
            bytes.iter().flat_map(|&byte| msb_first(u64::from(byte), 8)),
        );
    }

    /// Writes the UTF-8 encoding of `text`, one 8-bit group per byte.
    pub fn set_utf8_string(&mut self, offset: usize, text: &str) {
        self.set_bytes(offset, text.as_bytes());
    }

    /// Writes the UTF-16 encoding of `text`, one 16-bit group per code unit.
    pub fn set_utf16_string(&mut self, offset: usize, text: &str) {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.grow(offset + units.len() * 16);
        self.write_bits(
            offset,
            units
                .into_iter()
                .flat_map(|unit| msb_first(u64::from(unit), 16)),
        );
    }

    /// Bits in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.words
            .iter()
            .flat_map(|&word| (0..WORD_BITS).map(move |shift| (word >> shift) & 1 == 1))
            .take(self.size)
    }

    #[must_use]
    pub fn to_binary_string(&self) -> String {
        self.iter().map(|bit| if bit { '1' } else { '0' }).collect()
    }

    /// Packs the bits into bytes, eight indices per byte, most significant
    /// bit first. A trailing group shorter than 8 bits is read as a number on
    /// its own, so `"111"` packs to `[7]`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let bits: Vec<bool> = self.iter().collect();
        bits.chunks(8)
            .map(|group| group.iter().fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit)))
            .collect()
    }

    /// Reads the whole set as a big-endian unsigned number.
    ///
    /// Returns `None` when the value does not fit in 64 bits. Leading zero
    /// bits never overflow.
    #[must_use]
    pub fn to_number(&self) -> Option<u64> {
        self.iter().try_fold(0u64, |acc, bit| {
            acc.checked_mul(2).map(|acc| acc | u64::from(bit))
        })
    }

    /// Copies bits `start..=end` into a new set. `end` defaults to the last
    /// index; a range running past the end is zero-extended.
    ///
    /// Returns `None` when `start` is out of range or `start >= end`.
    #[must_use]
    pub fn slice(&self, start: usize, end: Option<usize>) -> Option<Self> {
        if start >= self.size {
            return None;
        }
        let end = end.unwrap_or(self.size - 1);
        if start >= end {
            return None;
        }
        let len = end - start + 1;
        let mut slice = Self::new();
        slice.grow(len);
        slice.write_bits(0, self.iter().skip(start).take(len));
        Some(slice)
    }
}

fn msb_first(value: u64, width: usize) -> impl Iterator<Item = bool> {
    (0..width)
        .rev()
        .map(move |shift| shift < 64 && (value >> shift) & 1 == 1)
}
