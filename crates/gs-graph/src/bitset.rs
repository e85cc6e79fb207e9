//! Growable bit vector for dense non-negative indices.
//!
//! Bits are packed into 64-bit words; word `i / 64` holds bit `i % 64`.
//! The word list grows on the first `set(i, true)` past the current end, so
//! set/test are O(1) amortised and the set never needs a capacity up front.

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, Debug, Default)]
pub struct Bitset {
    words: Vec<u64>,
}

impl Bitset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for indices `< bits`.
    pub fn with_capacity(bits: usize) -> Self {
        Self { words: Vec::with_capacity(bits.div_ceil(WORD_BITS)) }
    }

    /// Set or clear bit `index`.
    ///
    /// Clearing a bit beyond the current end is a no-op and does not grow
    /// the storage.
    pub fn set(&mut self, index: usize, value: bool) {
        let (word, bit) = (index / WORD_BITS, index % WORD_BITS);
        if word >= self.words.len() {
            if !value {
                return;
            }
            self.words.resize(word + 1, 0);
        }
        if value {
            self.words[word] |= 1u64 << bit;
        } else {
            self.words[word] &= !(1u64 << bit);
        }
    }

    /// `true` if bit `index` is set.
    #[inline]
    pub fn exists(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|w| w & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Position of the highest set bit plus one; 0 when no bit is set.
    pub fn len(&self) -> usize {
        self.words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |i| i * WORD_BITS + (WORD_BITS - self.words[i].leading_zeros() as usize))
    }

    /// `true` when no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}
