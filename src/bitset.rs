//! Dense bit set over gate positions.
//!
//! Used as the mark set of the reachability pass: bit `i` is set when the
//! gate at position `i` has been reached from the root.

/// A fixed-capacity bit set backed by `u64` words.
#[derive(Debug, Clone, Default)]
pub struct BitSet {
    words: Vec<u64>,
    count: usize,
}

impl BitSet {
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty bit set able to hold `capacity` bits.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(Self::BITS_PER_WORD)],
            count: 0,
        }
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        let word = index / Self::BITS_PER_WORD;
        let mask = 1u64 << (index % Self::BITS_PER_WORD);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }

    /// Sets bit `index`. Returns true if it was not set before.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the capacity.
    pub fn insert(&mut self, index: usize) -> bool {
        let word = index / Self::BITS_PER_WORD;
        let mask = 1u64 << (index % Self::BITS_PER_WORD);
        let fresh = self.words[word] & mask == 0;
        if fresh {
            self.words[word] |= mask;
            self.count += 1;
        }
        fresh
    }

    /// Iterates over set bits in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_idx, &word)| {
                let mut rest = word;
                std::iter::from_fn(move || {
                    if rest == 0 {
                        return None;
                    }
                    let bit = rest.trailing_zeros() as usize;
                    rest &= rest - 1;
                    Some(word_idx * Self::BITS_PER_WORD + bit)
                })
            })
    }
}
