// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt;

const WORD_BITS: u32 = u64::BITS;

/// Growable bitset over small non-negative integers.
///
/// This is the primitive set representation used throughout the directory:
/// handle sets, holder tables and membership queries all build on it. Storage
/// is a vector of 64-bit words; a value `v` lives at bit `v % 64` of word
/// `v / 64`. Capacity grows on insert and never shrinks, and words beyond
/// either operand's allocation are treated as zero by every binary operation.
#[derive(Clone, Default)]
pub struct IntSet {
    words: Vec<u64>,
}

impl IntSet {
    pub fn new() -> Self {
        IntSet::default()
    }

    /// A set pre-sized to cover values up to and including `max`.
    pub fn sized_for(max: u32) -> Self {
        IntSet {
            words: vec![0; (max / WORD_BITS) as usize + 1],
        }
    }

    pub fn insert(&mut self, value: u32) {
        let word = (value / WORD_BITS) as usize;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (value % WORD_BITS);
    }

    /// Returns `false` if `value` was not a member.
    pub fn remove(&mut self, value: u32) -> bool {
        let word = (value / WORD_BITS) as usize;
        let Some(slot) = self.words.get_mut(word) else {
            return false;
        };
        let mask = 1 << (value % WORD_BITS);
        let was_set = *slot & mask != 0;
        *slot &= !mask;
        was_set
    }

    pub fn contains(&self, value: u32) -> bool {
        let word = (value / WORD_BITS) as usize;
        self.words
            .get(word)
            .map_or(false, |w| w & (1 << (value % WORD_BITS)) != 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Empties the set. Allocated capacity is retained.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            next_word: 0,
            current: 0,
            base: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    pub fn union(&self, other: &IntSet) -> IntSet {
        self.combine(other, |a, b| a | b)
    }

    pub fn intersection(&self, other: &IntSet) -> IntSet {
        self.combine(other, |a, b| a & b)
    }

    /// Members of `self` that are not members of `other`.
    pub fn difference(&self, other: &IntSet) -> IntSet {
        self.combine(other, |a, b| a & !b)
    }

    pub fn symmetric_difference(&self, other: &IntSet) -> IntSet {
        self.combine(other, |a, b| a ^ b)
    }

    fn combine(&self, other: &IntSet, op: impl Fn(u64, u64) -> u64) -> IntSet {
        let len = self.words.len().max(other.words.len());
        let mut words = Vec::with_capacity(len);
        for idx in 0..len {
            let a = self.words.get(idx).copied().unwrap_or(0);
            let b = other.words.get(idx).copied().unwrap_or(0);
            words.push(op(a, b));
        }
        IntSet { words }
    }
}

impl PartialEq for IntSet {
    fn eq(&self, other: &Self) -> bool {
        let len = self.words.len().max(other.words.len());
        (0..len).all(|idx| {
            self.words.get(idx).copied().unwrap_or(0) == other.words.get(idx).copied().unwrap_or(0)
        })
    }
}

impl Eq for IntSet {}

impl fmt::Debug for IntSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u32> for IntSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        let mut set = IntSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<u32> for IntSet {
    fn extend<T: IntoIterator<Item = u32>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a IntSet {
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    words: &'a [u64],
    next_word: usize,
    current: u64,
    base: u32,
}

impl<'a> Iterator for Iter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.current == 0 {
            let word = *self.words.get(self.next_word)?;
            self.base = self.next_word as u32 * WORD_BITS;
            self.next_word += 1;
            self.current = word;
        }
        let bit = self.current.trailing_zeros();
        self.current &= self.current - 1;
        Some(self.base + bit)
    }
}
