//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece kind in a uniformly shuffled order
//! (Fisher-Yates). Pieces are drawn until the bag is empty, then a fresh
//! permutation is generated. The next queue sits on top of the bag and keeps a
//! fixed number of upcoming kinds visible.
//!
//! Randomness comes from a small seeded LCG so that a given seed always
//! produces the same sequence.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, NEXT_QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle with
    /// short periods.
    pub fn next_below(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Unconsumed permutation of the seven kinds.
#[derive(Debug, Clone)]
pub struct Bag {
    remaining: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl Bag {
    /// Create an empty bag; the first draw fills it.
    pub fn new(seed: u32) -> Self {
        Self {
            remaining: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        let mut kinds = PieceKind::ALL;
        self.rng.shuffle(&mut kinds);
        self.remaining = ArrayVec::from(kinds);
    }

    /// Draw the next kind, refilling first when the bag is exhausted.
    pub fn draw(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        // A refilled bag always holds seven kinds.
        self.remaining.pop().unwrap_or(PieceKind::I)
    }

    /// Kinds left before the next refill.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Drop the unconsumed kinds; the RNG keeps its state.
    pub fn reset(&mut self) {
        self.remaining.clear();
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Upcoming kinds, front first, topped up from a [`Bag`].
#[derive(Debug, Clone, Default)]
pub struct NextQueue {
    items: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
}

impl NextQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top the queue up to its full length.
    pub fn fill(&mut self, bag: &mut Bag) {
        while !self.items.is_full() {
            self.items.push(bag.draw());
        }
    }

    /// Take the front kind and refill behind it.
    pub fn pop_front(&mut self, bag: &mut Bag) -> PieceKind {
        self.fill(bag);
        let kind = self.items.remove(0);
        self.fill(bag);
        kind
    }

    pub fn peek(&self) -> Option<PieceKind> {
        self.items.first().copied()
    }

    pub fn as_slice(&self) -> &[PieceKind] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
