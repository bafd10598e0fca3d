//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm. Each bag holds one of each
//! piece (I, O, T, S, Z, J, L), shuffled. Pieces are served from the bag in
//! order; as soon as the last one is drawn a freshly shuffled bag replaces it.
//! The same kind can therefore appear twice in a row across a bag boundary.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// Anything that can hand out the next piece kind.
pub trait PieceSource {
    /// Draw the next piece.
    fn next_kind(&mut self) -> PieceKind;

    /// Preview the next piece without drawing it, if the source can tell.
    fn peek_kind(&self) -> Option<PieceKind> {
        None
    }
}

/// A seed drawn from the thread-local OS-seeded generator.
pub fn random_seed() -> u64 {
    rand::random()
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag; always < 7 between calls
    cursor: usize,
    rng: StdRng,
}

impl BagRandomizer {
    /// Create a new randomizer with the given seed
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            cursor: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        bag.refill();
        bag
    }

    /// Generate a new shuffled bag (Fisher-Yates)
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.bag[self.cursor];
        self.cursor += 1;
        if self.cursor >= self.bag.len() {
            self.refill();
        }
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.bag[self.cursor]
    }

    /// Pieces left in the current bag, next first
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }
}

impl PieceSource for BagRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        self.draw()
    }

    fn peek_kind(&self) -> Option<PieceKind> {
        Some(self.peek())
    }
}

/// Plays back a fixed list of kinds, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, cursor: 0 }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.cursor];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }

    fn peek_kind(&self) -> Option<PieceKind> {
        Some(self.kinds[self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(drawn: &[PieceKind]) {
        assert_eq!(drawn.len(), 7);
        for kind in PieceKind::ALL {
            assert_eq!(
                drawn.iter().filter(|&&k| k == kind).count(),
                1,
                "kind {:?} in {:?}",
                kind,
                drawn
            );
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = BagRandomizer::new(12345);
        let mut b = BagRandomizer::new(12345);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_initial_bag_is_full() {
        let bag = BagRandomizer::new(1);
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_every_aligned_bag_is_a_permutation() {
        let mut bag = BagRandomizer::new(7);
        for _ in 0..20 {
            let drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
            assert_permutation(&drawn);
        }
    }

    #[test]
    fn test_bag_refills_eagerly() {
        let mut bag = BagRandomizer::new(3);
        for _ in 0..7 {
            bag.draw();
        }
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_peek_matches_draw_across_boundary() {
        let mut bag = BagRandomizer::new(99);
        for _ in 0..15 {
            let peeked = bag.peek();
            assert_eq!(peeked, bag.draw());
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut src = ScriptedSource::new([PieceKind::O, PieceKind::I]);
        assert_eq!(src.peek_kind(), Some(PieceKind::O));
        assert_eq!(src.next_kind(), PieceKind::O);
        assert_eq!(src.next_kind(), PieceKind::I);
        assert_eq!(src.next_kind(), PieceKind::O);
    }
}
