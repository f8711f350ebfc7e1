// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rand::Rng;
use rand::seq::SliceRandom;

/// Outcome of [`discover`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discovery<T> {
    /// The chosen candidate.
    Region(T),
    /// There was nothing left to choose from.
    Exhausted,
}

/// Picks one of `candidates` uniformly at random.
pub fn discover<T: Clone, R: Rng + ?Sized>(candidates: &[T], rng: &mut R) -> Discovery<T> {
    match candidates.choose(rng) {
        Some(choice) => Discovery::Region(choice.clone()),
        None => Discovery::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Discovery, discover};

    #[test]
    fn chooses_only_from_candidates() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates = ["PER", "CHL", "ARG"];
        for _ in 0..50 {
            match discover(&candidates, &mut rng) {
                Discovery::Region(code) => assert!(candidates.contains(&code)),
                Discovery::Exhausted => panic!("candidates were available"),
            }
        }
    }

    #[test]
    fn reaches_every_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..200 {
            if let Discovery::Region(i) = discover(&[0_usize, 1, 2], &mut rng) {
                seen[i] = true;
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn empty_candidates_are_exhausted() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(discover::<u8, _>(&[], &mut rng), Discovery::Exhausted);
    }
}
