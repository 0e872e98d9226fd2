//! Pre-revealed vowels and the one-time lifeline
//!
//! Initial locks are computed once per puzzle from the generation settings.
//! The lifeline picks one position that is neither locked nor revealed yet.

use super::letters::{LockedLetters, RevealedLetters};
use crate::core::Word;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Letters treated as vowels for pre-reveal
pub const VOWELS: &[u8] = b"aeiou";

/// Number of lifeline reveals granted per puzzle
pub const LIFELINE_BUDGET: u8 = 1;

/// How vowel positions are chosen when fewer are requested than exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelSelection {
    /// Earliest vowel positions in the word
    Leftmost,
    /// Shuffled with a seed derived from the secret word
    ///
    /// The same puzzle always reveals the same positions, so a reload before
    /// anything is persisted shows an identical board.
    #[default]
    Seeded,
}

/// Generation settings for pre-revealed letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSettings {
    pub reveal_vowels: bool,
    pub vowel_count: usize,
    #[serde(default)]
    pub selection: VowelSelection,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            reveal_vowels: false,
            vowel_count: 1,
            selection: VowelSelection::Seeded,
        }
    }
}

/// Compute the positions locked before the first guess
///
/// Empty unless `reveal_vowels` is set. Otherwise up to `vowel_count` vowel
/// positions are locked, picked according to `selection`.
#[must_use]
pub fn compute_initial_locks(secret: &Word, settings: &RevealSettings) -> LockedLetters {
    if !settings.reveal_vowels || settings.vowel_count == 0 {
        return LockedLetters::new();
    }

    let mut positions: Vec<usize> = secret
        .chars()
        .iter()
        .enumerate()
        .filter(|(_, b)| VOWELS.contains(b))
        .map(|(i, _)| i)
        .collect();

    if settings.selection == VowelSelection::Seeded {
        let mut rng = StdRng::seed_from_u64(word_seed(secret));
        positions.shuffle(&mut rng);
    }

    positions.truncate(settings.vowel_count);
    log::debug!("pre-revealing vowel positions {positions:?}");

    positions
        .into_iter()
        .map(|i| (i, char::from(secret.char_at(i))))
        .collect()
}

/// Pick a lifeline position uniformly among the eligible ones
///
/// Eligible positions are neither locked nor already revealed. Returns `None`
/// when nothing is left to reveal.
pub fn pick_lifeline_position<R: Rng + ?Sized>(
    length: usize,
    locked: &LockedLetters,
    revealed: &RevealedLetters,
    rng: &mut R,
) -> Option<usize> {
    let eligible: Vec<usize> = (0..length)
        .filter(|&i| !locked.contains(i) && !revealed.contains(i))
        .collect();
    eligible.choose(rng).copied()
}

/// Stable seed from the word's letters
fn word_seed(word: &Word) -> u64 {
    // FNV-1a
    word.chars().iter().fold(0xcbf2_9ce4_8422_2325_u64, |acc, &b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(count: usize, selection: VowelSelection) -> RevealSettings {
        RevealSettings {
            reveal_vowels: true,
            vowel_count: count,
            selection,
        }
    }

    #[test]
    fn no_locks_when_disabled() {
        let secret = Word::new("crane").unwrap();
        let locks = compute_initial_locks(&secret, &RevealSettings::default());
        assert!(locks.is_empty());
    }

    #[test]
    fn leftmost_picks_first_vowels() {
        let secret = Word::new("dolphin").unwrap();
        let locks = compute_initial_locks(&secret, &settings(1, VowelSelection::Leftmost));
        assert_eq!(locks.iter().collect::<Vec<_>>(), vec![(1, 'o')]);
    }

    #[test]
    fn count_is_capped_by_available_vowels() {
        let secret = Word::new("crane").unwrap();
        let locks = compute_initial_locks(&secret, &settings(4, VowelSelection::Seeded));
        assert_eq!(locks.iter().collect::<Vec<_>>(), vec![(2, 'a'), (4, 'e')]);
    }

    #[test]
    fn seeded_selection_is_stable() {
        let secret = Word::new("octopus").unwrap();
        let first = compute_initial_locks(&secret, &settings(2, VowelSelection::Seeded));
        let second = compute_initial_locks(&secret, &settings(2, VowelSelection::Seeded));
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        for (pos, letter) in first.iter() {
            assert!(VOWELS.contains(&(letter as u8)));
            assert_eq!(secret.char_at(pos), letter as u8);
        }
    }

    #[test]
    fn lifeline_skips_locked_and_revealed() {
        let locked: LockedLetters = [(0, 'c'), (1, 'r'), (2, 'a')].into_iter().collect();
        let revealed: RevealedLetters = [3].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                pick_lifeline_position(5, &locked, &revealed, &mut rng),
                Some(4)
            );
        }
    }

    #[test]
    fn lifeline_none_when_everything_is_known() {
        let secret = Word::new("crane").unwrap();
        let locked = LockedLetters::complete(&secret);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            pick_lifeline_position(5, &locked, &RevealedLetters::new(), &mut rng),
            None
        );
    }
}
