//! Maps a DNA character to a 2-bit code in `{0,1,2,3}`.
//!
//! Grounded on `bio::alphabets::RankTransform`, the same alphabet-to-rank
//! mapper `pa-bitpacking::profile::ScatterProfile::build` and
//! `pa-bitpacking/src/main.rs` use to turn `ACGT` text into a dense rank
//! alphabet. `RankTransform::get` panics on characters outside its alphabet,
//! but an unrecognized base must never raise an error here, so unrecognized
//! bytes are intercepted and mapped to a pinned fallback code before
//! reaching the transform.

use bio::alphabets::{Alphabet, RankTransform};
use once_cell_like::Lazy;

/// Canonical code for any byte outside `ACGT` (upper or lower case).
///
/// Pinned to `0` (`A`), the same "first symbol" fallback Myers-style bit
/// parallel aligners conventionally use for wildcard/ambiguous bases: it
/// keeps unknown characters from ever being treated as *more* likely to
/// mismatch than a real base, and is cheap to special-case in tests.
pub const FALLBACK_CODE: u8 = 0;

static RANK_TRANSFORM: Lazy<RankTransform> =
    Lazy::new(|| RankTransform::new(&Alphabet::new(b"ACGTacgt")));

/// Encode a single DNA character to its 2-bit code.
///
/// `A/a -> 0`, `C/c -> 1`, `G/g -> 2`, `T/t -> 3`. Anything else maps to
/// [`FALLBACK_CODE`].
#[inline(always)]
pub fn encode(c: u8) -> u8 {
    // `RankTransform::get` panics on characters outside its alphabet, so
    // membership is checked through the public `ranks` map first.
    match RANK_TRANSFORM.ranks.get(&c) {
        // `ACGTacgt` was inserted in that order, so lowercase ranks are the
        // uppercase ones shifted by 4; fold them back onto `{0,1,2,3}`.
        Some(&rank) => rank % 4,
        None => FALLBACK_CODE,
    }
}

/// Encode a whole sequence in place into fresh 2-bit codes.
pub fn encode_seq(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&c| encode(c)).collect()
}

mod once_cell_like {
    use std::sync::OnceLock;

    /// Minimal lazily-initialized static, avoiding an extra `once_cell`
    /// dependency the example pack does not otherwise carry.
    pub struct Lazy<T> {
        cell: OnceLock<T>,
        init: fn() -> T,
    }

    impl<T> Lazy<T> {
        pub const fn new(init: fn() -> T) -> Self {
            Self {
                cell: OnceLock::new(),
                init,
            }
        }
    }

    impl<T> std::ops::Deref for Lazy<T> {
        type Target = T;
        fn deref(&self) -> &T {
            self.cell.get_or_init(self.init)
        }
    }
}
