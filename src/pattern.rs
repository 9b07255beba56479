//! The Pattern Precompiler: builds the per-block PEQ equality masks, level
//! mask, initial scores, and residual-length table for a compiled pattern.
//!
//! A direct, bit-exact port of `windowed_pattern_compile` in
//! `original_source/alignment/bpm_windowed.c`, restructured as a Rust struct
//! the way `pa-bitpacking::profile` builds its `Vec<[u64; 4]>` PEQ-like
//! profile for a text.

use crate::encoding::encode;
use crate::error::AlignError;
use crate::{B, W};

/// Number of DNA symbols the pattern alphabet carries.
const ALPHABET_LEN: usize = 4;

/// An immutable, precompiled pattern ready to be swept over by the windowed
/// aligner. Shareable read-only across many concurrent alignments.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Original pattern bytes, length `m`.
    pattern: Vec<u8>,
    /// `ceil(m / W)`.
    num_blocks: usize,
    /// `PEQ[block][symbol]`, shape `[num_blocks][4]`.
    peq: Vec<[B; ALPHABET_LEN]>,
    /// One mask per block; only used by callers that want to find the
    /// "active" bit of the top block (kept for parity with the C source's
    /// `level_mask`, consumed by `pattern_left`-style residual reasoning).
    level_mask: Vec<B>,
    /// Per-block initial horizontal score contribution.
    init_score: Vec<i64>,
    /// `pattern_left[k]`: residual pattern length below block `k`, length
    /// `num_blocks + 1`.
    pattern_left: Vec<usize>,
}

impl CompiledPattern {
    /// Compile `pattern` (bytes over the DNA alphabet; unrecognized bytes
    /// are silently encoded via [`crate::encoding::encode`]).
    ///
    /// `m == 0` is legal and compiles to an empty alignment. The only
    /// failure mode is a pattern so long that block/word index arithmetic
    /// would overflow `usize`.
    pub fn compile(pattern: &[u8]) -> Result<Self, AlignError> {
        let m = pattern.len();
        if m > (usize::MAX / 2) {
            return Err(AlignError::InvalidArgument(format!(
                "pattern length {m} is too large to index"
            )));
        }

        // `.max(1)`: the C source computes `top = pattern_num_words64 - 1`
        // unconditionally, which underflows for `m == 0`. A windowed aligner
        // never dereferences PEQ for an empty pattern (the driver loop's
        // `pos_v >= 0` guard is false from the start), so keeping one dummy
        // all-padding block here is a no-op at runtime and sidesteps the
        // underflow rather than reproducing it.
        let num_blocks = m.div_ceil(W).max(1);
        let peq_len = num_blocks * W;
        let pattern_mod = m % W;

        let mut peq = vec![[0 as B; ALPHABET_LEN]; num_blocks];
        for (i, &c) in pattern.iter().enumerate() {
            let code = encode(c) as usize;
            let block = i / W;
            let mask = 1u64 << (i % W);
            peq[block][code] |= mask;
        }
        // Padding bits: positions in [m, peq_len) match every symbol, so
        // they never contribute to the distance.
        for i in m..peq_len {
            let block = i / W;
            let mask = 1u64 << (i % W);
            for row in peq[block].iter_mut() {
                *row |= mask;
            }
        }

        let top = num_blocks - 1;
        let mut level_mask = vec![0 as B; num_blocks];
        let mut init_score = vec![0i64; num_blocks];
        let mut pattern_left = vec![0usize; num_blocks + 1];

        let mut left = m;
        for k in 0..top {
            level_mask[k] = 1u64 << 63;
            init_score[k] = W as i64;
            pattern_left[k] = left;
            left = left.saturating_sub(W);
        }
        for k in top..=num_blocks {
            pattern_left[k] = left;
            left = left.saturating_sub(W);
        }
        if pattern_mod > 0 {
            level_mask[top] = 1u64 << (pattern_mod - 1);
            init_score[top] = pattern_mod as i64;
        } else {
            level_mask[top] = 1u64 << 63;
            init_score[top] = W as i64;
        }

        Ok(Self {
            pattern: pattern.to_vec(),
            num_blocks,
            peq,
            level_mask,
            init_score,
            pattern_left,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    #[inline(always)]
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.pattern
    }

    /// `PEQ[block][symbol]`.
    #[inline(always)]
    pub fn eq_mask(&self, block: usize, symbol: u8) -> B {
        self.peq[block][symbol as usize]
    }

    #[inline(always)]
    pub fn level_mask(&self, block: usize) -> B {
        self.level_mask[block]
    }

    #[inline(always)]
    pub fn init_score(&self, block: usize) -> i64 {
        self.init_score[block]
    }

    #[inline(always)]
    pub fn pattern_left(&self, block: usize) -> usize {
        self.pattern_left[block]
    }
}
