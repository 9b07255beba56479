//! The Window Matrix: owns a window's `Pv`/`Mv` bit-planes and the output
//! CIGAR buffer, and implements the window sweep and window traceback.
//!
//! A structured Rust port of `windowed_matrix_t`, `windowed_compute_window`,
//! and `windowed_backtrace_window` in
//! `original_source/alignment/bpm_windowed.c`. The flat `Pv`/`Mv` arrays and
//! their `BPM_PATTERN_BDP_IDX` indexing macro become a small 2D accessor
//! here; everything else (variable names, formulas, tie-break order) is kept
//! as close to the source as idiomatic Rust allows.

use crate::cigar::{Cigar, CigarOp};
use crate::encoding::encode;
use crate::error::AlignError;
use crate::pattern::CompiledPattern;
use crate::B;
use crate::W;

/// Owns the `Pv`/`Mv` bit-planes for one window and the CIGAR output buffer.
///
/// `Pv`/`Mv` are stored flattened, row-major by column: `[col * window_size +
/// row]`. A column holds `window_size` blocks (one per pattern block-row in
/// the window); there are `W * window_size + 1` columns (column 0 is the
/// reset column).
pub struct WindowMatrix {
    window_size: usize,
    pv: Vec<B>,
    mv: Vec<B>,
    /// Cursor into the pattern; `-1` once the pattern is exhausted.
    pub pos_v: i64,
    /// Cursor into the text; `-1` once the text is exhausted.
    pub pos_h: i64,
    cigar: Cigar,
}

impl WindowMatrix {
    /// Allocate a window matrix for a pattern of length `m`, a text of
    /// length `n`, and a window height/width of `window_size` blocks.
    pub fn new(m: usize, n: usize, window_size: usize) -> Result<Self, AlignError> {
        if window_size < 1 {
            return Err(AlignError::InvalidArgument(
                "window_size must be at least 1".to_string(),
            ));
        }
        let cols = window_size * W + 1;
        let len = cols * window_size;
        Ok(Self {
            window_size,
            pv: vec![0; len],
            mv: vec![0; len],
            pos_v: m as i64 - 1,
            pos_h: n as i64 - 1,
            cigar: Cigar::new(m, n),
        })
    }

    #[inline(always)]
    fn idx(&self, col: usize, row: usize) -> usize {
        col * self.window_size + row
    }

    #[inline(always)]
    fn pv_at(&self, col: usize, row: usize) -> B {
        self.pv[self.idx(col, row)]
    }

    #[inline(always)]
    fn mv_at(&self, col: usize, row: usize) -> B {
        self.mv[self.idx(col, row)]
    }

    #[inline(always)]
    fn set(&mut self, col: usize, row: usize, pv: B, mv: B) {
        let i = self.idx(col, row);
        self.pv[i] = pv;
        self.mv[i] = mv;
    }

    /// `windowed_reset_search_cutoff`: initialize column 0 of `Pv`/`Mv` as
    /// the identity column (`Pv = all-ones`, `Mv = 0`) across the whole
    /// window height.
    ///
    /// Always sized off the window's own height (`window_size` blocks),
    /// never off a caller-supplied distance: `compute_window`'s own C
    /// counterpart (`windowed_compute_window`) hardcodes
    /// `BPM_W64_LENGTH*window_size` here regardless of whatever
    /// `max_distance` means to its caller.
    fn reset_search_cutoff(&mut self) {
        for row in 0..self.window_size {
            self.set(0, row, B::MAX, 0);
        }
    }

    /// Fill this window's `Pv`/`Mv` columns by iterating text positions
    /// left-to-right and, within each, pattern blocks top-to-bottom,
    /// threading the horizontal carry between blocks.
    ///
    /// `max_distance` is accepted for interface parity with the C source's
    /// `windowed_compute_window`, which also never reads its own
    /// `max_distance` argument; this aligner always resets the full window
    /// height and never prunes the sweep.
    pub fn compute_window(&mut self, pattern: &CompiledPattern, text: &[u8], _max_distance: usize) {
        let window_size = self.window_size;
        self.reset_search_cutoff();

        let pos_v_fi = self.pos_v / W as i64;
        let pos_h_fi = self.pos_h;

        let pos_v = (pos_v_fi - (window_size as i64 - 1)).max(0);
        let pos_h = ((pos_h_fi / W as i64) * W as i64 - (window_size as i64 - 1) * W as i64).max(0);

        let steps_v = (pos_v_fi - pos_v) as usize;
        let steps_h = (pos_h_fi - pos_h) as usize;

        let pos_v = pos_v as usize;
        let pos_h = pos_h as usize;

        for t in 0..=steps_h {
            let c = encode(text[pos_h + t]);
            let mut ph_in: B = 1;
            let mut mh_in: B = 0;
            for i in 0..=steps_v {
                let pv_in = self.pv_at(t, i);
                let mv_in = self.mv_at(t, i);
                let eq = pattern.eq_mask(pos_v + i, c);
                let (pv_out, mv_out, ph_out, mh_out) = crate::block::advance(eq, pv_in, mv_in, ph_in, mh_in);
                self.set(t + 1, i, pv_out, mv_out);
                ph_in = ph_out;
                mh_in = mh_out;
            }
        }
    }

    /// Walk back through the just-filled window, emitting CIGAR ops, until
    /// the overlap boundary or the matrix origin is reached.
    ///
    /// `overlap_size` must be strictly less than `window_size`.
    pub fn backtrace_window(&mut self, pattern: &CompiledPattern, text: &[u8], overlap_size: usize) {
        let window_size = self.window_size;
        debug_assert!(overlap_size < window_size);

        let w = W as i64;
        let k = window_size as i64;
        let o = overlap_size as i64;

        let bound = |pos: i64, blocks_back: i64| -> i64 {
            let shifted = pos - w * blocks_back;
            if shifted > 0 {
                (shifted / w) * w
            } else {
                0
            }
        };

        let h_min = bound(self.pos_h, k - 1);
        let h_overlap = bound(self.pos_h, k - o - 1);
        let v_min = bound(self.pos_v, k - 1);
        let v_overlap = bound(self.pos_v, k - o - 1);

        let mut v = self.pos_v;
        let mut h = self.pos_h;
        let mut emitted = 0usize;

        while v >= v_overlap && h >= h_overlap {
            Self::step(
                &self.pv,
                &self.mv,
                window_size,
                v_min,
                h_min,
                text,
                pattern,
                &mut v,
                &mut h,
                &mut self.cigar,
            );
            emitted += 1;
        }

        // A window whose overlap boundary coincides with the cursor would
        // otherwise emit zero ops, stalling the driver loop forever; force
        // one more step to guarantee progress.
        if emitted == 0 && v >= 0 && h >= 0 {
            Self::step(
                &self.pv,
                &self.mv,
                window_size,
                v_min,
                h_min,
                text,
                pattern,
                &mut v,
                &mut h,
                &mut self.cigar,
            );
        }

        self.pos_v = v;
        self.pos_h = h;
    }

    /// One backtrace step: consult `Pv`/`Mv` at the current cell and emit
    /// the corresponding op. The tie-break order — `D` before `I` before a
    /// diagonal typed by character equality — is load-bearing and must be
    /// preserved bit-exactly.
    #[allow(clippy::too_many_arguments)]
    fn step(
        pv: &[B],
        mv: &[B],
        window_size: usize,
        v_min: i64,
        h_min: i64,
        text: &[u8],
        pattern: &CompiledPattern,
        v: &mut i64,
        h: &mut i64,
        cigar: &mut Cigar,
    ) {
        let w = W as i64;
        let block = ((*v - v_min) / w) as usize;
        let col = (*h - h_min + 1) as usize;
        let mask = 1u64 << (*v % w);
        if pv[col * window_size + block] & mask != 0 {
            cigar.push(CigarOp::Del);
            *v -= 1;
        } else if mv[(col - 1) * window_size + block] & mask != 0 {
            cigar.push(CigarOp::Ins);
            *h -= 1;
        } else if text[*h as usize] == pattern.bytes()[*v as usize] {
            cigar.push(CigarOp::Match);
            *h -= 1;
            *v -= 1;
        } else {
            cigar.push(CigarOp::Mismatch);
            *h -= 1;
            *v -= 1;
        }
    }

    pub fn cigar(&self) -> &Cigar {
        &self.cigar
    }

    pub fn cigar_mut(&mut self) -> &mut Cigar {
        &mut self.cigar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(pattern: &[u8], text: &[u8], window_size: usize, overlap_size: usize) -> (String, i64) {
        let compiled = CompiledPattern::compile(pattern).unwrap();
        crate::driver::compute(&compiled, text, window_size, overlap_size).unwrap()
    }

    // Single-block window (window_size=1) scenarios.
    #[test]
    fn s1_identical_sequences() {
        let (cigar, score) = align(b"ACGT", b"ACGT", 1, 0);
        assert_eq!(cigar, "MMMM");
        assert_eq!(score, 0);
    }

    #[test]
    fn s2_single_mismatch() {
        let (cigar, score) = align(b"ACGT", b"ACCT", 1, 0);
        assert_eq!(cigar, "MMXM");
        assert_eq!(score, 1);
    }

    #[test]
    fn s3_deletion() {
        let (cigar, score) = align(b"ACGT", b"ACG", 1, 0);
        assert_eq!(cigar, "MMMD");
        assert_eq!(score, 1);
    }

    #[test]
    fn s4_insertion() {
        let (cigar, score) = align(b"ACG", b"ACGT", 1, 0);
        assert_eq!(cigar, "MMMI");
        assert_eq!(score, 1);
    }

    #[test]
    fn s5_all_mismatches() {
        let (cigar, score) = align(b"AAAA", b"TTTT", 1, 0);
        assert_eq!(cigar, "XXXX");
        assert_eq!(score, 4);
    }

    // Multi-window path: m=81 spans 2 blocks, overlap exercised.
    #[test]
    fn s6_multi_window_with_overlap() {
        let mut pattern = vec![b'A'; 80];
        pattern.push(b'C');
        let text = pattern.clone();
        let (cigar, score) = align(&pattern, &text, 2, 1);
        assert_eq!(cigar, "M".repeat(81));
        assert_eq!(score, 0);
    }
}
