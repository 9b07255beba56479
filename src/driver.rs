//! The Driver Loop: repeatedly sweeps and traces back windows until the
//! cursor reaches an origin edge, then flushes the remaining tail.
//!
//! A direct port of `windowed_compute` in
//! `original_source/alignment/bpm_windowed.c`.

use crate::cigar::CigarOp;
use crate::error::AlignError;
use crate::pattern::CompiledPattern;
use crate::window::WindowMatrix;

/// Run the windowed aligner end to end and return `(cigar_string, score)`.
pub fn compute(
    pattern: &CompiledPattern,
    text: &[u8],
    window_size: usize,
    overlap_size: usize,
) -> Result<(String, i64), AlignError> {
    if window_size < 1 {
        return Err(AlignError::InvalidArgument(
            "window_size must be at least 1".to_string(),
        ));
    }
    if overlap_size >= window_size {
        return Err(AlignError::InvalidArgument(format!(
            "overlap_size ({overlap_size}) must be strictly less than window_size ({window_size})"
        )));
    }

    let mut matrix = WindowMatrix::new(pattern.len(), text.len(), window_size)?;
    let max_distance = window_size * crate::W;

    while matrix.pos_v >= 0 && matrix.pos_h >= 0 {
        log::trace!(
            "sweeping window at cursor (pos_v={}, pos_h={})",
            matrix.pos_v,
            matrix.pos_h
        );
        matrix.compute_window(pattern, text, max_distance);
        matrix.backtrace_window(pattern, text, overlap_size);
    }

    // Tail flush: whatever of the pattern or text remains once the other
    // hits the origin is pure indel.
    while matrix.pos_h >= 0 {
        matrix.cigar_mut().push(CigarOp::Ins);
        matrix.pos_h -= 1;
    }
    while matrix.pos_v >= 0 {
        matrix.cigar_mut().push(CigarOp::Del);
        matrix.pos_v -= 1;
    }

    let cigar = matrix.cigar();
    Ok((cigar.to_string(), cigar.score()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pattern: &[u8], text: &[u8], window_size: usize, overlap_size: usize) -> (String, i64) {
        let compiled = CompiledPattern::compile(pattern).unwrap();
        compute(&compiled, text, window_size, overlap_size).unwrap()
    }

    /// Aligning any alphabet-only pattern with itself yields all-`M` and
    /// score 0.
    #[test]
    fn identity_property() {
        for pattern in [&b"A"[..], b"ACGTACGT", b"GATTACA", &vec![b'A'; 200]] {
            let (cigar, score) = run(pattern, pattern, 1, 0);
            assert_eq!(cigar, "M".repeat(pattern.len()));
            assert_eq!(score, 0);
        }
    }

    /// An empty pattern (`m=0`) emits only `I`; an empty text (`n=0`)
    /// emits only `D`.
    #[test]
    fn empty_pattern_emits_only_insertions() {
        let (cigar, score) = run(b"", b"ACGT", 1, 0);
        assert_eq!(cigar, "IIII");
        assert_eq!(score, 4);
    }

    #[test]
    fn empty_text_emits_only_deletions() {
        let (cigar, score) = run(b"ACGT", b"", 1, 0);
        assert_eq!(cigar, "DDDD");
        assert_eq!(score, 4);
    }

    #[test]
    fn both_empty_yields_empty_cigar() {
        let (cigar, score) = run(b"", b"", 1, 0);
        assert_eq!(cigar, "");
        assert_eq!(score, 0);
    }

    /// `#M + #X + #D == m` and `#M + #X + #I == n` for every produced
    /// CIGAR, checked over a batch of differently-shaped inputs including a
    /// multi-window case.
    #[test]
    fn cigar_length_law_holds() {
        let cases: [(&[u8], &[u8], usize, usize); 4] = [
            (b"ACGT", b"ACCT", 1, 0),
            (b"ACGT", b"ACG", 1, 0),
            (b"ACG", b"ACGT", 1, 0),
            (b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
             b"CCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC", 2, 1),
        ];
        for (pattern, text, window_size, overlap_size) in cases {
            let (cigar, _score) = run(pattern, text, window_size, overlap_size);
            let m_count = cigar.matches('M').count();
            let x_count = cigar.matches('X').count();
            let i_count = cigar.matches('I').count();
            let d_count = cigar.matches('D').count();
            assert_eq!(m_count + x_count + d_count, pattern.len());
            assert_eq!(m_count + x_count + i_count, text.len());
        }
    }

    /// Repeated runs with identical inputs produce bitwise-identical CIGAR
    /// output.
    #[test]
    fn deterministic_across_runs() {
        let pattern = b"ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTA";
        let text = b"ACGTACGTACGTTCGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGAACGTACGTACGTACGTA";
        let first = run(pattern, text, 2, 1);
        let second = run(pattern, text, 2, 1);
        assert_eq!(first, second);
    }

    /// overlap_size must be strictly less than window_size.
    #[test]
    fn rejects_overlap_not_smaller_than_window() {
        let compiled = CompiledPattern::compile(b"ACGT").unwrap();
        assert!(compute(&compiled, b"ACGT", 2, 2).is_err());
        assert!(compute(&compiled, b"ACGT", 2, 3).is_err());
    }

    /// A cursor exactly on a (block, word) boundary still makes progress
    /// each sweep+trace iteration.
    #[test]
    fn progress_guarantee_on_block_boundary() {
        let pattern = vec![b'A'; 128]; // exactly 2 blocks for W=64.
        let text = pattern.clone();
        let (cigar, score) = run(&pattern, &text, 1, 0);
        assert_eq!(cigar, "M".repeat(128));
        assert_eq!(score, 0);
    }
}
