//! The Myers/Hyyrö bit-parallel block-advance recurrence.
//!
//! One call advances a single 64-row block of the edit-distance DP matrix by
//! one text column, given the vertical state `(Pv, Mv)` coming from the row
//! above and the horizontal carry `(PHin, MHin)` coming from the block above
//! it in the same column. This is a direct, bit-exact port of
//! `BPM_ADVANCE_BLOCK` in QuickEd's `bpm_windowed.c`, in the calling
//! convention of `pa-bitpacking::compute_block` (horizontal deltas passed as
//! an explicit `(p, m)` bit pair rather than folded into a signed delta).

use crate::B;

/// Advance one 64-wide block.
///
/// `eq` is the PEQ row for this block/character: bit `i` set iff pattern
/// position `i` (within the block) equals the current text character.
/// `ph_in`/`mh_in` are single bits (0 or 1) encoding the horizontal delta
/// flowing in from the block above: `ph_in=1` means `+1`, `mh_in=1` means
/// `-1`, both zero means `0`. They are mutually exclusive.
///
/// Returns `(pv_out, mv_out, ph_out, mh_out)`: the updated vertical state for
/// this block, and the horizontal carry to pass to the block below.
#[inline(always)]
pub fn advance(eq: B, pv: B, mv: B, ph_in: B, mh_in: B) -> (B, B, B, B) {
    debug_assert!(ph_in <= 1 && mh_in <= 1 && ph_in & mh_in == 0);

    let xv = eq | mv;
    let eq = eq | mh_in;
    // The wrapping add is the 'folding' trick that makes this recurrence
    // non-local and prevents naive SIMDification; see Myers'99.
    let xh = (((eq & pv).wrapping_add(pv)) ^ pv) | eq;
    let ph = mv | !(xh | pv);
    let mh = pv & xh;

    let ph_out = ph >> 63;
    let mh_out = mh >> 63;

    let ph = (ph << 1) | ph_in;
    let mh = (mh << 1) | mh_in;

    let pv_out = mh | !(xv | ph);
    let mv_out = ph & xv;
    (pv_out, mv_out, ph_out, mh_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Starting from the identity column and an always-matching row, the
    /// block stays the identity column and reports a horizontal `+1`.
    #[test]
    fn identity_column_matches_everything() {
        let (pv, mv, ph, mh) = advance(u64::MAX, u64::MAX, 0, 1, 0);
        assert_eq!(pv, u64::MAX);
        assert_eq!(mv, 0);
        assert_eq!(ph, 1);
        assert_eq!(mh, 0);
    }

    /// A single mismatching bit at row 0 forces that row to a `-1` vertical
    /// delta; everything below it remains the identity `+1`.
    #[test]
    fn single_mismatch_dips_then_recovers() {
        let eq = !1u64; // bit 0 clear, all else set.
        let (pv, mv, ph, mh) = advance(eq, u64::MAX, 0, 1, 0);
        assert_eq!(mv & 1, 1, "row 0 should register a -1 vertical delta");
        assert_eq!(pv & 1, 0);
        assert_eq!(ph, 1);
        assert_eq!(mh, 0);
    }

    #[test]
    fn carries_are_single_bits() {
        let (_, _, ph, mh) = advance(0, u64::MAX, 0, 0, 1);
        assert!(ph <= 1);
        assert!(mh <= 1);
    }
}
