//! A windowed bit-parallel Myers (BPM) edit-distance aligner for DNA
//! sequences.
//!
//! The crate sweeps the classic Myers'99 bit-parallel DP matrix one fixed
//! window at a time instead of materializing it in full, tracing each
//! window back into a CIGAR edit script as soon as it is filled.

pub mod aligner;
pub mod block;
pub mod cigar;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod params;
pub mod pattern;
pub mod window;

pub use aligner::{AlignResult, Aligner};
pub use cigar::{Cigar, CigarOp};
pub use error::AlignError;
pub use params::{params_default, Algo, Params, Status};
pub use pattern::CompiledPattern;

/// The type used for all bitvectors: one machine word per DP block.
pub(crate) type B = u64;
/// The number of DP rows packed into one bitvector.
pub(crate) const W: usize = B::BITS as usize;
