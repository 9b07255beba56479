//! Error type for the public API.
//!
//! Grounded on `quicked_status_t` in `original_source/quicked/quicked.h`,
//! which distinguishes several failure kinds at the C level. `UnknownAlgo`
//! and `Unimplemented` are already surfaced directly as `Status` variants
//! by `Aligner::align`/`align_named` (neither one is ever produced by a
//! fallible `Result`-returning call inside this crate), so `AlignError`
//! itself only models the one kind its own callers
//! (`CompiledPattern::compile`, `WindowMatrix::new`, `driver::compute`)
//! actually raise: a precondition violation. It stays a plain `enum` rather
//! than reaching for `thiserror` (none of the example repos this crate is
//! grounded on pull it in for their core algorithm crates).

use std::fmt;

/// Everything that can go wrong while compiling a pattern or running the
/// windowed aligner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A caller-supplied argument (pattern, window size, overlap size, ...)
    /// violates a precondition.
    InvalidArgument(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for AlignError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_informative() {
        assert_eq!(
            AlignError::InvalidArgument("bad window_size".to_string()).to_string(),
            "invalid argument: bad window_size"
        );
    }
}
