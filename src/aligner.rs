//! The Aligner façade: owns `Params`, runs an alignment, exposes the score
//! and CIGAR.
//!
//! Grounded on `quicked_aligner_t`/`quicked_align` in
//! `original_source/quicked/quicked.h`: a stateful handle that holds its
//! params plus the last alignment's outputs, and a `Status`-returning entry
//! point rather than a `Result`-propagating one.

use serde::Serialize;

use crate::error::AlignError;
use crate::params::{Algo, Params, Status};
use crate::pattern::CompiledPattern;

/// A configured handle that runs alignments and retains the last result.
pub struct Aligner {
    params: Params,
    score: Option<i64>,
    cigar: Option<String>,
}

/// A JSON-serializable summary of the last alignment, grounded on the
/// `serde_json::to_writer(io::stdout(), &results)` batch-output pattern
/// `pa-bin/examples/search-bench.rs` uses for its own alignment results.
#[derive(Debug, Clone, Serialize)]
pub struct AlignResult {
    pub score: Option<i64>,
    pub cigar: Option<String>,
}

impl Aligner {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            score: None,
            cigar: None,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Run an alignment of `pattern` against `text` using `self.params.algo`.
    ///
    /// Never panics or propagates an error to the caller: any internal
    /// [`AlignError`] is logged and converted to [`Status::Error`], matching
    /// the C `quicked_status_t` return-code convention.
    pub fn align(&mut self, pattern: &[u8], text: &[u8]) -> Status {
        match self.params.algo {
            Algo::Windowed => self.align_windowed(pattern, text),
            Algo::Quicked => Status::Unimplemented,
            Algo::Banded => Status::Unimplemented,
            Algo::Era => Status::Unimplemented,
            Algo::HEra => Status::Unimplemented,
        }
    }

    /// Same as [`Aligner::align`], but the algorithm is named dynamically
    /// (as a `&str`) instead of through the typed [`Algo`] enum.
    ///
    /// Added for parity with the C surface's untyped `quicked_algo_t`: in
    /// Rust, [`Algo::UnknownAlgo`] has no value to construct, since
    /// [`Algo`] is a closed, typed enum — this entry point is the only way
    /// to reach [`Status::UnknownAlgo`], and is what the CLI binary uses to
    /// turn a `--algo` string into a run.
    pub fn align_named(&mut self, algo_name: &str, pattern: &[u8], text: &[u8]) -> Status {
        let algo = match algo_name.to_ascii_lowercase().as_str() {
            "quicked" => Algo::Quicked,
            "windowed" => Algo::Windowed,
            "banded" => Algo::Banded,
            "era" => Algo::Era,
            "h_era" | "h-era" | "hera" => Algo::HEra,
            _ => {
                log::error!("unknown algorithm name: {algo_name}");
                return Status::UnknownAlgo;
            }
        };
        self.params.algo = algo;
        self.align(pattern, text)
    }

    fn align_windowed(&mut self, pattern: &[u8], text: &[u8]) -> Status {
        match self.run_windowed(pattern, text) {
            Ok((cigar_string, score)) => {
                self.score = Some(score);
                self.cigar = if self.params.only_score {
                    None
                } else {
                    Some(cigar_string)
                };
                Status::Ok
            }
            Err(err) => {
                log::error!("windowed alignment failed: {err}");
                self.score = None;
                self.cigar = None;
                Status::Error
            }
        }
    }

    fn run_windowed(&self, pattern: &[u8], text: &[u8]) -> Result<(String, i64), AlignError> {
        log::debug!(
            "windowed align: m={}, n={}, window_size={}, overlap_size={}",
            pattern.len(),
            text.len(),
            self.params.window_size,
            self.params.overlap_size
        );
        let compiled = CompiledPattern::compile(pattern)?;
        crate::driver::compute(
            &compiled,
            text,
            self.params.window_size,
            self.params.overlap_size,
        )
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn cigar(&self) -> Option<&str> {
        self.cigar.as_deref()
    }

    /// A JSON-serializable snapshot of the last alignment's outputs.
    pub fn result(&self) -> AlignResult {
        AlignResult {
            score: self.score,
            cigar: self.cigar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::params_default;

    #[test]
    fn aligns_identical_sequences() {
        let mut aligner = Aligner::new(params_default());
        let status = aligner.align(b"ACGTACGT", b"ACGTACGT");
        assert_eq!(status, Status::Ok);
        assert_eq!(aligner.score(), Some(0));
        assert_eq!(aligner.cigar().as_deref(), Some("MMMMMMMM"));
    }

    #[test]
    fn result_round_trips_through_json() {
        let mut aligner = Aligner::new(params_default());
        aligner.align(b"ACGT", b"ACCT");
        let json = serde_json::to_string(&aligner.result()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["score"], 1);
        assert_eq!(parsed["cigar"], "MMXM");
    }

    #[test]
    fn only_score_skips_cigar_reconstruction() {
        let mut params = params_default();
        params.only_score = true;
        let mut aligner = Aligner::new(params);
        let status = aligner.align(b"ACGT", b"ACCT");
        assert_eq!(status, Status::Ok);
        assert_eq!(aligner.score(), Some(1));
        assert_eq!(aligner.cigar(), None);
    }

    #[test]
    fn unimplemented_algos_report_status() {
        let mut params = params_default();
        params.algo = Algo::Banded;
        let mut aligner = Aligner::new(params);
        assert_eq!(aligner.align(b"ACGT", b"ACGT"), Status::Unimplemented);
    }

    #[test]
    fn align_named_rejects_unknown_algorithm() {
        let mut aligner = Aligner::new(params_default());
        assert_eq!(
            aligner.align_named("bogus", b"ACGT", b"ACGT"),
            Status::UnknownAlgo
        );
    }

    #[test]
    fn align_named_dispatches_to_windowed() {
        let mut aligner = Aligner::new(params_default());
        assert_eq!(
            aligner.align_named("windowed", b"ACGT", b"ACGT"),
            Status::Ok
        );
        assert_eq!(aligner.score(), Some(0));
    }

    #[test]
    fn rejects_overlap_not_smaller_than_window() {
        let mut params = params_default();
        params.window_size = 2;
        params.overlap_size = 2;
        let mut aligner = Aligner::new(params);
        assert_eq!(aligner.align(b"ACGT", b"ACGT"), Status::Error);
        assert_eq!(aligner.score(), None);
    }
}
