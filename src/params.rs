//! The external façade's configuration surface: `Algo`, `Params`, `Status`.
//!
//! Grounded on `quicked_algo_t`/`quicked_params_t`/`quicked_status_t` in
//! `original_source/quicked/quicked.h`, shaped into a `clap`-derivable,
//! `serde`-round-trippable struct the way `astarpa2::AstarPa2Params` and
//! `pa-heuristic`'s CLI-facing config structs are in the example pack.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Which alignment algorithm a `Params` selects.
///
/// Kept as a 5-way enum for parity with `quicked_algo_t`, though only
/// [`Algo::Windowed`] is implemented by [`crate::aligner::Aligner`] — the
/// rest are the named, out-of-scope dispatcher targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Algo {
    Quicked,
    Windowed,
    Banded,
    Era,
    HEra,
}

impl Default for Algo {
    fn default() -> Self {
        Algo::Windowed
    }
}

/// Configuration for an [`crate::aligner::Aligner`].
///
/// Doubles as the CLI's argument struct (`clap::Parser`) and as a
/// JSON-serializable config object (`serde`), the way `astarpa2::AstarPa2Params`
/// does in this codebase's workspace.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
pub struct Params {
    /// Which algorithm to run.
    #[arg(long, value_enum, default_value_t = Algo::Windowed)]
    pub algo: Algo,

    /// Band half-width for the banded algorithm. Inert for
    /// [`Algo::Windowed`]; kept for interface completeness with
    /// `quicked_params_t`.
    #[arg(long, default_value_t = 0)]
    pub bandwidth: usize,

    /// Number of 64-row blocks per window.
    #[arg(long, default_value_t = 1)]
    pub window_size: usize,

    /// Number of blocks of overlap retraced between consecutive windows.
    /// Must be strictly less than `window_size`.
    #[arg(long, default_value_t = 0)]
    pub overlap_size: usize,

    /// Heuristic-early-weigh-in score thresholds; unused by the windowed
    /// path, kept for façade parity with `quicked_params_t`.
    #[arg(skip)]
    pub hew_threshold: [i32; 2],

    /// Heuristic-early-weigh-in percentages; unused by the windowed path.
    #[arg(skip)]
    pub hew_percentage: [f32; 2],

    /// Skip CIGAR reconstruction and report only the edit distance.
    #[arg(long, default_value_t = false)]
    pub only_score: bool,

    /// Force the scalar code path. The windowed aligner has no SIMD path
    /// to fall back from; kept for façade parity.
    #[arg(long, default_value_t = false)]
    pub force_scalar: bool,

    /// Let an external harness own timing instead of the library doing so.
    #[arg(long, default_value_t = false)]
    pub external_timer: bool,
}

/// Build the library's default parameters: the windowed algorithm, a
/// single-block window, and no overlap.
pub fn params_default() -> Params {
    Params {
        algo: Algo::Windowed,
        bandwidth: 0,
        window_size: 1,
        overlap_size: 0,
        hew_threshold: [0, 0],
        hew_percentage: [0.0, 0.0],
        only_score: false,
        force_scalar: false,
        external_timer: false,
    }
}

/// Outcome of an [`crate::aligner::Aligner::align`] call, the Rust analogue
/// of `quicked_status_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
    UnknownAlgo,
    Unimplemented,
    Wip,
}
