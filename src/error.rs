// Engine error types
// Every per-file operation surfaces failure as a discrete, recoverable Result

use thiserror::Error;

/// Errors produced by the restructuring engine.
///
/// One file's failure never corrupts another: the engine holds no state
/// between calls, so callers batching many files just collect these.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unreadable header or track chunk, or a time base the engine cannot
    /// express (SMPTE timecode).
    #[error("malformed MIDI file: {0}")]
    MalformedFile(String),

    /// Absolute times fed to the timeline were decreasing. The engine only
    /// feeds `to_relative` sequences it sorted itself, so hitting this
    /// indicates an internal invariant violation.
    #[error("event ordering violation: absolute time {next} after {prev}")]
    Ordering { prev: u64, next: u64 },

    /// The combiner expects a fixed set of numbered sources; the named one
    /// was absent.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Format 2 (sequential) files are read but not processed.
    #[error("unsupported MIDI format {0}")]
    UnsupportedFormat(u8),

    /// Combiner BPM must be finite and positive.
    #[error("invalid BPM: {0}")]
    InvalidBpm(f64),
}
