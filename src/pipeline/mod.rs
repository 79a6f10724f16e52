// File-level orchestration: the filter pipeline and the six-part combiner

pub mod combine;
pub mod filter;
pub mod report;

pub use combine::{combine_parts, COMBINE_SLOTS};
pub use filter::{filter_file, FilterOutcome};
pub use report::{ChannelChange, FilterReport, TrackSummary};
