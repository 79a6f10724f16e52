// TrackSift - MIDI track and channel restructuring engine
// Module declarations

pub mod channels;
pub mod config;
pub mod drums;
pub mod error;
pub mod midi;
pub mod pipeline;
pub mod tracks;

pub use channels::{relocate_bass, split_by_channel, standardize_channels};
pub use config::EngineConfig;
pub use drums::merge_drum_tracks;
pub use error::EngineError;
pub use midi::{FileFormat, Message, MessageKind, MetaKind, MidiFile, Track};
pub use pipeline::{combine_parts, filter_file, FilterOutcome, FilterReport};
pub use tracks::{select_top_tracks, TrackInfo};
