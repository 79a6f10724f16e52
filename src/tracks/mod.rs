// Track classification and selection

pub mod classify;
pub mod select;

pub use classify::{event_count, primary_channel, TrackInfo};
pub use select::select_top_tracks;
