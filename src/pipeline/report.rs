// Structured per-file reports
// Returned to the caller for rendering; the engine never formats or prints

use serde::{Deserialize, Serialize};

use crate::tracks::classify::TrackInfo;

/// How a kept track's channel assignment changed, if it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelChange {
    /// Standardizer relabel; `from` is `None` when the source track had no
    /// channel-voice messages at all.
    Remapped { from: Option<u8> },
    /// Bass relocation into a free bass channel.
    Moved { from: u8 },
    /// Displaced from the bass channel by a detected bass track.
    Swapped { from: u8 },
}

/// One kept track's final placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Final channel; `None` only for a track that was never assigned one.
    pub channel: Option<u8>,
    /// Count of non-meta messages.
    pub event_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ChannelChange>,
    pub is_bass: bool,
}

impl TrackSummary {
    pub(crate) fn from_info(info: &TrackInfo) -> Self {
        let change = if let Some(from) = info.remapped_from {
            Some(ChannelChange::Remapped { from })
        } else if let Some(from) = info.moved_from {
            Some(ChannelChange::Moved { from })
        } else {
            info.swapped_from.map(|from| ChannelChange::Swapped { from })
        };
        TrackSummary {
            channel: info.channel,
            event_count: info.event_count,
            change,
            is_bass: info.is_bass,
        }
    }
}

/// What the filter pipeline did to one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterReport {
    /// Track count entering selection (after any format-0 split).
    pub original_tracks: usize,
    pub kept_tracks: usize,
    /// Tracks dropped for sparseness or by the top-N cap.
    pub removed_sparse: usize,
    /// True when the input was format 0 and was split by channel first.
    pub converted_from_single_track: bool,
    pub bass_detected: bool,
    /// Kept tracks in output order.
    pub tracks: Vec<TrackSummary>,
}
