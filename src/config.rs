// Engine configuration
// Explicit settings value threaded into every entry point

use serde::{Deserialize, Serialize};

/// Settings for track selection, channel layout, and bass detection.
///
/// The defaults reproduce the canonical 5-channel layout: four melodic
/// channels plus the percussion channel, with channel 1 reserved for a
/// detected bass part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of tracks kept by the selector.
    pub max_tracks: usize,

    /// Tracks with fewer non-meta events than this are dropped.
    pub min_events: usize,

    /// Target channels for melodic tracks, consumed in order.
    pub melodic_channels: Vec<u8>,

    /// Channel reserved exclusively for percussion.
    pub percussion_channel: u8,

    /// Channel a detected bass part is relocated to.
    pub bass_channel: u8,

    /// Note-on keys below this count as bass-register notes (48 = C3).
    pub bass_note_cutoff: u8,

    /// A track qualifies as bass when its share of bass-register onsets
    /// strictly exceeds this ratio.
    pub bass_ratio_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_tracks: 5,
            min_events: 50,
            melodic_channels: vec![0, 1, 2, 3],
            percussion_channel: 9,
            bass_channel: 1,
            bass_note_cutoff: 48,
            bass_ratio_threshold: 0.5,
        }
    }
}
