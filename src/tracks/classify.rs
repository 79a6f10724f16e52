// Track classification
// Event counting, primary-channel detection, and the TrackInfo wrapper

use crate::midi::event::Track;

/// Number of substantive (non-meta) messages in a track.
pub fn event_count(track: &Track) -> usize {
    track.iter().filter(|msg| !msg.kind.is_meta()).count()
}

/// Channel of the first channel-voice message in track order, or `None` for
/// a pure meta track.
pub fn primary_channel(track: &Track) -> Option<u8> {
    track.iter().find_map(|msg| msg.kind.channel())
}

/// A track annotated with derived statistics and remap bookkeeping.
///
/// Transient: built per file, consumed when the output file is assembled.
/// Channel reassignments are recorded here during standardization and bass
/// relocation; the wrapped track's messages are rewritten exactly once, by
/// [`TrackInfo::into_track`], at the end of the pipeline.
#[derive(Debug, Clone)]
pub struct TrackInfo {
    /// Position in the source file's track list, used for deterministic
    /// tie-breaking.
    pub index: usize,
    pub track: Track,
    pub event_count: usize,
    /// Current channel assignment; `None` is the no-channel sentinel for
    /// meta-only tracks.
    pub channel: Option<u8>,
    /// Set by the standardizer when it relabeled this track. The inner value
    /// is the original channel (`None` if the track had no channel at all).
    pub remapped_from: Option<Option<u8>>,
    /// Set by the bass relocator on the bass track it moved.
    pub moved_from: Option<u8>,
    /// Set by the bass relocator on the track it displaced from the bass
    /// channel.
    pub swapped_from: Option<u8>,
    pub is_bass: bool,
}

impl TrackInfo {
    pub fn new(index: usize, track: Track) -> Self {
        let event_count = event_count(&track);
        let channel = primary_channel(&track);
        TrackInfo {
            index,
            track,
            event_count,
            channel,
            remapped_from: None,
            moved_from: None,
            swapped_from: None,
            is_bass: false,
        }
    }

    /// Whether any step changed this track's channel assignment.
    pub fn was_relabeled(&self) -> bool {
        self.remapped_from.is_some() || self.moved_from.is_some() || self.swapped_from.is_some()
    }

    /// Produce the final track, rewriting every channel-voice message to the
    /// assigned channel if any relabeling was recorded. Untouched tracks come
    /// back as-is.
    pub fn into_track(self) -> Track {
        match (self.was_relabeled(), self.channel) {
            (true, Some(channel)) => Track::new(
                self.track
                    .events
                    .into_iter()
                    .map(|mut msg| {
                        msg.kind = msg.kind.with_channel(channel);
                        msg
                    })
                    .collect(),
            ),
            _ => self.track,
        }
    }
}
