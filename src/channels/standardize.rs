// Channel standardizer
// Remaps selected tracks onto the fixed melodic + percussion channel layout

use crate::config::EngineConfig;
use crate::tracks::classify::TrackInfo;

/// Remap a selected track list onto the configured channel layout.
///
/// Tracks whose original channel is the percussion channel are kept there
/// untouched. All other tracks (including meta-only ones with no channel)
/// walk a cursor over `melodic_channels`: a track already sitting on a valid
/// melodic channel is left alone, anything else is relabeled to the channel
/// under the cursor and annotated with its original channel.
///
/// The cursor advances for every melodic track, relabeled or not, so a
/// relabeled track never lands on a channel an earlier valid track already
/// holds. A later valid track can still collide with an earlier relabel; that
/// behavior is intentional and kept as-is (see DESIGN.md).
///
/// Returns percussion tracks first, then melodic tracks. Messages are not
/// rewritten here; [`TrackInfo::into_track`] applies the recorded assignment.
pub fn standardize_channels(tracks: Vec<TrackInfo>, config: &EngineConfig) -> Vec<TrackInfo> {
    let (percussion, melodic): (Vec<TrackInfo>, Vec<TrackInfo>) = tracks
        .into_iter()
        .partition(|t| t.channel == Some(config.percussion_channel));

    let mut melodic = melodic;
    let mut cursor = 0usize;
    for info in melodic.iter_mut() {
        let valid = matches!(info.channel, Some(ch) if config.melodic_channels.contains(&ch));
        if !valid {
            let new_channel = config.melodic_channels[cursor % config.melodic_channels.len()];
            info.remapped_from = Some(info.channel);
            info.channel = Some(new_channel);
        }
        cursor += 1;
    }

    let mut out = percussion;
    out.extend(melodic);
    out
}
