// Bass relocation
// Detects a bass-register track by pitch statistics and moves it to the bass channel

use crate::config::EngineConfig;
use crate::midi::event::{MessageKind, Track};
use crate::tracks::classify::TrackInfo;

/// Number of note onsets below the bass cutoff, and total onsets.
fn bass_note_stats(track: &Track, cutoff: u8) -> (usize, usize) {
    let mut below = 0usize;
    let mut total = 0usize;
    for msg in track.iter() {
        if let MessageKind::NoteOn { key, .. } = msg.kind {
            total += 1;
            if key < cutoff {
                below += 1;
            }
        }
    }
    (below, total)
}

/// Find the most bass-heavy track and relocate it to the bass channel.
///
/// A track qualifies when more than `bass_ratio_threshold` of its note-ons
/// sit below `bass_note_cutoff`; among qualifiers the one with the most
/// sub-cutoff notes wins, first-encountered on ties. Percussion and
/// no-channel tracks are never candidates, and zero-note tracks are skipped
/// (the ratio is undefined).
///
/// If the winner already sits on the bass channel nothing changes, which
/// makes the operation idempotent. Otherwise it moves there; if another track
/// occupies the bass channel the two swap channels, and both carry audit
/// annotations. Track count and event count are never altered.
pub fn relocate_bass(tracks: Vec<TrackInfo>, config: &EngineConfig) -> Vec<TrackInfo> {
    let mut tracks = tracks;

    let mut candidate: Option<usize> = None;
    let mut max_bass_notes = 0usize;

    for (idx, info) in tracks.iter().enumerate() {
        match info.channel {
            None => continue,
            Some(ch) if ch == config.percussion_channel => continue,
            Some(_) => {}
        }

        let (below, total) = bass_note_stats(&info.track, config.bass_note_cutoff);
        if total == 0 {
            continue;
        }
        let ratio = below as f64 / total as f64;
        if ratio > config.bass_ratio_threshold && below > max_bass_notes {
            max_bass_notes = below;
            candidate = Some(idx);
        }
    }

    let Some(bass_idx) = candidate else {
        return tracks;
    };
    if tracks[bass_idx].channel == Some(config.bass_channel) {
        return tracks;
    }

    let old_channel = tracks[bass_idx].channel;
    let occupant = tracks
        .iter()
        .position(|t| t.channel == Some(config.bass_channel));

    // occupant != bass_idx here: the bass track is not on the bass channel.
    if let Some(occ_idx) = occupant {
        tracks[occ_idx].swapped_from = Some(config.bass_channel);
        tracks[occ_idx].channel = old_channel;
    }

    let bass = &mut tracks[bass_idx];
    bass.moved_from = old_channel;
    bass.channel = Some(config.bass_channel);
    bass.is_bass = true;

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::event::Message;

    fn note_on(channel: u8, key: u8) -> Message {
        Message::new(10, MessageKind::NoteOn { channel, key, velocity: 90 })
    }

    /// A track with `low` onsets below C3 and `high` onsets above.
    fn track_with_register(index: usize, channel: u8, low: usize, high: usize) -> TrackInfo {
        let mut events = Vec::new();
        for _ in 0..low {
            events.push(note_on(channel, 36));
        }
        for _ in 0..high {
            events.push(note_on(channel, 72));
        }
        events.push(Message::end_of_track());
        TrackInfo::new(index, Track::new(events))
    }

    #[test]
    fn bass_track_moves_to_free_bass_channel() {
        let tracks = vec![
            track_with_register(0, 0, 2, 20),
            track_with_register(1, 3, 30, 5),
        ];

        let out = relocate_bass(tracks, &EngineConfig::default());
        assert_eq!(out[1].channel, Some(1));
        assert_eq!(out[1].moved_from, Some(3));
        assert!(out[1].is_bass);
        assert!(out[1].swapped_from.is_none());
        // The other track is untouched.
        assert_eq!(out[0].channel, Some(0));
        assert!(!out[0].is_bass);
    }

    #[test]
    fn occupied_bass_channel_causes_a_swap() {
        let tracks = vec![
            track_with_register(0, 1, 0, 40),
            track_with_register(1, 2, 25, 3),
        ];

        let out = relocate_bass(tracks, &EngineConfig::default());
        assert_eq!(out[1].channel, Some(1));
        assert!(out[1].is_bass);
        assert_eq!(out[1].moved_from, Some(2));

        assert_eq!(out[0].channel, Some(2));
        assert_eq!(out[0].swapped_from, Some(1));
        assert!(!out[0].is_bass);
    }

    #[test]
    fn no_qualifying_track_leaves_input_unchanged() {
        // 40% bass notes: below the strict > 0.5 bar.
        let tracks = vec![track_with_register(0, 2, 4, 6)];
        let out = relocate_bass(tracks, &EngineConfig::default());
        assert_eq!(out[0].channel, Some(2));
        assert!(!out[0].is_bass);
        assert!(out[0].moved_from.is_none());
    }

    #[test]
    fn exactly_half_bass_does_not_qualify() {
        let tracks = vec![track_with_register(0, 2, 10, 10)];
        let out = relocate_bass(tracks, &EngineConfig::default());
        assert!(!out[0].is_bass);
    }

    #[test]
    fn percussion_and_meta_tracks_are_never_candidates() {
        let mut meta = track_with_register(1, 0, 30, 0);
        meta.channel = None;
        let tracks = vec![track_with_register(0, 9, 50, 0), meta];

        let out = relocate_bass(tracks, &EngineConfig::default());
        assert!(out.iter().all(|t| !t.is_bass));
    }

    #[test]
    fn most_sub_cutoff_notes_wins_first_on_ties() {
        let tracks = vec![
            track_with_register(0, 2, 20, 2),
            track_with_register(1, 3, 40, 2),
            track_with_register(2, 0, 40, 2),
        ];

        let out = relocate_bass(tracks, &EngineConfig::default());
        // Index 1 has the most bass notes; index 2 ties but came later.
        assert!(out[1].is_bass);
        assert!(!out[2].is_bass);
    }

    #[test]
    fn relocation_is_idempotent() {
        let tracks = vec![
            track_with_register(0, 1, 0, 40),
            track_with_register(1, 2, 25, 3),
        ];

        let once = relocate_bass(tracks, &EngineConfig::default());
        let twice = relocate_bass(once.clone(), &EngineConfig::default());

        let snapshot = |ts: &[TrackInfo]| -> Vec<(Option<u8>, bool, Option<u8>, Option<u8>)> {
            ts.iter()
                .map(|t| (t.channel, t.is_bass, t.moved_from, t.swapped_from))
                .collect()
        };
        assert_eq!(snapshot(&once), snapshot(&twice));
    }

    #[test]
    fn bass_already_on_bass_channel_is_a_no_op() {
        let tracks = vec![track_with_register(0, 1, 30, 0)];
        let out = relocate_bass(tracks, &EngineConfig::default());
        assert_eq!(out[0].channel, Some(1));
        assert!(!out[0].is_bass);
        assert!(out[0].moved_from.is_none());
    }
}
