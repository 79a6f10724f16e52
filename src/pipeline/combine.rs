// Six-part combiner
// Builds one format-1 file: tempo track, four melodic parts, merged drums

use crate::config::EngineConfig;
use crate::drums::merge_drum_tracks;
use crate::error::EngineError;
use crate::midi::event::{FileFormat, Message, MessageKind, MetaKind, MidiFile, Track};

/// Number of numbered input slots the combiner expects.
pub const COMBINE_SLOTS: usize = 6;

/// Slot label used in `MissingInput` errors, matching the numbered source
/// file convention.
fn slot_name(slot: usize) -> String {
    format!("{}.mid", slot + 1)
}

fn bpm_to_tempo(bpm: f64) -> u32 {
    (60_000_000.0 / bpm).round() as u32
}

/// Keep a source meta message in a combined track? End-of-track, tempo, and
/// track-name metas are replaced by the combiner's own.
fn keep_melodic_meta(kind: &MetaKind) -> bool {
    !matches!(
        kind,
        MetaKind::EndOfTrack | MetaKind::Tempo(_) | MetaKind::TrackName(_)
    )
}

/// Drum sources keep their track names; only end-of-track and tempo go.
fn keep_drum_meta(kind: &MetaKind) -> bool {
    !matches!(kind, MetaKind::EndOfTrack | MetaKind::Tempo(_))
}

/// Combine six numbered parts into one format-1 file.
///
/// Slots 1-4 become melodic tracks named `CH1..CH4` on the configured
/// melodic channels; slots 5 and 6 are percussion, merged into one channel-9
/// track with slot 6 winning coincident notes. A tempo track carrying the
/// given BPM leads the file. Any absent slot aborts this combine with
/// `MissingInput` naming it.
///
/// `ticks_per_beat` is taken from slot 1; a differing time base in another
/// slot is logged, never resampled.
pub fn combine_parts(
    parts: &[Option<MidiFile>; COMBINE_SLOTS],
    bpm: f64,
    config: &EngineConfig,
) -> Result<MidiFile, EngineError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(EngineError::InvalidBpm(bpm));
    }

    let mut sources: Vec<&MidiFile> = Vec::with_capacity(COMBINE_SLOTS);
    for (slot, part) in parts.iter().enumerate() {
        sources.push(
            part.as_ref()
                .ok_or_else(|| EngineError::MissingInput(slot_name(slot)))?,
        );
    }

    let ticks_per_beat = sources[0].ticks_per_beat;
    for (slot, source) in sources.iter().enumerate().skip(1) {
        if source.ticks_per_beat != ticks_per_beat {
            log::warn!(
                "{} has {} ticks per beat, expected {}; timing is not resampled",
                slot_name(slot),
                source.ticks_per_beat,
                ticks_per_beat
            );
        }
    }

    let mut out = MidiFile::new(FileFormat::Parallel, ticks_per_beat);

    let mut tempo_track = Track::default();
    tempo_track.push(Message::new(0, MessageKind::Meta(MetaKind::Tempo(bpm_to_tempo(bpm)))));
    tempo_track.push(Message::end_of_track());
    out.tracks.push(tempo_track);

    let melodic_count = COMBINE_SLOTS - 2;
    for slot in 0..melodic_count {
        let channel = config.melodic_channels[slot % config.melodic_channels.len()];
        let name = format!("CH{}", slot + 1).into_bytes();

        let mut track = Track::default();
        track.push(Message::new(0, MessageKind::Meta(MetaKind::TrackName(name))));
        for source_track in &sources[slot].tracks {
            for msg in source_track.iter() {
                match &msg.kind {
                    MessageKind::Meta(meta) => {
                        if keep_melodic_meta(meta) {
                            track.push(msg.clone());
                        }
                    }
                    kind => track.push(Message::new(msg.delta, kind.with_channel(channel))),
                }
            }
        }
        track.push(Message::end_of_track());
        out.tracks.push(track);
    }

    let drum_stream = |source: &MidiFile| -> Track {
        let mut events = Vec::new();
        for source_track in &source.tracks {
            for msg in source_track.iter() {
                match &msg.kind {
                    MessageKind::Meta(meta) => {
                        if keep_drum_meta(meta) {
                            events.push(msg.clone());
                        }
                    }
                    kind => events.push(Message::new(
                        msg.delta,
                        kind.with_channel(config.percussion_channel),
                    )),
                }
            }
        }
        Track::new(events)
    };

    let primary = drum_stream(sources[melodic_count]);
    let secondary = drum_stream(sources[melodic_count + 1]);
    let merged = merge_drum_tracks(&primary, &secondary)?;

    let mut drum_track = Track::default();
    drum_track.push(Message::new(
        0,
        MessageKind::Meta(MetaKind::TrackName(
            format!("CH{}", config.percussion_channel + 1).into_bytes(),
        )),
    ));
    drum_track.events.extend(merged.events);
    out.tracks.push(drum_track);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part_with_notes(channel: u8, keys: &[u8], ticks_per_beat: u16) -> MidiFile {
        let mut events = Vec::new();
        for &key in keys {
            events.push(Message::new(0, MessageKind::NoteOn { channel, key, velocity: 100 }));
            events.push(Message::new(120, MessageKind::NoteOff { channel, key, velocity: 0 }));
        }
        events.push(Message::end_of_track());
        let mut file = MidiFile::new(FileFormat::SingleTrack, ticks_per_beat);
        file.tracks.push(Track::new(events));
        file
    }

    fn six_parts() -> [Option<MidiFile>; COMBINE_SLOTS] {
        [
            Some(part_with_notes(0, &[60, 62], 480)),
            Some(part_with_notes(5, &[48, 50], 480)),
            Some(part_with_notes(2, &[64], 480)),
            Some(part_with_notes(7, &[67], 480)),
            Some(part_with_notes(0, &[38, 36], 480)),
            Some(part_with_notes(3, &[38, 42], 480)),
        ]
    }

    fn track_name(track: &Track) -> Option<&[u8]> {
        track.iter().find_map(|m| match &m.kind {
            MessageKind::Meta(MetaKind::TrackName(name)) => Some(name.as_slice()),
            _ => None,
        })
    }

    #[test]
    fn output_order_is_tempo_then_melodic_then_drums() {
        let out = combine_parts(&six_parts(), 120.0, &EngineConfig::default()).unwrap();

        assert_eq!(out.format, FileFormat::Parallel);
        assert_eq!(out.tracks.len(), 6);
        assert_eq!(out.ticks_per_beat, 480);

        assert_eq!(
            out.tracks[0].events[0].kind,
            MessageKind::Meta(MetaKind::Tempo(500_000))
        );
        for (i, expected) in [b"CH1", b"CH2", b"CH3", b"CH4"].iter().enumerate() {
            assert_eq!(track_name(&out.tracks[i + 1]), Some(expected.as_slice()));
        }
        assert_eq!(track_name(&out.tracks[5]), Some(b"CH10".as_slice()));
    }

    #[test]
    fn melodic_slots_land_on_fixed_channels() {
        let out = combine_parts(&six_parts(), 120.0, &EngineConfig::default()).unwrap();

        for (i, track) in out.tracks[1..5].iter().enumerate() {
            for msg in track.iter() {
                if let Some(ch) = msg.kind.channel() {
                    assert_eq!(ch, i as u8, "slot {} on wrong channel", i + 1);
                }
            }
        }
    }

    #[test]
    fn drum_track_is_merged_onto_the_percussion_channel() {
        let out = combine_parts(&six_parts(), 120.0, &EngineConfig::default()).unwrap();
        let drums = &out.tracks[5];

        let mut onset_count = 0;
        for msg in drums.iter() {
            if let Some(ch) = msg.kind.channel() {
                assert_eq!(ch, 9);
            }
            if msg.kind.is_note_onset() {
                onset_count += 1;
            }
        }
        // Slot 5's note 38 at tick 0 conflicts with slot 6's and is dropped;
        // its 36 survives, plus slot 6's 38 and 42.
        assert_eq!(onset_count, 3);
        assert_eq!(
            drums.events.last().unwrap().kind,
            MessageKind::Meta(MetaKind::EndOfTrack)
        );
    }

    #[test]
    fn missing_slot_is_reported_by_name() {
        let mut parts = six_parts();
        parts[4] = None;

        match combine_parts(&parts, 120.0, &EngineConfig::default()) {
            Err(EngineError::MissingInput(name)) => assert_eq!(name, "5.mid"),
            other => panic!("expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn non_positive_bpm_is_rejected() {
        assert!(matches!(
            combine_parts(&six_parts(), 0.0, &EngineConfig::default()),
            Err(EngineError::InvalidBpm(_))
        ));
        assert!(matches!(
            combine_parts(&six_parts(), f64::NAN, &EngineConfig::default()),
            Err(EngineError::InvalidBpm(_))
        ));
    }

    #[test]
    fn tempo_reflects_the_configured_bpm() {
        let out = combine_parts(&six_parts(), 140.0, &EngineConfig::default()).unwrap();
        assert_eq!(
            out.tracks[0].events[0].kind,
            MessageKind::Meta(MetaKind::Tempo(428_571))
        );
    }

    #[test]
    fn source_end_of_track_and_tempo_metas_are_stripped() {
        let mut part = part_with_notes(0, &[60], 480);
        part.tracks[0]
            .events
            .insert(0, Message::new(0, MessageKind::Meta(MetaKind::Tempo(600_000))));

        let mut parts = six_parts();
        parts[0] = Some(part);

        let out = combine_parts(&parts, 120.0, &EngineConfig::default()).unwrap();
        let ch1 = &out.tracks[1];

        let tempo_metas = ch1
            .iter()
            .filter(|m| matches!(m.kind, MessageKind::Meta(MetaKind::Tempo(_))))
            .count();
        assert_eq!(tempo_metas, 0);

        let eots = ch1
            .iter()
            .filter(|m| matches!(m.kind, MessageKind::Meta(MetaKind::EndOfTrack)))
            .count();
        assert_eq!(eots, 1);
    }
}
