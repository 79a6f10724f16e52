// Channel splitter
// Explodes a format-0 multiplexed track into one track per channel

use crate::error::EngineError;
use crate::midi::event::{FileFormat, Message, MidiFile};
use crate::midi::timeline::{to_absolute, to_relative, AbsEvent};

/// Convert a single-track (format 0) file to format 1 with one track per
/// channel.
///
/// The multiplexed track is converted to absolute time and its channel-voice
/// messages are partitioned by channel. Meta messages are collected into one
/// leading track with their timing preserved independently of the channel
/// buckets (the source end-of-track lands there naturally). Each non-empty
/// channel becomes a track in ascending channel order, re-encoded to delta
/// time with a synthetic end-of-track appended. Equal-time messages keep
/// their original relative order. `ticks_per_beat` is copied unchanged.
pub fn split_by_channel(file: &MidiFile) -> Result<MidiFile, EngineError> {
    if file.format != FileFormat::SingleTrack {
        return Err(EngineError::MalformedFile(
            "channel split expects a single-track (format 0) file".into(),
        ));
    }
    let source = file.tracks.first().ok_or_else(|| {
        EngineError::MalformedFile("single-track file contains no track chunk".into())
    })?;

    let mut channel_events: Vec<Vec<AbsEvent>> = vec![Vec::new(); 16];
    let mut meta_events: Vec<AbsEvent> = Vec::new();

    for ev in to_absolute(source) {
        if ev.kind.is_meta() {
            meta_events.push(ev);
        } else if let Some(channel) = ev.kind.channel() {
            channel_events[channel as usize].push(ev);
        }
        // Channel-less non-meta events (sysex) have no home track and are dropped.
    }

    let mut out = MidiFile::new(FileFormat::Parallel, file.ticks_per_beat);

    if !meta_events.is_empty() {
        out.tracks.push(to_relative(&meta_events)?);
    }

    for mut bucket in channel_events {
        if bucket.is_empty() {
            continue;
        }
        // Stable sort: equal-time messages stay in source order.
        bucket.sort_by_key(|ev| ev.time);
        let mut track = to_relative(&bucket)?;
        track.push(Message::end_of_track());
        out.tracks.push(track);
    }

    Ok(out)
}
