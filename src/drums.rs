// Drum track merging
// Combines two percussion streams, the secondary winning coincident notes

use std::collections::HashSet;

use crate::error::EngineError;
use crate::midi::event::{Message, MessageKind, Track};
use crate::midi::timeline::{to_absolute, to_relative};

/// Merge two percussion tracks into one, with `secondary` taking priority.
///
/// A note onset in `primary` is dropped only when `secondary` has an onset
/// with the identical key at the identical absolute tick; a different pitch
/// or an off-by-one tick never conflicts. Note-offs (including note-on at
/// velocity 0) and all non-note messages pass through untouched. Every
/// `secondary` event survives unconditionally.
///
/// The merged stream is stable-sorted by absolute time, so a surviving
/// `primary` event at a given tick sorts before a `secondary` event at the
/// same tick. An end-of-track meta is appended.
pub fn merge_drum_tracks(primary: &Track, secondary: &Track) -> Result<Track, EngineError> {
    let primary_abs = to_absolute(primary);
    let secondary_abs = to_absolute(secondary);

    let conflicts: HashSet<(u64, u8)> = secondary_abs
        .iter()
        .filter_map(|ev| match ev.kind {
            MessageKind::NoteOn { key, velocity, .. } if velocity > 0 => Some((ev.time, key)),
            _ => None,
        })
        .collect();

    let mut combined: Vec<_> = primary_abs
        .into_iter()
        .filter(|ev| match ev.kind {
            MessageKind::NoteOn { key, velocity, .. } if velocity > 0 => {
                !conflicts.contains(&(ev.time, key))
            }
            _ => true,
        })
        .collect();
    combined.extend(secondary_abs);
    combined.sort_by_key(|ev| ev.time);

    let mut track = to_relative(&combined)?;
    track.push(Message::end_of_track());
    Ok(track)
}
