// Event timeline
// Converts between delta-encoded tracks and absolute-time event sequences

use crate::error::EngineError;
use crate::midi::event::{Message, MessageKind, Track};

/// A message pinned to an absolute tick position within its track.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsEvent {
    /// Ticks since the start of the track.
    pub time: u64,
    pub kind: MessageKind,
}

/// Convert a delta-encoded track to absolute time.
///
/// Each event's position is the running sum of the deltas before it.
/// Original order is preserved exactly; the result is non-decreasing in time
/// because deltas are unsigned.
pub fn to_absolute(track: &Track) -> Vec<AbsEvent> {
    let mut now: u64 = 0;
    let mut out = Vec::with_capacity(track.len());
    for msg in track.iter() {
        now += u64::from(msg.delta);
        out.push(AbsEvent {
            time: now,
            kind: msg.kind.clone(),
        });
    }
    out
}

/// Convert an absolute-time sequence back to a delta-encoded track.
///
/// The input must already be sorted by ascending time; equal-time events keep
/// their given order. A decreasing time is an `Ordering` error — the engine
/// only calls this on sequences it sorted itself, so that path should be
/// unreachable in correct use.
pub fn to_relative(events: &[AbsEvent]) -> Result<Track, EngineError> {
    let mut last: u64 = 0;
    let mut out = Vec::with_capacity(events.len());
    for ev in events {
        if ev.time < last {
            return Err(EngineError::Ordering {
                prev: last,
                next: ev.time,
            });
        }
        let delta = ev.time - last;
        out.push(Message::new(delta as u32, ev.kind.clone()));
        last = ev.time;
    }
    Ok(Track::new(out))
}
