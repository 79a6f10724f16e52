// Track selection
// Drops sparse tracks and keeps the top N by event count

use crate::tracks::classify::TrackInfo;

/// Filter out tracks with fewer than `min_events` substantive events, then
/// keep the `max_kept` densest.
///
/// Ordering is deterministic: event count descending, ties broken by the
/// original track index ascending. Returns the kept list and how many were
/// removed. An empty result is valid, not an error.
pub fn select_top_tracks(
    tracks: Vec<TrackInfo>,
    min_events: usize,
    max_kept: usize,
) -> (Vec<TrackInfo>, usize) {
    let total = tracks.len();
    let mut kept: Vec<TrackInfo> = tracks
        .into_iter()
        .filter(|t| t.event_count >= min_events)
        .collect();

    kept.sort_by(|a, b| {
        b.event_count
            .cmp(&a.event_count)
            .then(a.index.cmp(&b.index))
    });
    kept.truncate(max_kept);

    let removed = total - kept.len();
    (kept, removed)
}
