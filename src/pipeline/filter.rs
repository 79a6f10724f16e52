// Filter pipeline
// Split, classify, select, standardize, and relocate bass for one file

use crate::channels::bass::relocate_bass;
use crate::channels::split::split_by_channel;
use crate::channels::standardize::standardize_channels;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::midi::event::{FileFormat, MidiFile};
use crate::pipeline::report::{FilterReport, TrackSummary};
use crate::tracks::classify::TrackInfo;
use crate::tracks::select::select_top_tracks;

/// A transformed file plus the structured account of what changed.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub file: MidiFile,
    pub report: FilterReport,
}

/// Run the full filter pipeline on one in-memory file.
///
/// Format 0 is split into per-channel tracks first; format 1 passes straight
/// to selection; format 2 is rejected. The kept tracks are standardized onto
/// the configured channel layout, a bass part is detected and relocated, and
/// the output is assembled as a format-1 file sorted by channel (no-channel
/// tracks last) with the source `ticks_per_beat`.
///
/// Purely in-memory and stateless: one file's failure is a discrete `Err`
/// that cannot affect any other call.
pub fn filter_file(file: &MidiFile, config: &EngineConfig) -> Result<FilterOutcome, EngineError> {
    let (working, converted) = match file.format {
        FileFormat::SingleTrack => (split_by_channel(file)?, true),
        FileFormat::Parallel => (file.clone(), false),
        FileFormat::Sequential => return Err(EngineError::UnsupportedFormat(2)),
    };
    if converted {
        log::info!(
            "split format 0 file into {} tracks",
            working.tracks.len()
        );
    }

    let ticks_per_beat = working.ticks_per_beat;
    let original_tracks = working.tracks.len();

    let infos: Vec<TrackInfo> = working
        .tracks
        .into_iter()
        .enumerate()
        .map(|(index, track)| TrackInfo::new(index, track))
        .collect();

    let (kept, removed_sparse) = select_top_tracks(infos, config.min_events, config.max_tracks);
    let kept = standardize_channels(kept, config);
    let mut kept = relocate_bass(kept, config);

    // Output order is by channel, meta-only tracks last.
    kept.sort_by_key(|t| t.channel.map_or(u16::MAX, u16::from));

    let bass_detected = kept.iter().any(|t| t.is_bass);
    if bass_detected {
        log::info!("bass part detected, relocated to channel {}", config.bass_channel);
    }

    let summaries: Vec<TrackSummary> = kept.iter().map(TrackSummary::from_info).collect();
    let kept_tracks = kept.len();

    let mut out = MidiFile::new(FileFormat::Parallel, ticks_per_beat);
    out.tracks = kept.into_iter().map(TrackInfo::into_track).collect();

    Ok(FilterOutcome {
        file: out,
        report: FilterReport {
            original_tracks,
            kept_tracks,
            removed_sparse,
            converted_from_single_track: converted,
            bass_detected,
            tracks: summaries,
        },
    })
}
