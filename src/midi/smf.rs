// Standard MIDI File codec boundary
// The only module that touches midly; everything else works on the owned model

use midly::num::{u14, u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use crate::error::EngineError;
use crate::midi::event::{FileFormat, Message, MessageKind, MetaKind, MidiFile, Track};

/// Parse Standard MIDI File bytes into the owned model.
///
/// Only metrical (ticks-per-beat) time bases are accepted; SMPTE timecode
/// files are rejected as malformed for this engine's purposes.
pub fn parse(bytes: &[u8]) -> Result<MidiFile, EngineError> {
    let smf = Smf::parse(bytes).map_err(|e| EngineError::MalformedFile(e.to_string()))?;

    let format = match smf.header.format {
        Format::SingleTrack => FileFormat::SingleTrack,
        Format::Parallel => FileFormat::Parallel,
        Format::Sequential => FileFormat::Sequential,
    };
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int(),
        Timing::Timecode(..) => {
            return Err(EngineError::MalformedFile(
                "SMPTE timecode time base is not supported".into(),
            ))
        }
    };

    let mut file = MidiFile::new(format, ticks_per_beat);
    for track in &smf.tracks {
        let mut events = Vec::with_capacity(track.len());
        for ev in track {
            events.push(Message::new(ev.delta.as_int(), kind_from_midly(&ev.kind)));
        }
        file.tracks.push(Track::new(events));
    }
    Ok(file)
}

/// Encode the owned model back to Standard MIDI File bytes.
pub fn encode(file: &MidiFile) -> Result<Vec<u8>, EngineError> {
    let format = match file.format {
        FileFormat::SingleTrack => Format::SingleTrack,
        FileFormat::Parallel => Format::Parallel,
        FileFormat::Sequential => Format::Sequential,
    };
    let header = Header {
        format,
        timing: Timing::Metrical(u15::new(file.ticks_per_beat)),
    };

    let mut tracks: Vec<Vec<TrackEvent>> = Vec::with_capacity(file.tracks.len());
    for track in &file.tracks {
        let mut events = Vec::with_capacity(track.len());
        for msg in track.iter() {
            events.push(TrackEvent {
                delta: u28::new(msg.delta),
                kind: kind_to_midly(&msg.kind),
            });
        }
        tracks.push(events);
    }

    let smf = Smf { header, tracks };
    let mut bytes = Vec::new();
    smf.write(&mut bytes)
        .map_err(|e| EngineError::MalformedFile(format!("write failed: {}", e)))?;
    Ok(bytes)
}

fn kind_from_midly(kind: &TrackEventKind<'_>) -> MessageKind {
    match *kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            match message {
                MidiMessage::NoteOff { key, vel } => MessageKind::NoteOff {
                    channel,
                    key: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::NoteOn { key, vel } => MessageKind::NoteOn {
                    channel,
                    key: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::Aftertouch { key, vel } => MessageKind::Aftertouch {
                    channel,
                    key: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::Controller { controller, value } => MessageKind::Controller {
                    channel,
                    controller: controller.as_int(),
                    value: value.as_int(),
                },
                MidiMessage::ProgramChange { program } => MessageKind::ProgramChange {
                    channel,
                    program: program.as_int(),
                },
                MidiMessage::ChannelAftertouch { vel } => MessageKind::ChannelAftertouch {
                    channel,
                    velocity: vel.as_int(),
                },
                MidiMessage::PitchBend { bend } => MessageKind::PitchBend {
                    channel,
                    bend: bend.0.as_int(),
                },
            }
        }
        TrackEventKind::SysEx(data) => MessageKind::SysEx(data.to_vec()),
        TrackEventKind::Escape(data) => MessageKind::Escape(data.to_vec()),
        TrackEventKind::Meta(meta) => MessageKind::Meta(meta_from_midly(&meta)),
    }
}

fn meta_from_midly(meta: &MetaMessage<'_>) -> MetaKind {
    match *meta {
        MetaMessage::TrackNumber(n) => MetaKind::TrackNumber(n),
        MetaMessage::Text(d) => MetaKind::Text(d.to_vec()),
        MetaMessage::Copyright(d) => MetaKind::Copyright(d.to_vec()),
        MetaMessage::TrackName(d) => MetaKind::TrackName(d.to_vec()),
        MetaMessage::InstrumentName(d) => MetaKind::InstrumentName(d.to_vec()),
        MetaMessage::Lyric(d) => MetaKind::Lyric(d.to_vec()),
        MetaMessage::Marker(d) => MetaKind::Marker(d.to_vec()),
        MetaMessage::CuePoint(d) => MetaKind::CuePoint(d.to_vec()),
        MetaMessage::ProgramName(d) => MetaKind::ProgramName(d.to_vec()),
        MetaMessage::DeviceName(d) => MetaKind::DeviceName(d.to_vec()),
        MetaMessage::MidiChannel(c) => MetaKind::MidiChannel(c.as_int()),
        MetaMessage::MidiPort(p) => MetaKind::MidiPort(p.as_int()),
        MetaMessage::EndOfTrack => MetaKind::EndOfTrack,
        MetaMessage::Tempo(t) => MetaKind::Tempo(t.as_int()),
        MetaMessage::SmpteOffset(time) => MetaKind::SmpteOffset(time),
        MetaMessage::TimeSignature(n, d, c, b) => MetaKind::TimeSignature(n, d, c, b),
        MetaMessage::KeySignature(sharps, minor) => MetaKind::KeySignature(sharps, minor),
        MetaMessage::SequencerSpecific(d) => MetaKind::SequencerSpecific(d.to_vec()),
        MetaMessage::Unknown(kind, d) => MetaKind::Unknown(kind, d.to_vec()),
    }
}

fn kind_to_midly<'a>(kind: &'a MessageKind) -> TrackEventKind<'a> {
    match *kind {
        MessageKind::NoteOff { channel, key, velocity } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::NoteOff {
                key: u7::new(key),
                vel: u7::new(velocity),
            },
        },
        MessageKind::NoteOn { channel, key, velocity } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::NoteOn {
                key: u7::new(key),
                vel: u7::new(velocity),
            },
        },
        MessageKind::Aftertouch { channel, key, velocity } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::Aftertouch {
                key: u7::new(key),
                vel: u7::new(velocity),
            },
        },
        MessageKind::Controller { channel, controller, value } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::Controller {
                controller: u7::new(controller),
                value: u7::new(value),
            },
        },
        MessageKind::ProgramChange { channel, program } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::ProgramChange {
                program: u7::new(program),
            },
        },
        MessageKind::ChannelAftertouch { channel, velocity } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::ChannelAftertouch {
                vel: u7::new(velocity),
            },
        },
        MessageKind::PitchBend { channel, bend } => TrackEventKind::Midi {
            channel: u4::new(channel),
            message: MidiMessage::PitchBend {
                bend: midly::PitchBend(u14::new(bend)),
            },
        },
        MessageKind::SysEx(ref data) => TrackEventKind::SysEx(data),
        MessageKind::Escape(ref data) => TrackEventKind::Escape(data),
        MessageKind::Meta(ref meta) => TrackEventKind::Meta(meta_to_midly(meta)),
    }
}

fn meta_to_midly(meta: &MetaKind) -> MetaMessage<'_> {
    match *meta {
        MetaKind::TrackNumber(n) => MetaMessage::TrackNumber(n),
        MetaKind::Text(ref d) => MetaMessage::Text(d),
        MetaKind::Copyright(ref d) => MetaMessage::Copyright(d),
        MetaKind::TrackName(ref d) => MetaMessage::TrackName(d),
        MetaKind::InstrumentName(ref d) => MetaMessage::InstrumentName(d),
        MetaKind::Lyric(ref d) => MetaMessage::Lyric(d),
        MetaKind::Marker(ref d) => MetaMessage::Marker(d),
        MetaKind::CuePoint(ref d) => MetaMessage::CuePoint(d),
        MetaKind::ProgramName(ref d) => MetaMessage::ProgramName(d),
        MetaKind::DeviceName(ref d) => MetaMessage::DeviceName(d),
        MetaKind::MidiChannel(c) => MetaMessage::MidiChannel(u4::new(c)),
        MetaKind::MidiPort(p) => MetaMessage::MidiPort(u7::new(p)),
        MetaKind::EndOfTrack => MetaMessage::EndOfTrack,
        MetaKind::Tempo(t) => MetaMessage::Tempo(u24::new(t)),
        MetaKind::SmpteOffset(time) => MetaMessage::SmpteOffset(time),
        MetaKind::TimeSignature(n, d, c, b) => MetaMessage::TimeSignature(n, d, c, b),
        MetaKind::KeySignature(sharps, minor) => MetaMessage::KeySignature(sharps, minor),
        MetaKind::SequencerSpecific(ref d) => MetaMessage::SequencerSpecific(d),
        MetaKind::Unknown(kind, ref d) => MetaMessage::Unknown(kind, d),
    }
}
