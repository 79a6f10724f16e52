// Owned MIDI event model
// Value types the engine transforms; midly is only touched at the codec boundary

/// The "what happened" part of an event, without timing.
///
/// Channel-voice variants carry their channel inline. Kinds the engine never
/// examines (pitch bend, aftertouch, sysex, most metas) still get their own
/// variants so they round-trip through a transform unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    NoteOff { channel: u8, key: u8, velocity: u8 },
    NoteOn { channel: u8, key: u8, velocity: u8 },
    Aftertouch { channel: u8, key: u8, velocity: u8 },
    Controller { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelAftertouch { channel: u8, velocity: u8 },
    PitchBend { channel: u8, bend: u16 },
    Meta(MetaKind),
    SysEx(Vec<u8>),
    Escape(Vec<u8>),
}

/// Lossless owned mirror of the SMF meta-event set.
///
/// The engine only inspects `Tempo`, `TrackName` and `EndOfTrack`; everything
/// else exists so that arbitrary input files survive a rewrite byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaKind {
    TrackNumber(Option<u16>),
    Text(Vec<u8>),
    Copyright(Vec<u8>),
    TrackName(Vec<u8>),
    InstrumentName(Vec<u8>),
    Lyric(Vec<u8>),
    Marker(Vec<u8>),
    CuePoint(Vec<u8>),
    ProgramName(Vec<u8>),
    DeviceName(Vec<u8>),
    MidiChannel(u8),
    MidiPort(u8),
    EndOfTrack,
    /// Microseconds per quarter note.
    Tempo(u32),
    SmpteOffset(midly::SmpteTime),
    TimeSignature(u8, u8, u8, u8),
    KeySignature(i8, bool),
    SequencerSpecific(Vec<u8>),
    Unknown(u8, Vec<u8>),
}

impl MessageKind {
    /// Channel of a channel-voice message, `None` for meta/sysex.
    pub fn channel(&self) -> Option<u8> {
        match *self {
            MessageKind::NoteOff { channel, .. }
            | MessageKind::NoteOn { channel, .. }
            | MessageKind::Aftertouch { channel, .. }
            | MessageKind::Controller { channel, .. }
            | MessageKind::ProgramChange { channel, .. }
            | MessageKind::ChannelAftertouch { channel, .. }
            | MessageKind::PitchBend { channel, .. } => Some(channel),
            MessageKind::Meta(_) | MessageKind::SysEx(_) | MessageKind::Escape(_) => None,
        }
    }

    /// Copy of this kind with the channel replaced; non-channel kinds are
    /// returned unchanged.
    pub fn with_channel(&self, new_channel: u8) -> MessageKind {
        let mut kind = self.clone();
        match kind {
            MessageKind::NoteOff { ref mut channel, .. }
            | MessageKind::NoteOn { ref mut channel, .. }
            | MessageKind::Aftertouch { ref mut channel, .. }
            | MessageKind::Controller { ref mut channel, .. }
            | MessageKind::ProgramChange { ref mut channel, .. }
            | MessageKind::ChannelAftertouch { ref mut channel, .. }
            | MessageKind::PitchBend { ref mut channel, .. } => *channel = new_channel,
            MessageKind::Meta(_) | MessageKind::SysEx(_) | MessageKind::Escape(_) => {}
        }
        kind
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, MessageKind::Meta(_))
    }

    /// A sounding note onset: note-on with velocity above zero.
    /// Note-on with velocity 0 is a note-off by convention.
    pub fn is_note_onset(&self) -> bool {
        matches!(self, MessageKind::NoteOn { velocity, .. } if *velocity > 0)
    }
}

/// A timed event: delta ticks since the previous message in its track.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub delta: u32,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(delta: u32, kind: MessageKind) -> Self {
        Message { delta, kind }
    }

    /// Synthetic end-of-track marker.
    pub fn end_of_track() -> Self {
        Message::new(0, MessageKind::Meta(MetaKind::EndOfTrack))
    }
}

/// An ordered sequence of delta-timed messages. Ordering is significant;
/// delta values are only meaningful in sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub events: Vec<Message>,
}

impl Track {
    pub fn new(events: Vec<Message>) -> Self {
        Track { events }
    }

    pub fn push(&mut self, msg: Message) {
        self.events.push(msg);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.events.iter()
    }
}

/// SMF header format field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Format 0: one multiplexed track.
    SingleTrack,
    /// Format 1: independent tracks sharing a time base.
    Parallel,
    /// Format 2: sequential songs. Read but not processed.
    Sequential,
}

/// An in-memory Standard MIDI File.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiFile {
    pub format: FileFormat,
    /// Time-base resolution shared by every track. Never resampled.
    pub ticks_per_beat: u16,
    pub tracks: Vec<Track>,
}

impl MidiFile {
    pub fn new(format: FileFormat, ticks_per_beat: u16) -> Self {
        MidiFile {
            format,
            ticks_per_beat,
            tracks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_accessor_covers_voice_kinds() {
        let on = MessageKind::NoteOn { channel: 3, key: 60, velocity: 100 };
        assert_eq!(on.channel(), Some(3));

        let cc = MessageKind::Controller { channel: 15, controller: 7, value: 90 };
        assert_eq!(cc.channel(), Some(15));

        let meta = MessageKind::Meta(MetaKind::EndOfTrack);
        assert_eq!(meta.channel(), None);

        let sysex = MessageKind::SysEx(vec![0xF0, 0x7E, 0xF7]);
        assert_eq!(sysex.channel(), None);
    }

    #[test]
    fn with_channel_rewrites_only_voice_kinds() {
        let on = MessageKind::NoteOn { channel: 7, key: 40, velocity: 64 };
        assert_eq!(
            on.with_channel(1),
            MessageKind::NoteOn { channel: 1, key: 40, velocity: 64 }
        );

        let meta = MessageKind::Meta(MetaKind::Tempo(500_000));
        assert_eq!(meta.with_channel(1), meta);
    }

    #[test]
    fn zero_velocity_note_on_is_not_an_onset() {
        let off = MessageKind::NoteOn { channel: 9, key: 38, velocity: 0 };
        assert!(!off.is_note_onset());

        let on = MessageKind::NoteOn { channel: 9, key: 38, velocity: 1 };
        assert!(on.is_note_onset());
    }
}
