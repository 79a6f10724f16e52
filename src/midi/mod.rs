// MIDI data model, wire codec, and time-model conversion

pub mod event;
pub mod smf;
pub mod timeline;

pub use event::{FileFormat, Message, MessageKind, MetaKind, MidiFile, Track};
pub use smf::{encode, parse};
pub use timeline::{to_absolute, to_relative, AbsEvent};
