//! File format handlers for commu script assets

pub mod commu;
pub mod gtx;

pub use commu::{ChoiceEvent, CommuEvent, CommuScript, SpeakerRef, SpeechEvent, read_commu};
pub use gtx::{StringEntry, StringTable, read_string_table};
