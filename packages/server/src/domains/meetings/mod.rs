//! Meetings domain - minutes and their attachments

pub mod activities;
pub mod data;
pub mod models;

pub use data::{Attachment, MeetingNoteData, MeetingNoteForm};
pub use models::MeetingNote;
