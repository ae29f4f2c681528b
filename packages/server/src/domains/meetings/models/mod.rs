pub mod meeting_note;

pub use meeting_note::MeetingNote;
