mod post_meeting_note;

pub use post_meeting_note::{
    get_meeting_note, post_meeting_note, ATTACHMENT_FOLDER, NOTIFICATION_TITLE,
};
