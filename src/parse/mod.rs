pub mod checklist;
pub mod hyperlink;
pub mod note;
pub mod note_section;

pub use checklist::serialize_checklist;
pub use hyperlink::{Segment, segments};
pub use note::{decode_note, decode_note_str};
pub use note_section::{section_body, splice_section};
