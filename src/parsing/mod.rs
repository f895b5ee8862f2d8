//! Line format definitions used by the [`LineParser`](crate::parser::LineParser).
//!
//! Only the WhatsApp text export family is supported; its locale variants
//! live in [`whatsapp`].

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{
    DateFormat, Header, LinePattern, detect_format, split_sender, strip_marks,
};
