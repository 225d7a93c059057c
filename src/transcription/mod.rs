pub mod engine;
pub mod formatter;

pub use engine::{Segment, TranscriptionEngine};
pub use formatter::{format_timestamp, TranscriptFormatter};
