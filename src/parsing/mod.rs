//! Export parsing: header recognition, segmentation and classification.
//!
//! - [`header`] - the one-line header grammar and the forwarded marker
//! - [`segment`] - the line-oriented state machine that recovers messages
//! - [`classify`] - forwarded / attachment / plain tagging

pub mod classify;
pub mod header;
pub mod segment;

pub use classify::{
    ATTACHMENT_MARKER, Classified, FORWARDED_PLACEHOLDER, MessageKind, classify, classify_body,
};
pub use header::{
    HeaderMatch, TIMESTAMP_FORMAT, contains_forwarded_marker, is_header, match_header,
};
pub use segment::{RawMessage, SegmentMachine, Segmenter, segment};
