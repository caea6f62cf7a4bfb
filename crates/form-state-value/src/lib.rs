//! form-state-value - the value model shared by the form-state crates.
//!
//! A [`Value`] is a tree of records, sequences and leaves. Binary attachments
//! ([`BinaryPayload`]) are opaque shared handles: every recursive walk in the
//! workspace asks [`is_binary_payload`] before descending, and none of them
//! ever copies or inspects the bytes.

mod binary;
mod clone;
mod equal;
mod opaque;
mod path;
mod text;
mod value;

pub use binary::{is_binary_payload, BinaryPayload, Blob};
pub use clone::deep_clone;
pub use equal::deep_equal;
pub use opaque::OpaqueValue;
pub use path::{bracket_key, compose_key, escape_component, format_pointer, PathSeg};
pub use text::format_number;
pub use value::{Record, Value, ValueKind};
