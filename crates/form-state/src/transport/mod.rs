//! Flat key/value rendering for multipart submission.

mod flatten;
mod object;

pub use flatten::{flatten_into, flatten_value, flatten_value_into};
pub use object::{TransportObject, TransportValue};
