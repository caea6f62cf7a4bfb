//! form-state - validated form state that renders to multipart bracket keys.
//!
//! [`create_managed`] takes an initial record or sequence and an optional
//! schema (one is inferred from the value when absent), validates the value,
//! and returns [`ManagedData`]: a privately owned tree in which every write
//! wraps newly stored containers so the whole tree stays managed.
//! [`ManagedData::render`] flattens the current state into a
//! [`TransportObject`] keyed like `user[name]`, `tags[0]`, with binary
//! payloads passed through untouched.
//!
//! ```
//! use form_state::{create_managed, TransportValue};
//! use form_state_value::Value;
//! use serde_json::json;
//!
//! let initial = Value::from(json!({"user": {"name": "Bob"}, "tags": ["a"]}));
//! let mut form = create_managed(&initial, None).unwrap();
//!
//! let root = form.data_mut().as_record_mut().unwrap();
//! root.sequence_mut("tags").unwrap().push("b");
//!
//! let body = form.render();
//! assert_eq!(body.keys().collect::<Vec<_>>(), vec!["user[name]", "tags[0]", "tags[1]"]);
//! assert_eq!(body.get("tags[1]"), Some(&TransportValue::from("b")));
//! ```

mod create;
mod error;
pub mod managed;
pub mod transport;

pub use create::{create_managed, create_managed_with, CreateOptions, ManagedData};
pub use error::FormStateError;
pub use managed::{wrap, IntoManaged, Leaf, ManagedRecord, ManagedSequence, ManagedValue, MAX_PADDING};
pub use transport::{flatten_into, flatten_value, TransportObject, TransportValue};
