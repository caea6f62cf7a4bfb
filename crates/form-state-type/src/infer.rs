//! Shape inference: derive a schema from one sample value.
//!
//! The inferred schema is a structural mirror of the sample. It has no
//! optional fields, ranges or formats. Validating a later version of the
//! value against it answers "does this still have the original shape?".

use form_state_value::{is_binary_payload, Value};

use crate::schema::*;

/// Infers the schema of `value`.
///
/// - sequences: one schema per element; the element schema is that schema
///   for a single element, the union of all of them (in order, duplicates
///   kept) for several, and `any` for an empty sequence;
/// - records: one required key per field, in iteration order, and no
///   keys beyond those;
/// - binary payloads: a binary schema without constraints;
/// - primitives: the schema of their exact kind;
/// - anything else: `any`.
pub fn infer(value: &Value) -> Schema {
    if is_binary_payload(value) {
        return Schema::Bin(BinSchema::default());
    }
    match value {
        Value::Sequence(items) => {
            let mut types: Vec<Schema> = items.iter().map(infer).collect();
            let element = match types.len() {
                0 => Schema::Any(AnySchema::default()),
                1 => types.remove(0),
                _ => Schema::Or(OrSchema {
                    base: SchemaBase::default(),
                    types,
                }),
            };
            Schema::Arr(ArrSchema {
                base: SchemaBase::default(),
                type_: Box::new(element),
                min: None,
                max: None,
            })
        }
        Value::Record(fields) => Schema::Obj(ObjSchema {
            base: SchemaBase::default(),
            keys: fields
                .iter()
                .map(|(key, field)| KeySchema {
                    base: SchemaBase::default(),
                    key: key.clone(),
                    value: Box::new(infer(field)),
                    optional: false,
                })
                .collect(),
            // a union member must not accept a sibling with more keys
            unknown_keys: UnknownKeys::Strict,
        }),
        Value::Binary(_) => Schema::Bin(BinSchema::default()),
        Value::String(_) => Schema::Str(StrSchema::default()),
        Value::Number(_) => Schema::Num(NumSchema::default()),
        Value::Bool(_) => Schema::Bool(BoolSchema::default()),
        Value::Null => Schema::Nil(NilSchema::default()),
        Value::Undefined => Schema::Undef(UndefSchema::default()),
        Value::Unknown(_) => Schema::Any(AnySchema::default()),
    }
}
