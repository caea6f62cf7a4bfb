//! Schema integrity validator.
//!
//! Catches authored schemas that could never accept anything, such as
//! `min > max`, before they are used to validate data.

use super::schema::*;
use crate::error::SchemaError;

/// Validate a schema for structural integrity.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    match schema {
        Schema::Any(_) | Schema::Undef(_) | Schema::Nil(_) | Schema::Bool(_) | Schema::Con(_) => {
            Ok(())
        }
        Schema::Num(s) => validate_num(s),
        Schema::Str(s) => check_min_max(s.min, s.max),
        Schema::Bin(s) => validate_bin(s),
        Schema::Arr(s) => {
            check_min_max(s.min, s.max)?;
            validate_schema(&s.type_).map_err(|e| e.at("type"))
        }
        Schema::Obj(s) => validate_obj(s),
        Schema::Map(s) => validate_schema(&s.value).map_err(|e| e.at("value")),
        Schema::Or(s) => validate_or(s),
    }
}

fn check_min_max(min: Option<u64>, max: Option<u64>) -> Result<(), SchemaError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(SchemaError::new("MIN_MAX"));
        }
    }
    Ok(())
}

fn validate_num(s: &NumSchema) -> Result<(), SchemaError> {
    if s.gt.is_some() && s.gte.is_some() {
        return Err(SchemaError::new("GT_GTE"));
    }
    if s.lt.is_some() && s.lte.is_some() {
        return Err(SchemaError::new("LT_LTE"));
    }
    let lo = s.gt.or(s.gte);
    let hi = s.lt.or(s.lte);
    if let (Some(lo), Some(hi)) = (lo, hi) {
        if lo > hi {
            return Err(SchemaError::new("GT_LT"));
        }
    }
    Ok(())
}

fn validate_bin(s: &BinSchema) -> Result<(), SchemaError> {
    check_min_max(s.min, s.max)?;
    if let Some(types) = &s.content_types {
        if types.is_empty() {
            return Err(SchemaError::new("CONTENT_TYPES_EMPTY"));
        }
    }
    Ok(())
}

fn validate_obj(s: &ObjSchema) -> Result<(), SchemaError> {
    for (i, key) in s.keys.iter().enumerate() {
        if key.key.is_empty() {
            return Err(SchemaError::new("KEY_EMPTY"));
        }
        if s.keys[..i].iter().any(|k| k.key == key.key) {
            return Err(SchemaError::new("KEY_DUPLICATE"));
        }
        validate_schema(&key.value).map_err(|e| e.at(&key.key))?;
    }
    Ok(())
}

fn validate_or(s: &OrSchema) -> Result<(), SchemaError> {
    if s.types.is_empty() {
        return Err(SchemaError::new("TYPES_LENGTH"));
    }
    for (i, t) in s.types.iter().enumerate() {
        validate_schema(t).map_err(|e| e.at(&i.to_string()).at("types"))?;
    }
    Ok(())
}
