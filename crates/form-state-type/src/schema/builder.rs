//! Fluent API for constructing schema values.

use form_state_value::Value;

use super::schema::*;

/// Builder for constructing schema values.
///
/// Lower-case methods are shorthands without options; capitalised methods
/// take the parts of the node they build.
///
/// ```
/// use form_state_type::SchemaBuilder;
///
/// let s = SchemaBuilder::new();
/// let signup = s.Object(
///     vec![
///         s.Key("email", s.email()),
///         s.KeyOpt("nickname", s.str()),
///         s.Key("tags", s.Array(s.str(), None)),
///     ],
///     None,
/// );
/// assert_eq!(signup.kind(), "obj");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder;

#[allow(non_snake_case)]
impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Shorthand property accessors (no options)

    pub fn str(&self) -> Schema {
        self.String(None)
    }

    pub fn num(&self) -> Schema {
        self.Number(None)
    }

    pub fn int(&self) -> Schema {
        NumSchema::new().format(NumFormat::I).into()
    }

    pub fn bool(&self) -> Schema {
        self.Boolean(None)
    }

    pub fn any(&self) -> Schema {
        self.Any(None)
    }

    pub fn arr(&self) -> Schema {
        self.Array(self.any(), None)
    }

    pub fn obj(&self) -> Schema {
        self.Object(vec![], None)
    }

    pub fn map(&self) -> Schema {
        self.Map(self.any(), None)
    }

    pub fn bin(&self) -> Schema {
        self.Binary(None)
    }

    pub fn undef(&self) -> Schema {
        Schema::Undef(UndefSchema::default())
    }

    pub fn nil(&self) -> Schema {
        Schema::Nil(NilSchema::default())
    }

    pub fn email(&self) -> Schema {
        StrSchema::new().format(StrFormat::Email).into()
    }

    pub fn url(&self) -> Schema {
        StrSchema::new().format(StrFormat::Url).into()
    }

    pub fn uuid(&self) -> Schema {
        StrSchema::new().format(StrFormat::Uuid).into()
    }

    // ------------------------------------------------------------------
    // Named constructors

    pub fn Boolean(&self, base: Option<SchemaBase>) -> Schema {
        Schema::Bool(BoolSchema {
            base: base.unwrap_or_default(),
            ..Default::default()
        })
    }

    pub fn Number(&self, base: Option<SchemaBase>) -> Schema {
        Schema::Num(NumSchema {
            base: base.unwrap_or_default(),
            ..Default::default()
        })
    }

    pub fn String(&self, base: Option<SchemaBase>) -> Schema {
        Schema::Str(StrSchema {
            base: base.unwrap_or_default(),
            ..Default::default()
        })
    }

    pub fn Any(&self, base: Option<SchemaBase>) -> Schema {
        Schema::Any(AnySchema {
            base: base.unwrap_or_default(),
        })
    }

    pub fn Const(&self, value: impl Into<Value>, base: Option<SchemaBase>) -> Schema {
        Schema::Con(ConSchema {
            base: base.unwrap_or_default(),
            value: value.into(),
        })
    }

    pub fn Binary(&self, base: Option<SchemaBase>) -> Schema {
        Schema::Bin(BinSchema {
            base: base.unwrap_or_default(),
            ..Default::default()
        })
    }

    pub fn Array(&self, type_: Schema, base: Option<SchemaBase>) -> Schema {
        Schema::Arr(ArrSchema {
            base: base.unwrap_or_default(),
            type_: Box::new(type_),
            min: None,
            max: None,
        })
    }

    pub fn Object(&self, keys: Vec<KeySchema>, base: Option<SchemaBase>) -> Schema {
        Schema::Obj(ObjSchema {
            base: base.unwrap_or_default(),
            keys,
            ..Default::default()
        })
    }

    pub fn Key(&self, key: impl Into<String>, value: Schema) -> KeySchema {
        KeySchema {
            base: SchemaBase::default(),
            key: key.into(),
            value: Box::new(value),
            optional: false,
        }
    }

    pub fn KeyOpt(&self, key: impl Into<String>, value: Schema) -> KeySchema {
        KeySchema {
            base: SchemaBase::default(),
            key: key.into(),
            value: Box::new(value),
            optional: true,
        }
    }

    pub fn Map(&self, value: Schema, base: Option<SchemaBase>) -> Schema {
        Schema::Map(MapSchema {
            base: base.unwrap_or_default(),
            value: Box::new(value),
        })
    }

    pub fn Or(&self, types: Vec<Schema>) -> Schema {
        Schema::Or(OrSchema {
            base: SchemaBase::default(),
            types,
        })
    }

    /// `type_` or `null`.
    pub fn Nullable(&self, type_: Schema) -> Schema {
        self.Or(vec![type_, self.nil()])
    }
}
