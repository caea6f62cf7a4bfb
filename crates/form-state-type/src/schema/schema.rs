use form_state_value::Value;

/// Number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumFormat {
    /// Any integer.
    I,
    /// Non-negative integer.
    U,
    /// Any finite or infinite float.
    F,
}

impl NumFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I => "i",
            Self::U => "u",
            Self::F => "f",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::I | Self::U)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::U)
    }
}

/// String format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrFormat {
    Email,
    Url,
    Uuid,
}

impl StrFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
        }
    }
}

/// What an object schema does with fields it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Drop them from the accepted value.
    #[default]
    Strip,
    /// Keep them unchecked.
    Passthrough,
    /// Report them as a validation issue.
    Strict,
}

/// Fields common to all schema nodes.
#[derive(Debug, Clone, Default)]
pub struct SchemaBase {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Substituted when the value is missing or undefined.
    pub default: Option<Value>,
}

/// Represents any value (unknown type).
#[derive(Debug, Clone, Default)]
pub struct AnySchema {
    pub base: SchemaBase,
}

/// Accepts only `undefined`.
#[derive(Debug, Clone, Default)]
pub struct UndefSchema {
    pub base: SchemaBase,
}

/// Accepts only `null`.
#[derive(Debug, Clone, Default)]
pub struct NilSchema {
    pub base: SchemaBase,
}

/// Represents a boolean.
#[derive(Debug, Clone, Default)]
pub struct BoolSchema {
    pub base: SchemaBase,
    /// Convert other primitives by truthiness before checking.
    pub coerce: bool,
}

/// Represents a number with optional format and range constraints.
#[derive(Debug, Clone, Default)]
pub struct NumSchema {
    pub base: SchemaBase,
    pub format: Option<NumFormat>,
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
    /// Parse strings and convert booleans and null before checking.
    pub coerce: bool,
}

/// Represents a string.
#[derive(Debug, Clone, Default)]
pub struct StrSchema {
    pub base: SchemaBase,
    pub format: Option<StrFormat>,
    /// Minimum length in characters.
    pub min: Option<u64>,
    /// Maximum length in characters.
    pub max: Option<u64>,
    /// Stringify other primitives before checking.
    pub coerce: bool,
}

/// Represents a binary payload. Only the size and the declared content
/// type are ever looked at.
#[derive(Debug, Clone, Default)]
pub struct BinSchema {
    pub base: SchemaBase,
    /// Minimum size in bytes.
    pub min: Option<u64>,
    /// Maximum size in bytes.
    pub max: Option<u64>,
    /// Accepted content types; `None` accepts any.
    pub content_types: Option<Vec<String>>,
}

/// Represents a constant value.
#[derive(Debug, Clone)]
pub struct ConSchema {
    pub base: SchemaBase,
    pub value: Value,
}

/// Represents a sequence whose elements all match one schema.
#[derive(Debug, Clone)]
pub struct ArrSchema {
    pub base: SchemaBase,
    /// Element type.
    pub type_: Box<Schema>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Represents a single field of an object.
#[derive(Debug, Clone)]
pub struct KeySchema {
    pub base: SchemaBase,
    pub key: String,
    pub value: Box<Schema>,
    pub optional: bool,
}

/// Represents a record with defined keys.
#[derive(Debug, Clone, Default)]
pub struct ObjSchema {
    pub base: SchemaBase,
    pub keys: Vec<KeySchema>,
    pub unknown_keys: UnknownKeys,
}

/// Represents a record treated as a map (all values same type).
#[derive(Debug, Clone)]
pub struct MapSchema {
    pub base: SchemaBase,
    pub value: Box<Schema>,
}

/// Union of multiple types. The first matching member wins.
#[derive(Debug, Clone)]
pub struct OrSchema {
    pub base: SchemaBase,
    pub types: Vec<Schema>,
}

/// The unified Schema enum covering all schema kinds.
#[derive(Debug, Clone)]
pub enum Schema {
    Any(AnySchema),
    Undef(UndefSchema),
    Nil(NilSchema),
    Bool(BoolSchema),
    Num(NumSchema),
    Str(StrSchema),
    Bin(BinSchema),
    Con(ConSchema),
    Arr(ArrSchema),
    Obj(ObjSchema),
    Map(MapSchema),
    Or(OrSchema),
}

impl Schema {
    /// Returns the "kind" string identifier for this schema node.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Any(_) => "any",
            Self::Undef(_) => "undef",
            Self::Nil(_) => "nil",
            Self::Bool(_) => "bool",
            Self::Num(_) => "num",
            Self::Str(_) => "str",
            Self::Bin(_) => "bin",
            Self::Con(_) => "con",
            Self::Arr(_) => "arr",
            Self::Obj(_) => "obj",
            Self::Map(_) => "map",
            Self::Or(_) => "or",
        }
    }

    /// Returns the base schema fields.
    pub fn base(&self) -> &SchemaBase {
        match self {
            Self::Any(s) => &s.base,
            Self::Undef(s) => &s.base,
            Self::Nil(s) => &s.base,
            Self::Bool(s) => &s.base,
            Self::Num(s) => &s.base,
            Self::Str(s) => &s.base,
            Self::Bin(s) => &s.base,
            Self::Con(s) => &s.base,
            Self::Arr(s) => &s.base,
            Self::Obj(s) => &s.base,
            Self::Map(s) => &s.base,
            Self::Or(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut SchemaBase {
        match self {
            Self::Any(s) => &mut s.base,
            Self::Undef(s) => &mut s.base,
            Self::Nil(s) => &mut s.base,
            Self::Bool(s) => &mut s.base,
            Self::Num(s) => &mut s.base,
            Self::Str(s) => &mut s.base,
            Self::Bin(s) => &mut s.base,
            Self::Con(s) => &mut s.base,
            Self::Arr(s) => &mut s.base,
            Self::Obj(s) => &mut s.base,
            Self::Map(s) => &mut s.base,
            Self::Or(s) => &mut s.base,
        }
    }

    /// Sets the value substituted for a missing or undefined input.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.base_mut().default = Some(value.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.base_mut().title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.base_mut().description = Some(description.into());
        self
    }
}

impl NumSchema {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn format(mut self, format: NumFormat) -> Self {
        self.format = Some(format);
        self
    }
    pub fn gt(mut self, v: f64) -> Self {
        self.gt = Some(v);
        self
    }
    pub fn gte(mut self, v: f64) -> Self {
        self.gte = Some(v);
        self
    }
    pub fn lt(mut self, v: f64) -> Self {
        self.lt = Some(v);
        self
    }
    pub fn lte(mut self, v: f64) -> Self {
        self.lte = Some(v);
        self
    }
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

impl StrSchema {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn format(mut self, format: StrFormat) -> Self {
        self.format = Some(format);
        self
    }
    pub fn min(mut self, v: u64) -> Self {
        self.min = Some(v);
        self
    }
    pub fn max(mut self, v: u64) -> Self {
        self.max = Some(v);
        self
    }
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

impl BinSchema {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn min(mut self, v: u64) -> Self {
        self.min = Some(v);
        self
    }
    pub fn max(mut self, v: u64) -> Self {
        self.max = Some(v);
        self
    }
    pub fn content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_types = Some(types.into_iter().map(Into::into).collect());
        self
    }
}

impl ObjSchema {
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }
}

macro_rules! into_schema {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Schema {
                fn from(s: $ty) -> Self {
                    Schema::$variant(s)
                }
            }
        )*
    };
}

into_schema! {
    AnySchema => Any,
    UndefSchema => Undef,
    NilSchema => Nil,
    BoolSchema => Bool,
    NumSchema => Num,
    StrSchema => Str,
    BinSchema => Bin,
    ConSchema => Con,
    ArrSchema => Arr,
    ObjSchema => Obj,
    MapSchema => Map,
    OrSchema => Or,
}
