// src/param.rs

//! Parameter descriptors and runtime values.
//!
//! Rust has no signature reflection, so each task declares its parameters
//! explicitly as an ordered list of [`Param`]s matching the positions its
//! body reads through [`Args`]. The descriptor carries everything the
//! option binder needs: display name, value kind, optionality, and the
//! value to pre-seed the argument slot with.

use anyhow::bail;

/// The type of value a parameter accepts on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
}

impl ValueKind {
    /// Convert a raw option value into a [`Value`] of this kind.
    ///
    /// `Bool` never goes through here; boolean parameters bind as
    /// presence-style options and receive their flag directly.
    pub(crate) fn convert(self, raw: &str) -> Result<Value, String> {
        match self {
            ValueKind::Bool => match raw {
                "true" | "+" => Ok(Value::Bool(true)),
                "false" | "-" => Ok(Value::Bool(false)),
                _ => Err(format!("could not convert \"{raw}\" to a boolean")),
            },
            ValueKind::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("could not convert \"{raw}\" to an integer")),
            ValueKind::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("could not convert \"{raw}\" to a number")),
            ValueKind::Str => Ok(Value::Str(raw.to_string())),
        }
    }

    /// The kind's zero value, used to seed `_opt`-marked parameters that
    /// declare no explicit default.
    fn zero(self) -> Value {
        match self {
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Int => Value::Int(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Str => Value::Str(String::new()),
        }
    }
}

/// A bound argument value, one slot per declared parameter.
///
/// `Null` is the absent sentinel: nullable parameters that were never
/// supplied stay `Null`, and required parameters hold `Null` until
/// validation confirms they were supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Trailing name marker that forces a parameter to be optional.
const OPT_MARKER: &str = "_opt";

/// Descriptor for one parameter of a task's invocation.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    kind: ValueKind,
    nullable: bool,
    marker_optional: bool,
    default: Option<Value>,
    description: Option<String>,
}

impl Param {
    /// Create a descriptor with the given display name and kind.
    ///
    /// A trailing `_opt` in the name is stripped and forces the parameter
    /// to be optional, seeded with the kind's zero value unless a default
    /// is declared.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        let mut name = name.into();
        let marker_optional = name.len() > OPT_MARKER.len() && name.ends_with(OPT_MARKER);
        if marker_optional {
            name.truncate(name.len() - OPT_MARKER.len());
        }
        Self {
            name,
            kind,
            nullable: false,
            marker_optional,
            default: None,
            description: None,
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Bool)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Int)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Float)
    }

    pub fn str(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Str)
    }

    /// Mark the parameter nullable: absent means `Null`, read through the
    /// `opt_*` accessors on [`Args`]. Nullable parameters are optional.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Declare a default value, making the parameter optional.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach a description shown in help output.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the parameter may be left unsupplied: it declares a default,
    /// is nullable, is boolean (implicitly defaults to false), or carried
    /// the `_opt` name marker.
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
            || self.nullable
            || self.kind == ValueKind::Bool
            || self.marker_optional
    }

    /// The value each run seeds the parameter's argument slot with.
    pub(crate) fn seed(&self) -> Value {
        if let Some(default) = &self.default {
            return default.clone();
        }
        if self.nullable {
            return Value::Null;
        }
        if self.kind == ValueKind::Bool || self.marker_optional {
            return self.kind.zero();
        }
        Value::Null
    }
}

/// Positional view over a task's bound argument values, passed to the body.
///
/// The typed accessors fail if the slot's declared kind does not match,
/// which points at a mismatch between the parameter list and the body.
#[derive(Debug)]
pub struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw access to one slot.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn str(&self, index: usize) -> anyhow::Result<&'a str> {
        match self.slot(index)? {
            Value::Str(s) => Ok(s),
            other => Self::mismatch(index, "a string", other),
        }
    }

    pub fn int(&self, index: usize) -> anyhow::Result<i64> {
        match self.slot(index)? {
            Value::Int(v) => Ok(*v),
            other => Self::mismatch(index, "an integer", other),
        }
    }

    pub fn float(&self, index: usize) -> anyhow::Result<f64> {
        match self.slot(index)? {
            Value::Float(v) => Ok(*v),
            other => Self::mismatch(index, "a number", other),
        }
    }

    pub fn flag(&self, index: usize) -> anyhow::Result<bool> {
        match self.slot(index)? {
            Value::Bool(v) => Ok(*v),
            other => Self::mismatch(index, "a boolean", other),
        }
    }

    /// Nullable string slot: `Null` reads as `None`.
    pub fn opt_str(&self, index: usize) -> anyhow::Result<Option<&'a str>> {
        match self.slot(index)? {
            Value::Null => Ok(None),
            Value::Str(s) => Ok(Some(s)),
            other => Self::mismatch(index, "a string", other),
        }
    }

    /// Nullable integer slot: `Null` reads as `None`.
    pub fn opt_int(&self, index: usize) -> anyhow::Result<Option<i64>> {
        match self.slot(index)? {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(*v)),
            other => Self::mismatch(index, "an integer", other),
        }
    }

    /// Nullable float slot: `Null` reads as `None`.
    pub fn opt_float(&self, index: usize) -> anyhow::Result<Option<f64>> {
        match self.slot(index)? {
            Value::Null => Ok(None),
            Value::Float(v) => Ok(Some(*v)),
            other => Self::mismatch(index, "a number", other),
        }
    }

    fn slot(&self, index: usize) -> anyhow::Result<&'a Value> {
        match self.values.get(index) {
            Some(v) => Ok(v),
            None => bail!(
                "argument index {index} out of range ({} declared)",
                self.values.len()
            ),
        }
    }

    fn mismatch<T>(index: usize, wanted: &str, got: &Value) -> anyhow::Result<T> {
        bail!("argument {index} is not {wanted} (got {got:?})")
    }
}
