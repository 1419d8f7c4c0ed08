use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Small tagged value stored in property bags and state snapshots.
///
/// Equality and hashing are structural. Floats compare by a canonical bit pattern (`-0.0` is
/// folded into `0.0`, every NaN into one NaN) so that `a == b` implies `hash(a) == hash(b)`.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Owned string.
    Str(String),
    /// Ordered tuple of values.
    Tuple(Vec<Value>),
    /// Nested key-ordered map (used for child snapshots inside composite snapshots).
    Map(BTreeMap<String, Value>),
}

pub(crate) fn canonical_f64_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

impl Value {
    /// Numeric view of this value: ints and floats as-is, booleans as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integer view of this value; floats are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Float(_) => 1,
            Self::Bool(_) => 2,
            Self::Str(_) => 3,
            Self::Tuple(_) => 4,
            Self::Map(_) => 5,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical_f64_bits(*a) == canonical_f64_bits(*b),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            Self::Int(v) => v.hash(state),
            Self::Float(v) => canonical_f64_bits(*v).hash(state),
            Self::Bool(v) => v.hash(state),
            Self::Str(v) => v.hash(state),
            Self::Tuple(v) => v.hash(state),
            Self::Map(v) => v.hash(state),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

value_from_int!(i64, i32, i16, i8, u32, u16, u8);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Tuple(v)
    }
}

impl From<(i32, i32)> for Value {
    fn from((a, b): (i32, i32)) -> Self {
        Self::Tuple(vec![Self::from(a), Self::from(b)])
    }
}

impl From<[u8; 3]> for Value {
    fn from(c: [u8; 3]) -> Self {
        Self::Tuple(c.iter().map(|&v| Self::from(v)).collect())
    }
}

impl From<[u8; 4]> for Value {
    fn from(c: [u8; 4]) -> Self {
        Self::Tuple(c.iter().map(|&v| Self::from(v)).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Tuple(Vec::new()),
        }
    }
}

impl From<Snapshot> for Value {
    fn from(s: Snapshot) -> Self {
        Self::Map(s.entries)
    }
}

/// Mutable named-value store carried by every scene child.
///
/// Position (`x`, `y`), `opacity` and `z_index` are conventional keys; animations may read and
/// write any other key. Absent numeric keys read as `0` (except `opacity`, which reads as `1`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct PropertyBag {
    values: BTreeMap<String, Value>,
}

impl PropertyBag {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag positioned at `(x, y)`.
    pub fn at(x: i32, y: i32) -> Self {
        Self::new().with("x", x).with("y", y)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Borrow a raw property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Numeric property, `0.0` when absent or non-numeric.
    pub fn get_f64(&self, key: &str) -> f64 {
        self.values.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Horizontal position in pixels (truncated).
    pub fn x(&self) -> i32 {
        crate::foundation::math::trunc_px(self.get_f64("x"))
    }

    /// Vertical position in pixels (truncated).
    pub fn y(&self) -> i32 {
        crate::foundation::math::trunc_px(self.get_f64("y"))
    }

    /// Composite opacity, `1.0` when absent.
    pub fn opacity(&self) -> f64 {
        self.values
            .get("opacity")
            .and_then(Value::as_f64)
            .unwrap_or(1.0)
    }

    /// Stacking order, `0` when absent.
    pub fn z_index(&self) -> i64 {
        self.values.get("z_index").and_then(Value::as_i64).unwrap_or(0)
    }

    /// Iterate properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag has no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Map(self.values.clone())
    }
}

/// Hashable, time-free summary of everything that affects a node's pixels.
///
/// This is the sole cache key of a node's pixel-producing step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Borrow an entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
