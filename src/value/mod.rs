//! Module for the JSON value model
//!
//! [`Value`] is a closed tagged union over the JSON data types plus an [`Error`](Value::Error)
//! sentinel which represents a failed parse. Values own their children outright, so a value tree
//! is a strict tree without sharing and without back-references to the text it was parsed from.
//!
//! # Examples
//! ```
//! # use tagged_json::value::*;
//! let mut value = Value::from(Object::new());
//! value["numbers"] = Value::from_iter([Value::from(1), Value::from(2.5)]);
//! value["name"] = Value::from("example");
//!
//! assert_eq!(2, value.size());
//! assert_eq!(2.5, *value["numbers"][1].get::<f64>());
//! assert_eq!(r#"{"name": "example", "numbers": [1, 2.5]}"#, value.to_string());
//! ```

use std::collections::BTreeMap;

use duplicate::duplicate_item;

mod index;
#[cfg(feature = "serde")]
mod serde;

/// Payload of a JSON array
pub type Array = Vec<Value>;

/// Payload of a JSON object
///
/// Members are kept sorted by name. This order is the canonical order in which members
/// are serialized, regardless of the order in which they were inserted or parsed.
pub type Object = BTreeMap<String, Value>;

/// Type of a [`Value`]
///
/// The `Display` implementation writes the lowercase type name, for example `boolean`.
#[derive(PartialEq, Eq, Clone, Copy, Hash, strum::Display, strum::IntoStaticStr, Debug)]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
    /// JSON `null`
    Null,
    /// JSON boolean value, `true` or `false`
    Boolean,
    /// JSON number value, for example `123.4e+10`
    Number,
    /// JSON string value, for example `"text in \"quotes\""`
    String,
    /// JSON array: `[ ... ]`
    Array,
    /// JSON object: `{ ... }`
    Object,
    /// Not a JSON data type; the result of a failed parse
    Error,
}

/// A JSON value
///
/// Exactly one variant is active at a time. JSON makes no distinction between integral and
/// floating point numbers, so all numbers are stored as `f64`.
///
/// Accessing the payload of a value through the wrong type, for example calling
/// [`get::<bool>()`](Self::get) on a number or indexing a string, is considered incorrect usage
/// and panics. Use [`try_get`](Self::try_get) or the `as_...` methods when the type of the
/// value is not known in advance.
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Value {
    /// JSON `null`
    #[default]
    Null,
    /// JSON boolean value
    Boolean(bool),
    /// JSON number value
    Number(f64),
    /// JSON string value
    String(String),
    /// JSON array, preserving the order of its items
    Array(Array),
    /// JSON object, see [`Object`] for the member order
    Object(Object),
    /// Sentinel for a failed parse
    ///
    /// It is never produced as part of a successfully parsed value; when parsing fails the
    /// whole result is this sentinel.
    Error,
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

// Use `duplicate` crate to avoid repeating code for all supported types, see https://stackoverflow.com/a/61467564
#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize]; [f32]; [f64])]
impl From<type_template> for Value {
    /// Creates a [`Value::Number`]; the number is converted to `f64`, which might lose precision
    /// for large integral numbers
    #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
    fn from(v: type_template) -> Self {
        Value::Number(v as f64)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

/// Creates a [`Value::Array`] from the items
impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Creates a [`Value::Object`] from the members; for duplicate names the last member wins
impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

/// Sealed trait for the payload types of [`Value`]
///
/// Used by [`Value::get`], [`Value::get_mut`] and [`Value::try_get`] to select the payload.
/// It is implemented for `bool`, `f64`, `String`, [`Array`] and [`Object`]; implementing it
/// for other types is not possible.
pub trait Payload: private::Sealed {
    /// The value type whose payload this type is
    const VALUE_TYPE: ValueType;

    #[doc(hidden)]
    fn from_value(value: &Value) -> Option<&Self>;

    #[doc(hidden)]
    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;
}

mod private {
    use super::*;

    // Sealed trait, see https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
    pub trait Sealed {}

    #[duplicate_item(type_template; [bool]; [f64]; [String]; [Array]; [Object])]
    impl Sealed for type_template {}
}

#[duplicate_item(
    type_template   variant;
    [bool]          [Boolean];
    [f64]           [Number];
    [String]        [String];
    [Array]         [Array];
    [Object]        [Object];
)]
impl Payload for type_template {
    const VALUE_TYPE: ValueType = ValueType::variant;

    #[inline(always)]
    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::variant(payload) => Some(payload),
            _ => None,
        }
    }

    #[inline(always)]
    fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
        match value {
            Value::variant(payload) => Some(payload),
            _ => None,
        }
    }
}

impl Value {
    /// Gets the type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
            Value::Error => ValueType::Error,
        }
    }

    /// Gets the lowercase name of the type of this value, for example `"boolean"`
    pub fn type_name(&self) -> &'static str {
        self.value_type().into()
    }

    /// Whether this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is a [`Value::Boolean`]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Whether this is a [`Value::Number`]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Whether this is a [`Value::String`]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Whether this is a [`Value::Array`]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Whether this is a [`Value::Object`]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Whether this is the [`Value::Error`] sentinel
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error)
    }

    /// Gets the payload of this value
    ///
    /// # Examples
    /// ```
    /// # use tagged_json::value::*;
    /// let value = Value::from("text");
    /// assert_eq!("text", value.get::<String>());
    /// ```
    ///
    /// # Panics
    /// Panics if the type of this value does not match the requested payload type `T`. This
    /// indicates incorrect usage by the user; a value is never converted to another type.
    #[track_caller]
    pub fn get<T: Payload>(&self) -> &T {
        match T::from_value(self) {
            Some(payload) => payload,
            None => self.panic_type_mismatch(T::VALUE_TYPE),
        }
    }

    /// Gets the payload of this value for modification
    ///
    /// # Panics
    /// Panics if the type of this value does not match the requested payload type `T`, see
    /// [`get`](Self::get).
    #[track_caller]
    pub fn get_mut<T: Payload>(&mut self) -> &mut T {
        let actual = self.value_type();
        match T::from_value_mut(self) {
            Some(payload) => payload,
            None => panic!(
                "Incorrect value usage: Expected {} but value is {actual}",
                T::VALUE_TYPE
            ),
        }
    }

    /// Gets the payload of this value, or `None` if the value has a different type
    pub fn try_get<T: Payload>(&self) -> Option<&T> {
        T::from_value(self)
    }

    /// Gets the boolean payload, or `None` if this is not a [`Value::Boolean`]
    pub fn as_bool(&self) -> Option<bool> {
        self.try_get::<bool>().copied()
    }

    /// Gets the number payload, or `None` if this is not a [`Value::Number`]
    pub fn as_f64(&self) -> Option<f64> {
        self.try_get::<f64>().copied()
    }

    /// Gets the string payload, or `None` if this is not a [`Value::String`]
    pub fn as_str(&self) -> Option<&str> {
        self.try_get::<String>().map(String::as_str)
    }

    /// Gets the array payload, or `None` if this is not a [`Value::Array`]
    pub fn as_array(&self) -> Option<&Array> {
        self.try_get()
    }

    /// Gets the object payload, or `None` if this is not a [`Value::Object`]
    pub fn as_object(&self) -> Option<&Object> {
        self.try_get()
    }

    /// Gets the size of this value
    ///
    /// - null, boolean, number and string: 1
    /// - array: number of items
    /// - object: number of members
    /// - error: 0
    pub fn size(&self) -> usize {
        match self {
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_) => 1,
            Value::Array(array) => array.len(),
            Value::Object(object) => object.len(),
            Value::Error => 0,
        }
    }

    /// Replaces this value with [`Value::Null`] and returns the previous value
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    #[track_caller]
    fn panic_type_mismatch(&self, expected: ValueType) -> ! {
        panic!(
            "Incorrect value usage: Expected {expected} but value is {}",
            self.value_type()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        assert_eq!(Value::Null, Value::default());
        assert_eq!(Value::Null, Value::from(()));
        assert_eq!(Value::Boolean(true), Value::from(true));
        assert_eq!(Value::Number(42.0), Value::from(42_u8));
        assert_eq!(Value::Number(-42.0), Value::from(-42_i64));
        assert_eq!(Value::Number(1.5), Value::from(1.5_f32));
        assert_eq!(Value::Number(1e10), Value::from(1e10));
        assert_eq!(Value::String("abc".to_owned()), Value::from("abc"));
        assert_eq!(Value::String("abc".to_owned()), Value::from("abc".to_owned()));
        assert_eq!(Value::Array(Vec::new()), Value::from(Array::new()));
        assert_eq!(Value::Object(Object::new()), Value::from(Object::new()));
    }

    #[test]
    fn from_iter_object_last_wins() {
        let value: Value = [
            ("a".to_owned(), Value::from(1)),
            ("b".to_owned(), Value::from(2)),
            ("a".to_owned(), Value::from(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(2, value.size());
        assert_eq!(3.0, *value["a"].get::<f64>());
    }

    #[test]
    fn value_type() {
        let values = [
            (Value::Null, ValueType::Null, "null"),
            (Value::from(false), ValueType::Boolean, "boolean"),
            (Value::from(1), ValueType::Number, "number"),
            (Value::from(""), ValueType::String, "string"),
            (Value::from(Array::new()), ValueType::Array, "array"),
            (Value::from(Object::new()), ValueType::Object, "object"),
            (Value::Error, ValueType::Error, "error"),
        ];
        for (value, expected_type, expected_name) in values {
            assert_eq!(expected_type, value.value_type());
            assert_eq!(expected_name, value.type_name());
            assert_eq!(expected_name, expected_type.to_string());
        }
    }

    #[test]
    fn predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::from(true).is_boolean());
        assert!(Value::from(0).is_number());
        assert!(Value::from("").is_string());
        assert!(Value::from(Array::new()).is_array());
        assert!(Value::from(Object::new()).is_object());
        assert!(Value::Error.is_error());

        assert!(!Value::Null.is_error());
        assert!(!Value::from(0).is_boolean());
        assert!(!Value::from("1").is_number());
    }

    #[test]
    fn size() {
        assert_eq!(1, Value::Null.size());
        assert_eq!(1, Value::from(true).size());
        assert_eq!(1, Value::from(3).size());
        assert_eq!(1, Value::from("abc").size());
        assert_eq!(0, Value::from(Array::new()).size());
        assert_eq!(3, Value::from_iter([Value::Null, Value::Null, Value::Null]).size());
        assert_eq!(0, Value::Error.size());
    }

    #[test]
    fn get() {
        let mut value = Value::from("abc");
        assert_eq!("abc", value.get::<String>());
        value.get_mut::<String>().push('d');
        assert_eq!(Some("abcd"), value.as_str());

        let mut value = Value::from(1);
        *value.get_mut::<f64>() += 1.0;
        assert_eq!(Some(2.0), value.as_f64());
        assert_eq!(None, value.as_bool());
        assert_eq!(None, value.try_get::<String>());
    }

    #[test]
    #[should_panic(expected = "Incorrect value usage: Expected string but value is number")]
    fn get_wrong_type() {
        Value::from(1).get::<String>();
    }

    #[test]
    #[should_panic(expected = "Incorrect value usage: Expected array but value is error")]
    fn get_mut_wrong_type() {
        Value::Error.get_mut::<Array>();
    }

    #[test]
    fn take() {
        let mut value = Value::from("abc");
        assert_eq!(Value::from("abc"), value.take());
        assert_eq!(Value::Null, value);
    }
}
