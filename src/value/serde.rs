//! Optional [Serde](https://docs.rs/serde/latest/serde/) integration for [`Value`]
//!
//! `Value` implements [`Serialize`] and [`Deserialize`] so it can be converted to and from
//! any Serde data format. The [`Value::Error`] sentinel is not a JSON value and cannot be
//! serialized.

use std::fmt::Formatter;

use ::serde::{
    de::{Error as _, MapAccess, SeqAccess, Visitor},
    ser::{Error as _, SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::{Array, Object, Value};

/// Largest magnitude below which every integral `f64` is exactly representable as `i64`
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Gets the number as `i64` if it is integral, so that integer targets such as `u32` struct
/// fields can be deserialized from it
fn as_exact_i64(n: f64) -> Option<i64> {
    // -0.0 is kept as float to preserve its sign
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER && !(n == 0.0 && n.is_sign_negative()) {
        Some(n as i64)
    } else {
        None
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match as_exact_i64(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for item in array {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (name, value) in object {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Value::Error => Err(S::Error::custom(
                "cannot serialize the error sentinel of a failed parse",
            )),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_unit<E: ::serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: ::serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: ::serde::de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_i64<E: ::serde::de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: ::serde::de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: ::serde::de::Error>(self, v: f64) -> Result<Value, E> {
        if v.is_finite() {
            Ok(Value::from(v))
        } else {
            Err(E::custom(format!("non-finite number: {v}")))
        }
    }

    fn visit_str<E: ::serde::de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: ::serde::de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            array.push(item);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Object::new();
        while let Some((name, value)) = map.next_entry::<String, Value>()? {
            object.insert(name, value);
        }
        Ok(Value::Object(object))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn serialize() -> TestResult {
        let value = parse(r#"{"n": null, "b": [true, false], "x": 1.5, "s": "a\nb"}"#);
        assert_eq!(
            r#"{"b":[true,false],"n":null,"s":"a\nb","x":1.5}"#,
            serde_json::to_string(&value)?
        );
        Ok(())
    }

    #[test]
    fn serialize_integral_numbers() -> TestResult {
        let value = parse("[3, -10, 2.5, -0, 1e100]");
        assert_eq!("[3,-10,2.5,-0.0,1e+100]", serde_json::to_string(&value)?);
        Ok(())
    }

    #[test]
    fn serialize_error_sentinel() {
        let result = serde_json::to_string(&Value::Error);
        match result {
            Err(e) => assert_eq!(
                "cannot serialize the error sentinel of a failed parse",
                e.to_string()
            ),
            Ok(json) => panic!("Should have failed, but got: {json}"),
        }
    }

    #[test]
    fn deserialize() -> TestResult {
        let value: Value = serde_json::from_str(r#"{"b": [true, 2, -3, 4.5], "a": null}"#)?;
        assert_eq!(
            parse(r#"{"a": null, "b": [true, 2, -3, 4.5]}"#),
            value
        );
        Ok(())
    }
}
