//! Indexing of JSON arrays by item index and of JSON objects by member name

use std::ops::{Index, IndexMut};

use duplicate::duplicate_item;

use super::Value;

/// Returned when reading an absent object member through an immutable reference
static NULL: Value = Value::Null;

/// Gets the item at `index` of a JSON array
///
/// # Panics
/// Panics if the value is not a JSON array, or if `index` is out of bounds.
impl Index<usize> for Value {
    type Output = Value;

    #[track_caller]
    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(array) => &array[index],
            _ => panic!(
                "Incorrect value usage: Cannot access item {index} of {}, expected array",
                self.value_type()
            ),
        }
    }
}

/// Gets the item at `index` of a JSON array for modification
///
/// # Panics
/// Panics if the value is not a JSON array, or if `index` is out of bounds.
impl IndexMut<usize> for Value {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Value {
        let actual = self.value_type();
        match self {
            Value::Array(array) => &mut array[index],
            _ => panic!(
                "Incorrect value usage: Cannot access item {index} of {actual}, expected array"
            ),
        }
    }
}

/// Gets the value of the member with the given name of a JSON object
///
/// If the object has no such member [`Value::Null`] is returned; the object is not modified.
///
/// # Panics
/// Panics if the value is not a JSON object.
impl Index<&str> for Value {
    type Output = Value;

    #[track_caller]
    fn index(&self, name: &str) -> &Value {
        match self {
            Value::Object(object) => object.get(name).unwrap_or(&NULL),
            _ => panic!(
                "Incorrect value usage: Cannot access member '{name}' of {}, expected object",
                self.value_type()
            ),
        }
    }
}

/// Gets the value of the member with the given name of a JSON object for modification
///
/// If the object has no such member, a member with value [`Value::Null`] is inserted first,
/// so assigning to the result either adds the member or overwrites its previous value.
///
/// # Panics
/// Panics if the value is not a JSON object.
impl IndexMut<&str> for Value {
    #[track_caller]
    fn index_mut(&mut self, name: &str) -> &mut Value {
        let actual = self.value_type();
        match self {
            Value::Object(object) => object.entry(name.to_owned()).or_default(),
            _ => panic!(
                "Incorrect value usage: Cannot access member '{name}' of {actual}, expected object"
            ),
        }
    }
}

#[duplicate_item(
    name_type;
    [String];
    [&String];
)]
impl Index<name_type> for Value {
    type Output = Value;

    #[track_caller]
    fn index(&self, name: name_type) -> &Value {
        &self[name.as_str()]
    }
}

#[duplicate_item(
    name_type;
    [String];
    [&String];
)]
impl IndexMut<name_type> for Value {
    #[track_caller]
    fn index_mut(&mut self, name: name_type) -> &mut Value {
        &mut self[name.as_str()]
    }
}
