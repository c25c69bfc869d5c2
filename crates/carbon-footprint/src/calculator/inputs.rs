use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Free-form user inputs keyed by field name.
///
/// Accessors never fail: a missing key and a value of the wrong JSON type both read as
/// `None`, so the engine can treat them as terms that contribute nothing. A JSON `null`
/// deserializes as an empty bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputBag(Map<String, Value>);

impl<'de> Deserialize<'de> for InputBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Self(fields.unwrap_or_default()))
    }
}

impl InputBag {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Numeric field. Strings are not coerced, even when they look numeric.
    pub fn float(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }

    /// Numeric field that is strictly positive, used for divisors such as occupant counts.
    pub fn positive(&self, key: &str) -> Option<f64> {
        self.float(key).filter(|value| *value > 0.0)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for InputBag {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl TryFrom<Value> for InputBag {
    type Error = Value;

    /// Only JSON objects form an input bag; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
