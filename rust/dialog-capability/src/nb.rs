use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CapabilityError;

/// Extra constraints attached to a capability.
///
/// The generic model treats the payload as opaque: it is carried, encoded
/// and decoded, but only domain semantics interpret its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nb(Map<String, Value>);

impl Nb {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the payload, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Encodes the payload as JSON text.
    pub fn encode(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Decodes JSON text that must hold an object.
    pub fn parse(text: &str) -> Result<Self, CapabilityError> {
        serde_json::from_str::<Map<String, Value>>(text)
            .map(Self)
            .map_err(CapabilityError::InvalidNb)
    }

    /// Equality as seen by the generic capability model.
    ///
    /// Always `true`: capability equality never looks at the payload. A
    /// domain whose delegation rules depend on these fields has to compare
    /// them itself while delegating. Use `==` for content equality.
    pub fn is_equal(&self, _other: &Self) -> bool {
        true
    }
}

impl From<Map<String, Value>> for Nb {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Nb {
    type Error = CapabilityError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CapabilityError::InvalidShape(format!(
                "caveats must be an object, found {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use testresult::TestResult;

    fn sample() -> Nb {
        let mut nb = Nb::new();
        nb.insert("maxSize", 1024);
        nb.insert("tags", json!(["a", "b"]));
        nb.insert("nested", json!({ "depth": 2, "ok": true }));
        nb
    }

    #[test]
    fn it_reproduces_content_after_encoding() -> TestResult {
        let nb = sample();
        let decoded = Nb::parse(&nb.encode())?;
        assert_eq!(decoded, nb);
        assert_eq!(decoded.get("maxSize"), Some(&json!(1024)));
        Ok(())
    }

    #[test]
    fn it_reports_equal_regardless_of_content() {
        let mut other = Nb::new();
        other.insert("maxSize", 1);
        assert!(sample().is_equal(&other));
        assert!(Nb::new().is_equal(&sample()));
        assert_ne!(sample(), other);
    }

    #[test]
    fn it_exposes_fields_in_key_order() {
        let nb = sample();
        let keys: Vec<_> = nb.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["maxSize", "nested", "tags"]);
        assert_eq!(nb.as_map().len(), nb.len());

        let map = nb.clone().into_inner();
        assert_eq!(Nb::from(map), nb);
        assert!(!nb.is_empty());
        assert!(Nb::new().is_empty());
    }

    #[test]
    fn it_rejects_non_object_text() {
        assert!(matches!(Nb::parse("[1,2]"), Err(CapabilityError::InvalidNb(_))));
        assert!(matches!(Nb::parse("{"), Err(CapabilityError::InvalidNb(_))));
    }

    #[test]
    fn it_converts_only_objects_from_values() {
        assert!(Nb::try_from(json!({ "a": 1 })).is_ok());
        assert!(Nb::try_from(json!("a")).is_err());
    }
}
