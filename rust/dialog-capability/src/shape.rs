//! Shape checks for untyped input.
//!
//! These only confirm that a raw value has the fields and field types of a
//! capability. Whether the capability means anything is left to domain
//! semantics.

use serde_json::Value;

use crate::{Capability, CapabilityError, EncodedCapability};

/// Returns `true` when `value` has the structured shape of a [`Capability`]:
/// a `with` object holding `scheme` and `hierPart` strings, a `can` that is
/// `"*"` or a `namespace`/`segments` object, and an optional `nb` object.
pub fn is_capability(value: &Value) -> bool {
    Capability::from_value(value.clone()).is_ok()
}

/// Returns `true` when `value` has the wire shape of an
/// [`EncodedCapability`]: string `with` and `can`, and an optional string `nb`.
pub fn is_encoded_capability(value: &Value) -> bool {
    EncodedCapability::from_value(value.clone()).is_ok()
}

impl Capability {
    /// Reads a capability from its structured JSON shape.
    pub fn from_value(value: Value) -> Result<Self, CapabilityError> {
        serde_json::from_value(value)
            .map_err(|error| CapabilityError::InvalidShape(error.to_string()))
    }
}

impl EncodedCapability {
    /// Reads an encoded capability from its JSON wire shape.
    pub fn from_value(value: Value) -> Result<Self, CapabilityError> {
        serde_json::from_value(value)
            .map_err(|error| CapabilityError::InvalidShape(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ability, ResourcePointer};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn it_accepts_structured_capabilities() {
        let value = json!({
            "with": { "scheme": "wnfs", "hierPart": "alice/public/docs" },
            "can": { "namespace": "wnfs", "segments": ["REVISE"] },
        });
        assert!(is_capability(&value));
        assert!(is_capability(&json!({
            "with": { "scheme": "my", "hierPart": "*" },
            "can": "*",
            "nb": { "limit": 3 },
        })));

        let capability = Capability::from_value(value).unwrap();
        assert_eq!(
            capability,
            Capability::new(
                ResourcePointer::new("wnfs", "alice/public/docs"),
                Ability::new("wnfs", ["revise"])
            )
        );
    }

    #[test]
    fn it_rejects_malformed_structured_capabilities() {
        assert!(!is_capability(&json!({ "with": "wnfs:alice", "can": "*" })));
        assert!(!is_capability(&json!({
            "with": { "scheme": "my", "hierPart": "*" },
            "can": "everything",
        })));
        assert!(!is_capability(&json!({
            "with": { "scheme": "my", "hierPart": "*" },
            "can": { "namespace": "msg", "segments": [1] },
        })));
        assert!(!is_capability(&json!({
            "with": { "scheme": "my", "hierPart": "*" },
            "can": "*",
            "nb": "limit=3",
        })));
        assert!(!is_capability(&json!(["with", "can"])));
    }

    #[test]
    fn it_checks_encoded_shape() {
        assert!(is_encoded_capability(&json!({ "with": "my:*", "can": "*" })));
        assert!(is_encoded_capability(
            &json!({ "with": "my:*", "can": "*", "nb": "{}" })
        ));
        assert!(!is_encoded_capability(&json!({ "with": "my:*" })));
        assert!(!is_encoded_capability(&json!({ "with": 1, "can": "*" })));
        assert!(!is_encoded_capability(
            &json!({ "with": "my:*", "can": "*", "nb": {} })
        ));
    }
}
