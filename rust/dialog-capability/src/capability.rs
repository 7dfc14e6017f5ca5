use serde::{Deserialize, Serialize};

use crate::{Ability, CapabilityError, Nb, ProofSelector, ResourcePointer};

/// A permission: do [`Capability::can`] to [`Capability::with`], optionally
/// narrowed by [`Capability::nb`].
///
/// Two capabilities are equal when their pointers and abilities are equal.
/// The caveats payload never takes part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    /// Resource the capability applies to.
    pub with: ResourcePointer,
    /// Action permitted on the resource.
    pub can: Ability,
    /// Domain specific caveats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb: Option<Nb>,
}

impl Capability {
    /// Creates a capability without caveats.
    pub fn new(with: ResourcePointer, can: Ability) -> Self {
        Self {
            with,
            can,
            nb: None,
        }
    }

    /// Attaches caveats to this capability.
    pub fn with_nb(mut self, nb: Nb) -> Self {
        self.nb = Some(nb);
        self
    }

    /// Full authority over the issuer's own `resource`.
    pub fn my(resource: impl Into<String>) -> Self {
        Self::new(ResourcePointer::my(resource), Ability::Superuser)
    }

    /// Full authority over `resource` on behalf of `did`.
    pub fn acting_as(did: &str, resource: &str) -> Self {
        Self::new(ResourcePointer::acting_as(did, resource), Ability::Superuser)
    }

    /// Redelegates `ability` from the selected proofs.
    pub fn proof(selector: ProofSelector, ability: Ability) -> Self {
        Self::new(ResourcePointer::proof(selector), ability)
    }

    /// Encodes every part of the capability into its string form.
    pub fn encode(&self) -> EncodedCapability {
        EncodedCapability {
            with: self.with.encode(),
            can: self.can.encode(),
            nb: self.nb.as_ref().map(Nb::encode),
        }
    }

    /// Decodes a capability from its string form.
    pub fn parse(encoded: &EncodedCapability) -> Result<Self, CapabilityError> {
        Ok(Self {
            with: ResourcePointer::parse(&encoded.with)?,
            can: Ability::parse(&encoded.can)?,
            nb: encoded.nb.as_deref().map(Nb::parse).transpose()?,
        })
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.with == other.with && self.can == other.can
    }
}

impl Eq for Capability {}

impl TryFrom<&EncodedCapability> for Capability {
    type Error = CapabilityError;

    fn try_from(encoded: &EncodedCapability) -> Result<Self, Self::Error> {
        Self::parse(encoded)
    }
}

impl From<&Capability> for EncodedCapability {
    fn from(capability: &Capability) -> Self {
        capability.encode()
    }
}

/// Wire form of a [`Capability`] with every part stringified.
///
/// ```json
/// { "with": "<scheme>:<hierPart>", "can": "<namespace>/<seg>/...", "nb": "<json-text>" }
/// ```
///
/// `nb` is present only when the source capability carried caveats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedCapability {
    /// Encoded resource pointer.
    pub with: String,
    /// Encoded ability.
    pub can: String,
    /// Caveats as JSON text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use testresult::TestResult;

    fn send_mail() -> Capability {
        Capability::new(
            ResourcePointer::new("mailto", "alice@example.com"),
            Ability::new("msg", ["send"]),
        )
    }

    #[test]
    fn it_encodes_every_part() {
        let mut nb = Nb::new();
        nb.insert("limit", 5);
        let encoded = send_mail().with_nb(nb).encode();

        assert_eq!(
            encoded,
            EncodedCapability {
                with: "mailto:alice@example.com".into(),
                can: "msg/send".into(),
                nb: Some(r#"{"limit":5}"#.into()),
            }
        );
    }

    #[test]
    fn it_omits_nb_when_absent() -> TestResult {
        let encoded = send_mail().encode();
        assert_eq!(encoded.nb, None);
        assert_eq!(
            serde_json::to_value(&encoded)?,
            json!({ "with": "mailto:alice@example.com", "can": "msg/send" })
        );
        Ok(())
    }

    #[test]
    fn it_round_trips_through_encoding() -> TestResult {
        let mut nb = Nb::new();
        nb.insert("tags", json!(["inbox"]));
        let capability = send_mail().with_nb(nb.clone());

        let parsed = Capability::parse(&capability.encode())?;
        assert_eq!(parsed, capability);
        assert_eq!(parsed.nb, Some(nb));
        Ok(())
    }

    #[test]
    fn it_ignores_nb_in_equality() {
        let mut nb = Nb::new();
        nb.insert("limit", 1);
        assert_eq!(send_mail().with_nb(nb), send_mail());
    }

    #[test]
    fn it_ignores_scheme_and_ability_case_in_equality() {
        let shouted = Capability::new(
            ResourcePointer::new("MAILTO", "alice@example.com"),
            Ability::new("MSG", ["Send"]),
        );
        assert_eq!(shouted, send_mail());
    }

    #[test]
    fn it_builds_superuser_capabilities() {
        let mine = Capability::my("*");
        assert_eq!(mine.encode().with, "my:*");
        assert_eq!(mine.encode().can, "*");

        let delegated = Capability::acting_as("did:key:zAlice", "*");
        assert_eq!(delegated.encode().with, "as:did:key:zAlice:*");

        let redelegated =
            Capability::proof(ProofSelector::Index(0), Ability::new("msg", ["send"]));
        assert_eq!(redelegated.encode().with, "prf:0");
    }

    #[test]
    fn it_fails_on_malformed_parts() {
        let missing_scheme = EncodedCapability {
            with: "alice".into(),
            can: "msg/send".into(),
            nb: None,
        };
        assert!(matches!(
            Capability::parse(&missing_scheme),
            Err(CapabilityError::MissingScheme(_))
        ));

        let bad_nb = EncodedCapability {
            with: "mailto:alice".into(),
            can: "msg/send".into(),
            nb: Some("not json".into()),
        };
        assert!(matches!(
            Capability::parse(&bad_nb),
            Err(CapabilityError::InvalidNb(_))
        ));
    }

    mod properties {
        use super::*;
        use proptest::collection::{btree_map, vec};
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = String> {
            "[A-Za-z0-9_.-]{1,8}"
        }

        fn ability() -> impl Strategy<Value = Ability> {
            prop_oneof![
                Just(Ability::Superuser),
                (segment(), vec(segment(), 0..4))
                    .prop_map(|(namespace, segments)| Ability::new(namespace, segments)),
            ]
        }

        fn nb() -> impl Strategy<Value = Option<Nb>> {
            proptest::option::of(btree_map(segment(), any::<i64>(), 0..4).prop_map(|fields| {
                let mut nb = Nb::new();
                for (key, value) in fields {
                    nb.insert(key, value);
                }
                nb
            }))
        }

        fn capability() -> impl Strategy<Value = Capability> {
            ("[a-z]{1,6}", "[A-Za-z0-9/:*._-]{0,16}", ability(), nb()).prop_map(
                |(scheme, hier_part, can, nb)| Capability {
                    with: ResourcePointer::new(scheme, hier_part),
                    can,
                    nb,
                },
            )
        }

        proptest! {
            #[test]
            fn it_round_trips_any_capability(capability in capability()) {
                let parsed = Capability::parse(&capability.encode()).unwrap();
                prop_assert_eq!(&parsed.nb, &capability.nb);
                prop_assert_eq!(parsed, capability);
            }
        }
    }
}
