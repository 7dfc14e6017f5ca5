/// Errors raised while decoding capabilities from their wire form.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    /// The resource pointer text has no `scheme:` prefix.
    #[error("Resource pointer '{0}' has no scheme")]
    MissingScheme(String),

    /// The ability text is empty.
    #[error("Ability must not be empty")]
    EmptyAbility,

    /// The caveats blob is not a JSON object.
    #[error("Invalid caveats: {0}")]
    InvalidNb(serde_json::Error),

    /// A raw value does not have the shape of a capability.
    #[error("Invalid capability shape: {0}")]
    InvalidShape(String),
}
