/// Hard failures raised by capability semantics.
///
/// Rejected delegations are not errors; see
/// [`CapabilityEscalation`](crate::CapabilityEscalation).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticsError {
    /// The value has no single canonical capability encoding.
    #[error("Cannot encode as a single capability: {0}")]
    Unrepresentable(String),
}
