use std::collections::HashMap;
use std::slice;
use std::sync::Arc;

use dialog_capability::Capability;

use crate::{CapabilityEscalation, CapabilitySemantics, Chained, Delegation};

/// Reason reported when no proof addresses the claimed target at all.
pub const NOT_DELEGATED: &str = "Capability is not delegated by any proof";

/// Outcome for one claim: the effective capability, or why it is not backed.
pub type Attenuated<T> = Result<T, CapabilityEscalation<T>>;

/// Walks `chain` from its leaf token and yields one outcome per leaf claim
/// that `semantics` recognizes, in declaration order.
///
/// Claims the semantics do not recognize produce nothing. Claims of a root
/// token are accepted as asserted. Any other claim is accepted when some
/// capability accepted in one of its proofs delegates to it.
///
/// A rejected claim reports the escalation with the highest
/// [`specificity`](CapabilitySemantics::specificity), the first one met on
/// ties. Candidates are escalations against accepted proof capabilities and
/// escalations already reported for related proof capabilities, which are
/// passed through unchanged. [`NOT_DELEGATED`] is reported when every proof
/// was unrelated.
///
/// Items are computed on demand. Proof results are memoized for the life of
/// the returned iterator only; calling this again walks the chain afresh.
pub fn capabilities<'a, C, S>(chain: &'a C, semantics: &'a S) -> Capabilities<'a, C, S>
where
    C: Chained,
    S: CapabilitySemantics,
{
    Capabilities {
        chain,
        claims: chain.capabilities().iter(),
        walk: Walk {
            semantics,
            outcomes: HashMap::new(),
        },
    }
}

/// Lazy sequence of [`Attenuated`] outcomes returned by [`capabilities`].
pub struct Capabilities<'a, C, S>
where
    C: Chained,
    S: CapabilitySemantics,
{
    chain: &'a C,
    claims: slice::Iter<'a, Capability>,
    walk: Walk<'a, C, S>,
}

impl<C, S> Iterator for Capabilities<'_, C, S>
where
    C: Chained,
    S: CapabilitySemantics,
{
    type Item = Attenuated<S::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        for claim in self.claims.by_ref() {
            if let Some(value) = self.walk.semantics.parse(claim) {
                return Some(self.walk.resolve(self.chain, value));
            }
        }
        None
    }
}

/// Depth first walk over the proof DAG, scoped to one query.
struct Walk<'a, C, S>
where
    C: Chained,
    S: CapabilitySemantics,
{
    semantics: &'a S,
    outcomes: HashMap<C::Id, Arc<[Attenuated<S::Value>]>>,
}

impl<C, S> Walk<'_, C, S>
where
    C: Chained,
    S: CapabilitySemantics,
{
    /// Outcomes for every recognized claim of `token`, backed or not.
    fn outcomes(&mut self, token: &C) -> Arc<[Attenuated<S::Value>]> {
        let id = token.id();
        if let Some(outcomes) = self.outcomes.get(&id) {
            tracing::trace!(token = ?id, "Reusing outcomes of proof");
            return outcomes.clone();
        }

        let mut outcomes = Vec::new();
        for claim in token.capabilities() {
            if let Some(value) = self.semantics.parse(claim) {
                outcomes.push(self.resolve(token, value));
            }
        }

        let outcomes: Arc<[Attenuated<S::Value>]> = outcomes.into();
        self.outcomes.insert(id, outcomes.clone());
        outcomes
    }

    fn resolve(&mut self, token: &C, claim: S::Value) -> Attenuated<S::Value> {
        if token.is_root() {
            return Ok(claim);
        }

        let mut rejection: Option<(usize, CapabilityEscalation<S::Value>)> = None;
        for proof in token.proofs() {
            let outcomes = self.outcomes(proof);
            for outcome in outcomes.iter() {
                let (parent, escalation) = match outcome {
                    Ok(parent) => match self.semantics.try_delegating(parent, &claim) {
                        Delegation::Delegated(value) => {
                            tracing::trace!(
                                token = ?token.id(),
                                proof = ?proof.id(),
                                "Claim delegated"
                            );
                            return Ok(value);
                        }
                        Delegation::Escalation(escalation) => (parent, escalation),
                        Delegation::Unrelated => continue,
                    },
                    // The proof's own claim was escalated; it still explains
                    // the rejection when it addresses the same target.
                    Err(upstream) => {
                        match self.semantics.try_delegating(&upstream.capability, &claim) {
                            Delegation::Unrelated => continue,
                            _ => (&upstream.capability, upstream.clone()),
                        }
                    }
                };

                let specificity = self.semantics.specificity(parent, &claim);
                if rejection.as_ref().is_none_or(|(best, _)| specificity > *best) {
                    rejection = Some((specificity, escalation));
                }
            }
        }

        let escalation = match rejection {
            Some((_, escalation)) => escalation,
            None => CapabilityEscalation::new(NOT_DELEGATED, claim),
        };
        tracing::debug!(
            token = ?token.id(),
            reason = %escalation.reason(),
            "Claim rejected"
        );
        Err(escalation)
    }
}
