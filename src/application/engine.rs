//! Toggle engine - decides add-vs-remove for a trigger activation
//!
//! Pure functions only: no I/O, no retries. Idempotency of repeated
//! grants/revokes is the platform adapter's job.

use std::collections::HashSet;

use crate::application::errors::GatewayError;
use crate::domain::entities::EffectId;

/// Action to take for an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDecision {
    /// Actor does not hold the effect yet; grant it.
    Grant,
    /// Actor already holds the effect; revoke it.
    Revoke,
}

/// What happened when the decision was applied externally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeReport {
    Applied(ToggleDecision),
    Failed {
        decision: ToggleDecision,
        error: GatewayError,
    },
}

impl OutcomeReport {
    pub fn is_applied(&self) -> bool {
        matches!(self, OutcomeReport::Applied(_))
    }
}

pub struct ToggleEngine;

impl ToggleEngine {
    /// Decide whether activating a trigger grants or revokes its effect.
    pub fn decide(effect_id: &str, actor_effects: &HashSet<EffectId>) -> ToggleDecision {
        if actor_effects.contains(effect_id) {
            ToggleDecision::Revoke
        } else {
            ToggleDecision::Grant
        }
    }

    /// Fold the external application result into a report for the caller
    /// to surface to the end user.
    pub fn apply(decision: ToggleDecision, outcome: Result<(), GatewayError>) -> OutcomeReport {
        match outcome {
            Ok(()) => OutcomeReport::Applied(decision),
            Err(error) => OutcomeReport::Failed { decision, error },
        }
    }
}
