//! Pipeline orchestrator — resolves preferences and runs the checks.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::pipeline::checks::{self, Check};
use crate::pipeline::types::{CheckOutcome, EventPayload, Verdict};
use crate::store::PreferenceStore;

/// Runs the ordered check chain against incoming event payloads.
///
/// Stateless across invocations: each call reads preferences once,
/// threads the immutable `(payload, prefs)` pair through the checks,
/// and returns the first terminal verdict. Concurrent calls need no
/// coordination — the pipeline never writes to the store.
pub struct DecisionPipeline {
    store: Arc<dyn PreferenceStore>,
    checks: &'static [Check],
}

impl DecisionPipeline {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            checks: checks::CHECKS,
        }
    }

    /// Decide whether the downstream channel should be notified.
    ///
    /// Errors only if the store read fails; every check itself is
    /// total. If no check terminates, the event is implicitly
    /// approved — reachable only when preferences exist, since the
    /// no-preferences check always terminates the absent case.
    pub async fn decide(&self, payload: &EventPayload) -> Result<Verdict> {
        let prefs = self.store.get(&payload.user_id).await?;
        debug!(
            event_id = %payload.event_id,
            user_id = %payload.user_id,
            has_prefs = prefs.is_some(),
            "Resolved preferences"
        );

        let verdict = self
            .checks
            .iter()
            .find_map(|check| match check(payload, prefs.as_ref()) {
                CheckOutcome::Terminal(verdict) => Some(verdict),
                CheckOutcome::Continue => None,
            })
            .unwrap_or_else(Verdict::implicit_allow);

        info!(
            event_id = %payload.event_id,
            user_id = %payload.user_id,
            event_type = %payload.event_type,
            decision = ?verdict.decision(),
            reason = verdict.reason().label(),
            "Decided"
        );
        Ok(verdict)
    }
}
