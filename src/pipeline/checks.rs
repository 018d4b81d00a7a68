//! The ordered policy checks.
//!
//! Each check is a pure function of `(payload, preferences)` that
//! either terminates the run with a verdict or defers to the next
//! check. The order is load-bearing: enablement runs before quiet
//! hours, so an explicitly disabled event type is reported as
//! unsubscribed even inside the DND window — the more specific
//! signal wins.

use crate::pipeline::types::{CheckOutcome, EventPayload, Verdict};
use crate::prefs::PreferenceRecord;

/// Signature shared by every check in the chain.
pub type Check = fn(&EventPayload, Option<&PreferenceRecord>) -> CheckOutcome;

/// The fixed check order.
pub const CHECKS: &[Check] = &[
    allow_when_no_prefs,
    require_event_enabled,
    block_when_dnd_active,
];

/// A user who never configured preferences must not be silently
/// muted: absence terminates with default-allow.
pub fn allow_when_no_prefs(
    _payload: &EventPayload,
    prefs: Option<&PreferenceRecord>,
) -> CheckOutcome {
    match prefs {
        None => CheckOutcome::Terminal(Verdict::no_preferences_default_allow()),
        Some(_) => CheckOutcome::Continue,
    }
}

/// Veto event types the user explicitly opted out of. A missing
/// per-type key means "not opted out" and falls through.
pub fn require_event_enabled(
    payload: &EventPayload,
    prefs: Option<&PreferenceRecord>,
) -> CheckOutcome {
    let Some(prefs) = prefs else {
        return CheckOutcome::Continue;
    };
    match prefs.setting_for(&payload.event_type) {
        Some(setting) if !setting.enabled => {
            CheckOutcome::Terminal(Verdict::user_unsubscribed_from_event())
        }
        _ => CheckOutcome::Continue,
    }
}

/// Veto events whose timestamp falls inside the quiet-hours window,
/// judged by the timestamp's own local clock.
pub fn block_when_dnd_active(
    payload: &EventPayload,
    prefs: Option<&PreferenceRecord>,
) -> CheckOutcome {
    let Some(prefs) = prefs else {
        return CheckOutcome::Continue;
    };
    if prefs.dnd.contains_instant(&payload.timestamp) {
        return CheckOutcome::Terminal(Verdict::dnd_active());
    }
    CheckOutcome::Continue
}
