//! Shared types for the decision pipeline.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ── Event payload ───────────────────────────────────────────────────

/// An inbound event notification, one per request.
///
/// Already schema-validated by the time it reaches the pipeline:
/// identifiers are non-empty and the timestamp carried an explicit
/// UTC offset. Request-scoped and immutable — nothing in the
/// pipeline writes to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Unique id of this event occurrence.
    pub event_id: String,
    /// Whose preferences govern the decision.
    pub user_id: String,
    /// Event type key, matched against per-type settings verbatim.
    pub event_type: String,
    /// When the event happened, with its originating UTC offset.
    /// The offset-local clock is what quiet hours are compared to.
    pub timestamp: DateTime<FixedOffset>,
}

// ── Verdict ─────────────────────────────────────────────────────────

/// Whether the downstream channel should be notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    ProcessNotification,
    DoNotNotify,
}

/// Machine-readable reason code attached to every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    /// User has no stored preferences — default allow.
    NoPreferencesDefaultAllow,
    /// Preferences exist and no check vetoed.
    ImplicitAllow,
    /// Explicit `enabled: false` for this event type.
    UserUnsubscribedFromEvent,
    /// Timestamp falls inside the configured quiet hours.
    DndActive,
}

impl Reason {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoPreferencesDefaultAllow => "NO_PREFERENCES_DEFAULT_ALLOW",
            Self::ImplicitAllow => "IMPLICIT_ALLOW",
            Self::UserUnsubscribedFromEvent => "USER_UNSUBSCRIBED_FROM_EVENT",
            Self::DndActive => "DND_ACTIVE",
        }
    }
}

/// Terminal output of a pipeline run: a decision plus its reason.
///
/// The set of (decision, reason) pairs is closed — the fields are
/// private and only the four named constructors exist, so an
/// unrecognized pairing cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    decision: Decision,
    reason: Reason,
}

impl Verdict {
    /// `PROCESS_NOTIFICATION` / `NO_PREFERENCES_DEFAULT_ALLOW`.
    pub fn no_preferences_default_allow() -> Self {
        Self {
            decision: Decision::ProcessNotification,
            reason: Reason::NoPreferencesDefaultAllow,
        }
    }

    /// `PROCESS_NOTIFICATION` / `IMPLICIT_ALLOW`.
    pub fn implicit_allow() -> Self {
        Self {
            decision: Decision::ProcessNotification,
            reason: Reason::ImplicitAllow,
        }
    }

    /// `DO_NOT_NOTIFY` / `USER_UNSUBSCRIBED_FROM_EVENT`.
    pub fn user_unsubscribed_from_event() -> Self {
        Self {
            decision: Decision::DoNotNotify,
            reason: Reason::UserUnsubscribedFromEvent,
        }
    }

    /// `DO_NOT_NOTIFY` / `DND_ACTIVE`.
    pub fn dnd_active() -> Self {
        Self {
            decision: Decision::DoNotNotify,
            reason: Reason::DndActive,
        }
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }
}

// ── Check outcome ───────────────────────────────────────────────────

/// What a single check produced: a terminal verdict that ends the
/// run, or a hand-off to the next check. No shared request-scoped
/// state exists — every check sees the same immutable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Terminal(Verdict),
    Continue,
}
