//! Per-user notification preferences.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dnd::DndWindow;

/// Enablement flag for one event type.
///
/// A record carries a key for an event type only if the user has
/// explicitly configured it — absence of a key is "not opted out",
/// which is distinct from `enabled: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSetting {
    pub enabled: bool,
}

/// A user's stored notification preferences.
///
/// One record per user id, replaced wholesale on update; never
/// created implicitly. The decision pipeline only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Quiet-hours window (local wall-clock times).
    pub dnd: DndWindow,
    /// Per-event-type enablement, keyed by event type string.
    pub event_settings: HashMap<String, EventSetting>,
}

impl PreferenceRecord {
    /// The explicit setting for an event type, if the user configured one.
    pub fn setting_for(&self, event_type: &str) -> Option<EventSetting> {
        self.event_settings.get(event_type).copied()
    }
}
