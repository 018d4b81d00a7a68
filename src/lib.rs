//! notify-gate — decides whether a downstream channel should be
//! notified about an event, based on per-user quiet hours and
//! per-event-type opt-outs.

pub mod api;
pub mod config;
pub mod dnd;
pub mod error;
pub mod pipeline;
pub mod prefs;
pub mod store;
