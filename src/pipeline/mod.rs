//! Notification decision pipeline.
//!
//! Every event payload flows through:
//! 1. `PreferenceStore::get()` — one read, resolved once per call
//! 2. an ordered list of pure checks — first terminal verdict wins
//! 3. implicit allow — reached only when preferences exist and no
//!    check vetoes
//!
//! Checks never mutate anything and never retry; the whole run is a
//! single store read plus in-memory computation.

pub mod checks;
pub mod decider;
pub mod types;

pub use decider::DecisionPipeline;
pub use types::{CheckOutcome, Decision, EventPayload, Reason, Verdict};
