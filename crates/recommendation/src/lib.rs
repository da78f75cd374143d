//! Recommendation Engine
//!
//! Turns a reviewed alert into recommendation text and a follow-up decision.
//! Scheduling itself is left to a [`FollowUpScheduler`] supplied by the
//! caller.

mod engine;
mod followup;
mod templates;

pub use engine::{RecommendationEngine, RecommendationError, Review};
pub use followup::{FollowUpError, FollowUpScheduler};
pub use templates::{TemplateEntry, TemplateTable};
