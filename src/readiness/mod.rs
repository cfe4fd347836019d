//! Pull request readiness: review reconciliation and the ready/skip decision.

pub mod evaluate;
pub mod reconcile;

pub use evaluate::{Readiness, evaluate};
pub use reconcile::{ApprovalSummary, ReviewerVerdict, latest_verdicts, reconcile};
