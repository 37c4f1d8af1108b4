pub mod report;
pub mod sync_service;

pub use report::{CourseFailure, RunReport};
pub use sync_service::{CourseOutcome, SkipReason, SyncService};
