use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::services::sync_service::{CourseOutcome, SkipReason};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct CourseFailure {
    pub code: String,
    pub reason: String,
}

/// Summary of one sync run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub accounts_processed: usize,
    pub accounts_truncated: Vec<String>,
    pub courses_updated: usize,
    pub courses_skipped: usize,
    pub courses_failed: usize,
    pub failures: Vec<CourseFailure>,
}

impl RunReport {
    pub fn start() -> Self {
        let started_at = Local::now();
        info!("Start time: {}", started_at.format(TIMESTAMP_FORMAT));
        Self {
            started_at,
            finished_at: None,
            accounts_processed: 0,
            accounts_truncated: Vec::new(),
            courses_updated: 0,
            courses_skipped: 0,
            courses_failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_account(&mut self, account: &str, truncated: bool) {
        self.accounts_processed += 1;
        if truncated {
            self.accounts_truncated.push(account.to_string());
        }
    }

    pub fn record(&mut self, outcome: CourseOutcome) {
        match outcome {
            CourseOutcome::Updated { code } => {
                info!("Updated {}", code);
                self.courses_updated += 1;
            }
            CourseOutcome::Skipped { code, reason } => {
                match reason {
                    SkipReason::NoSisCode => warn!("Skipping {} - no SIS course id", code),
                    SkipReason::NotInLeganto => {
                        warn!("Skipping {} - zero results in Leganto", code)
                    }
                }
                self.courses_skipped += 1;
            }
            CourseOutcome::Failed { code, error } => {
                error!("Failed to update {}: {}", code, error);
                self.courses_failed += 1;
                self.failures.push(CourseFailure {
                    code,
                    reason: error.to_string(),
                });
            }
        }
    }

    pub fn finish(&mut self) {
        let finished_at = Local::now();
        self.finished_at = Some(finished_at);
        info!("Start time: {}", self.started_at.format(TIMESTAMP_FORMAT));
        info!("End time: {}", finished_at.format(TIMESTAMP_FORMAT));
    }

    pub fn has_failures(&self) -> bool {
        self.courses_failed > 0 || !self.accounts_truncated.is_empty()
    }
}
