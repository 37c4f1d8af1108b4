use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use tracing::info;

use crate::canvas::CanvasClient;
use crate::config::RunConfig;
use crate::error::AppError;
use crate::leganto::LegantoClient;
use crate::models::reserves::{ACTIVE_STATUS, PROCESSING_DEPARTMENT, searchable_id};
use crate::models::{CourseUpdate, Instructor, SourceCourse, TargetCourseRecord, ValueDesc};
use crate::services::report::RunReport;
use crate::term::map_term;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSisCode,
    NotInLeganto,
}

/// What happened to one Canvas course.
#[derive(Debug)]
pub enum CourseOutcome {
    Updated { code: String },
    Skipped { code: String, reason: SkipReason },
    Failed { code: String, error: AppError },
}

pub struct SyncService {
    canvas: Arc<dyn CanvasClient>,
    leganto: Arc<dyn LegantoClient>,
    run: RunConfig,
}

impl SyncService {
    pub fn new(canvas: Arc<dyn CanvasClient>, leganto: Arc<dyn LegantoClient>, run: RunConfig) -> Self {
        Self {
            canvas,
            leganto,
            run,
        }
    }

    /// Syncs every configured account in order. Per-course errors end up in the report.
    pub async fn sync_all(&self) -> RunReport {
        let mut report = RunReport::start();

        for account in &self.run.accounts {
            self.sync_account(account, &mut report).await;
        }

        report.finish();
        report
    }

    async fn sync_account(&self, account: &str, report: &mut RunReport) {
        info!(
            "Fetching Canvas courses for account {} (search term {})",
            account, self.run.search_term
        );
        let listing = self.canvas.list_courses(account, &self.run.search_term).await;
        info!(
            "Account {}: {} course(s) over {} page(s)",
            account,
            listing.items.len(),
            listing.pages
        );
        report.record_account(account, listing.is_truncated());

        for entry in listing.items {
            let outcome = match entry {
                Ok(course) => self.sync_course(&course).await,
                Err(rejected) => CourseOutcome::Failed {
                    code: rejected.code,
                    error: rejected.error,
                },
            };
            report.record(outcome);
        }
    }

    pub async fn sync_course(&self, course: &SourceCourse) -> CourseOutcome {
        let Some(code) = course
            .sis_course_id
            .as_deref()
            .filter(|code| !code.trim().is_empty())
        else {
            return CourseOutcome::Skipped {
                code: course.display_code(),
                reason: SkipReason::NoSisCode,
            };
        };

        info!("About to check Leganto for {}", code);
        let target = match self.leganto.find_by_code(code).await {
            Ok(target) => target,
            Err(AppError::NotFound(_)) => {
                return CourseOutcome::Skipped {
                    code: code.to_string(),
                    reason: SkipReason::NotInLeganto,
                };
            }
            Err(error) => {
                return CourseOutcome::Failed {
                    code: code.to_string(),
                    error,
                };
            }
        };

        match self.push_update(code, course, &target).await {
            Ok(()) => CourseOutcome::Updated {
                code: code.to_string(),
            },
            Err(error) => CourseOutcome::Failed {
                code: code.to_string(),
                error,
            },
        }
    }

    async fn push_update(
        &self,
        code: &str,
        course: &SourceCourse,
        target: &TargetCourseRecord,
    ) -> Result<(), AppError> {
        let mut update = normalize(&self.run, code, course)?;
        update.instructor = self.resolve_instructors(course).await;
        self.leganto.update_course(&target.id, &update).await
    }

    /// One entry per teacher, in Canvas order; unresolved ids stay as `null`.
    async fn resolve_instructors(&self, course: &SourceCourse) -> Vec<Instructor> {
        let mut instructors = Vec::with_capacity(course.teachers.len());
        for teacher in &course.teachers {
            let primary_id = self.canvas.resolve_instructor_identity(teacher.id).await;
            instructors.push(Instructor { primary_id });
        }
        instructors
    }
}

/// Builds the Leganto record for `course`, leaving the instructor list empty.
pub fn normalize(run: &RunConfig, code: &str, course: &SourceCourse) -> Result<CourseUpdate, AppError> {
    let term = course
        .term
        .as_ref()
        .ok_or_else(|| AppError::MalformedResponse(format!("Canvas course {} has no term", code)))?;

    let start_date = tidy_date(term.start_at.as_deref(), run.default_start)?;
    let end_date = tidy_date(term.end_at.as_deref(), run.default_end)?;
    let term_code = map_term(&term.name);
    let department = course.department().to_string();

    Ok(CourseUpdate {
        code: code.to_string(),
        name: course.name.clone(),
        processing_department: ValueDesc::same(PROCESSING_DEPARTMENT),
        term: vec![ValueDesc::same(term_code)],
        academic_department: ValueDesc::same(department),
        searchable_id: vec![searchable_id(code).to_string()],
        start_date,
        end_date,
        status: ACTIVE_STATUS.to_string(),
        participants: course.total_students,
        year: run.display_year.clone(),
        instructor: Vec::new(),
    })
}

/// Reduces a Canvas timestamp to `YYYY-MM-DD`, or formats `default` when absent.
pub fn tidy_date(raw: Option<&str>, default: NaiveDate) -> Result<String, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default.format(DATE_FORMAT).to_string());
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive().format(DATE_FORMAT).to_string());
    }

    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, DATE_FORMAT).ok())
        .map(|day| day.format(DATE_FORMAT).to_string())
        .ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}
