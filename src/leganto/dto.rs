use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::TargetCourseRecord;

/// Body of `GET /courses?q=code~...`.
///
/// Alma omits `course` entirely when nothing matched.
#[derive(Debug, Deserialize)]
pub struct CourseSearchResponse {
    pub total_record_count: u64,
    #[serde(default)]
    pub course: Vec<TargetCourseRecord>,
}

impl CourseSearchResponse {
    /// The record whose code is exactly `code`; `NotFound` when the count is zero.
    pub fn into_record(self, code: &str) -> Result<TargetCourseRecord, AppError> {
        if self.total_record_count == 0 {
            return Err(AppError::NotFound(code.to_string()));
        }

        let returned = self.course.len();
        self.course
            .into_iter()
            .find(|record| record.code.as_deref().is_none_or(|c| c == code))
            .ok_or_else(|| {
                AppError::MalformedResponse(format!(
                    "Leganto reported {} record(s) for {} but returned {} without that code",
                    self.total_record_count, code, returned
                ))
            })
    }
}

/// Reads a course search response for `code`.
pub fn read_search(
    code: &str,
    status: StatusCode,
    body: &str,
) -> Result<TargetCourseRecord, AppError> {
    if !status.is_success() {
        return Err(AppError::Transport {
            status,
            body: body.to_string(),
        });
    }

    let parsed: CourseSearchResponse = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("Leganto search for {}: {}", code, e)))?;
    parsed.into_record(code)
}
